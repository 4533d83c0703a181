//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use routerdesk_config::{self as config, COLOR_MODES, Config, OUTPUT_FORMATS};
use routerdesk_core::DuplicatePolicy;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// `--config` when given, the platform path otherwise.
fn target_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn select(prompt: &str, items: &[&str], current: &str) -> Result<String, CliError> {
    let default = items.iter().position(|i| *i == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(prompt_err)?;
    Ok(items.get(index).copied().unwrap_or(current).to_owned())
}

fn format_config(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Config(Box::new(e.into())))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = target_path(global);
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let mut cfg = config::load_config_from(&path)?;
            eprintln!("routerdesk configuration");
            eprintln!("   Config path: {}\n", path.display());

            let hostname: String = Input::new()
                .with_prompt("Router hostname")
                .default(cfg.console.hostname.clone())
                .interact_text()
                .map_err(prompt_err)?;
            cfg.set("console.hostname", &hostname)?;

            let output = select("Default output format", OUTPUT_FORMATS, &cfg.defaults.output)?;
            cfg.set("defaults.output", &output)?;

            let color = select("Color", COLOR_MODES, &cfg.defaults.color)?;
            cfg.set("defaults.color", &color)?;

            let policies = &["allow", "reject"];
            let current = match cfg.validation.duplicates {
                DuplicatePolicy::Allow => "allow",
                DuplicatePolicy::Reject => "reject",
            };
            let duplicates = select("Duplicate records", policies, current)?;
            cfg.set("validation.duplicates", &duplicates)?;

            let strict = dialoguer::Confirm::new()
                .with_prompt("Strict address validation?")
                .default(cfg.validation.strict)
                .interact()
                .map_err(prompt_err)?;
            cfg.validation.strict = strict;

            config::save_config_to(&cfg, &path)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_from(&path)?;
            let out = output::render_single(
                &global.output_format(),
                &cfg,
                |c| format_config(c).unwrap_or_default(),
                |_| path.display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_from(&path)?;
            cfg.set(&key, &value)?;
            config::save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("✓ Set {key} = {value}");
            }
            Ok(())
        }
    }
}
