mod cli;
mod commands;
mod error;
mod output;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use routerdesk_config::{self as config, Config};
use routerdesk_core::{Console, ConsoleConfig, DuplicatePolicy};

use crate::cli::{Cli, ColorMode, Command, DuplicateMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands manage the file themselves
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "routerdesk", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = load_config(&cli.global)?;
            let global = apply_defaults(cli.global, &cfg);
            let mut console = Console::in_memory(console_config(&global, &cfg));

            if let Command::Shell = cmd {
                return commands::shell::run(&mut console, &global);
            }

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &mut console, &global);
            for note in console.sink_mut().drain() {
                tracing::info!(%note, "notification");
            }
            result
        }
    }
}

fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let cfg = match global.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    Ok(cfg)
}

/// Fill unset output/color flags from `[defaults]`.
fn apply_defaults(mut global: GlobalOpts, cfg: &Config) -> GlobalOpts {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }
    global
}

/// Config file first, then `--strict` / `--duplicates`.
fn console_config(global: &GlobalOpts, cfg: &Config) -> ConsoleConfig {
    let mut console = cfg.to_console_config();
    if global.strict {
        console.validation.strict = true;
    }
    if let Some(mode) = global.duplicates {
        console.validation.duplicates = match mode {
            DuplicateMode::Allow => DuplicatePolicy::Allow,
            DuplicateMode::Reject => DuplicatePolicy::Reject,
        };
    }
    console
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn globals(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["routerdesk"];
        argv.extend_from_slice(args);
        argv.push("dashboard");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn config_defaults_fill_missing_flags() {
        let mut cfg = Config::default();
        cfg.set("defaults.output", "yaml").unwrap();
        let global = apply_defaults(globals(&[]), &cfg);
        assert_eq!(global.output_format(), OutputFormat::Yaml);

        let global = apply_defaults(globals(&["-o", "plain"]), &cfg);
        assert_eq!(global.output_format(), OutputFormat::Plain);
    }

    #[test]
    fn flags_override_validation_policy() {
        let mut cfg = Config::default();
        cfg.set("validation.duplicates", "reject").unwrap();
        let console = console_config(&globals(&[]), &cfg);
        assert_eq!(console.validation.duplicates, DuplicatePolicy::Reject);
        assert!(!console.validation.strict);

        let console = console_config(&globals(&["--strict", "--duplicates", "allow"]), &cfg);
        assert_eq!(console.validation.duplicates, DuplicatePolicy::Allow);
        assert!(console.validation.strict);
    }
}
