//! `routerdesk-tui`: terminal dashboard for the simulated router console.
//!
//! Built on [ratatui](https://ratatui.rs) over one seeded, in-memory
//! [`Console`](routerdesk_core::Console). Sections are reachable from the
//! sidebar via hotkeys (1-9, 0, m): Dashboard, Interfaces, DHCP, Routing,
//! VLANs, VRFs, Security, QoS, Terminal, Logs and Monitoring.
//!
//! Logs go to a file (default `/tmp/routerdesk-tui.log`) so they never
//! corrupt the terminal. Nothing is persisted: quitting discards every edit.

mod action;
mod app;
mod component;
mod console_bridge;
mod forms;
mod screen;
mod screens;
mod session;
mod theme;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use routerdesk_config::{self as config, Config};

use crate::app::App;

/// Terminal dashboard for the routerdesk simulated router.
#[derive(Parser, Debug)]
#[command(name = "routerdesk-tui", version, about)]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(long, env = "ROUTERDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (defaults to `tui.log_file` from the config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Reject records whose addresses do not parse
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may be written to stdout/stderr while
/// the alternate screen is active. The returned guard flushes on drop.
fn setup_tracing(log_file: &std::path::Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "routerdesk_tui={log_level},routerdesk_core={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("routerdesk-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<Config> {
    let cfg = match cli.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first, so a panic during setup still restores the terminal
    session::install_hooks()?;

    let cfg = load_config(&cli)?;

    let log_file = cli.log_file.clone().unwrap_or_else(|| cfg.tui.log_file.clone());
    let _log_guard = setup_tracing(&log_file, cli.verbose);

    let mut console_config = cfg.to_console_config();
    if cli.strict {
        console_config.validation.strict = true;
    }

    info!(
        hostname = %console_config.hostname,
        strict = console_config.validation.strict,
        "starting routerdesk-tui"
    );

    let mut app = App::new(console_config, cfg.tui);
    app.run().await?;

    Ok(())
}
