//! Interactive session over one in-memory console.
//!
//! Each stdin line is split with shell quoting rules and parsed as a
//! `routerdesk` command line, so `vlans create --name Lab --vlan-id 50`
//! works exactly as it would on the command line, except that state
//! survives until the session ends.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;

use routerdesk_core::Console;

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

use super::dispatch;

const PROMPT: &str = "routerdesk> ";

/// Result of handling one input line.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Flags given on a shell line win over the session flags they name.
fn merge_globals(session: &GlobalOpts, line: &GlobalOpts) -> GlobalOpts {
    GlobalOpts {
        output: line.output.clone().or_else(|| session.output.clone()),
        color: line.color.clone().or_else(|| session.color.clone()),
        verbose: session.verbose,
        quiet: session.quiet || line.quiet,
        yes: session.yes || line.yes,
        strict: session.strict,
        duplicates: session.duplicates,
        config: session.config.clone(),
    }
}

fn flush_notifications(console: &mut Console, quiet: bool) {
    for note in console.sink_mut().drain() {
        tracing::debug!(%note, "notification");
        if !quiet {
            eprintln!("{note}");
        }
    }
}

fn report(err: CliError) {
    eprintln!("{:?}", miette::Report::new(err));
}

fn handle_line(console: &mut Console, session: &GlobalOpts, line: &str) -> Step {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Step::Continue;
    }
    if matches!(line, "exit" | "quit") {
        return Step::Exit;
    }

    let Some(words) = shlex::split(line) else {
        report(CliError::Validation {
            field: "input".into(),
            reason: "unbalanced quotes".into(),
        });
        return Step::Continue;
    };

    let cli = match Cli::try_parse_from(std::iter::once("routerdesk".to_owned()).chain(words)) {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version land here as well; clap formats both.
            let _ = err.print();
            return Step::Continue;
        }
    };

    let global = merge_globals(session, &cli.global);
    tracing::debug!(command = ?cli.command, "shell dispatch");
    if let Err(err) = dispatch(cli.command, console, &global) {
        report(err);
    }
    flush_notifications(console, global.quiet);
    Step::Continue
}

/// Read commands from stdin until EOF or `exit`.
pub fn run(console: &mut Console, global: &GlobalOpts) -> Result<(), CliError> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive && !global.quiet {
        eprintln!("routerdesk shell. Type a command without the `routerdesk` prefix, `exit` to leave.");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            eprint!("{PROMPT}");
            io::stderr().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if handle_line(console, global, &line?) == Step::Exit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use routerdesk_core::ConsoleConfig;

    use super::*;
    use crate::cli::OutputFormat;

    fn session() -> GlobalOpts {
        Cli::try_parse_from(["routerdesk", "-q", "dashboard"])
            .unwrap()
            .global
    }

    #[test]
    fn exit_and_blank_lines() {
        let mut console = Console::in_memory(ConsoleConfig::default());
        let global = session();
        assert_eq!(handle_line(&mut console, &global, "   "), Step::Continue);
        assert_eq!(handle_line(&mut console, &global, "# note"), Step::Continue);
        assert_eq!(handle_line(&mut console, &global, "quit"), Step::Exit);
    }

    #[test]
    fn state_survives_between_lines() {
        let mut console = Console::in_memory(ConsoleConfig::default());
        let global = session();
        let before = console.vlans().vlans.len();
        handle_line(
            &mut console,
            &global,
            "vlans create --vlan-id 77 --name 'Lab Net' --subnet 10.77.0.0/24",
        );
        assert_eq!(console.vlans().vlans.len(), before + 1);
        assert!(console.vlans().vlans.iter().any(|v| v.name == "Lab Net"));
    }

    #[test]
    fn nested_shell_is_refused_without_touching_state() {
        let mut console = Console::in_memory(ConsoleConfig::default());
        let global = session();
        let before = console.terminal().history.len();
        assert_eq!(handle_line(&mut console, &global, "shell"), Step::Continue);
        assert_eq!(console.terminal().history.len(), before);
    }

    #[test]
    fn line_flags_override_session_output() {
        let session = session();
        let line = Cli::try_parse_from(["routerdesk", "-o", "json", "dashboard"])
            .unwrap()
            .global;
        let merged = merge_globals(&session, &line);
        assert_eq!(merged.output_format(), OutputFormat::Json);
        assert!(merged.quiet);
    }
}
