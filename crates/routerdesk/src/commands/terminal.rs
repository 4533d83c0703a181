//! Simulated terminal: command reference, command execution, history.

use tabled::Tabled;

use routerdesk_core::{
    Command as CoreCommand, CommandHistoryEntry, CommandReference, CommandResult, CommandStatus,
    Console,
};

use crate::cli::{CommandsArgs, CommandsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ReferenceRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Example")]
    example: String,
}

impl From<&CommandReference> for ReferenceRow {
    fn from(r: &CommandReference) -> Self {
        Self {
            category: r.category.clone(),
            command: r.command.clone(),
            description: r.description.clone(),
            example: output::or_dash(&r.example),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Time")]
    timestamp: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl HistoryRow {
    fn new(h: &CommandHistoryEntry, color: bool) -> Self {
        Self {
            timestamp: h.timestamp.clone(),
            command: h.command.clone(),
            status: output::status(
                &h.status.to_string(),
                h.status == CommandStatus::Success,
                color,
            ),
        }
    }
}

pub fn handle(
    console: &mut Console,
    args: CommandsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CommandsCommand::Reference(list) => {
            let rows = util::filter(&list).apply(console.terminal().reference.iter());
            util::print_list(
                global,
                &rows,
                |r| ReferenceRow::from(*r),
                |r| r.command.clone(),
            )
        }

        CommandsCommand::Run { line } => {
            let line = line.join(" ");
            let result = console.execute(CoreCommand::RunCommand { line })?;
            if let CommandResult::Terminal(lines) = result {
                let out = output::render_single(
                    &global.output_format(),
                    lines.as_slice(),
                    |l| l.join("\n"),
                    |l| l.join("\n"),
                )?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        CommandsCommand::History => {
            let color = util::color(global);
            let rows: Vec<&CommandHistoryEntry> = console.terminal().recent_history().collect();
            util::print_list(
                global,
                &rows,
                |h| HistoryRow::new(h, color),
                |h| h.command.clone(),
            )
        }
    }
}
