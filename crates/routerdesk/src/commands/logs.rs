//! System log command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use routerdesk_core::{
    AppendLogRequest, Command as CoreCommand, CommandResult, Console, LogEntry, LogLevel,
    RecordFilter,
};

use crate::cli::{GlobalOpts, LogLevelArg, LogsArgs, LogsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn map_level(l: LogLevelArg) -> LogLevel {
    match l {
        LogLevelArg::Info => LogLevel::Info,
        LogLevelArg::Warning => LogLevel::Warning,
        LogLevelArg::Error => LogLevel::Error,
        LogLevelArg::Debug => LogLevel::Debug,
    }
}

fn paint_level(level: LogLevel, color: bool) -> String {
    let text = level.to_string();
    if !color {
        return text;
    }
    match level {
        LogLevel::Error => text.red().to_string(),
        LogLevel::Warning => text.yellow().to_string(),
        LogLevel::Info => text.green().to_string(),
        LogLevel::Debug => text.dimmed().to_string(),
    }
}

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time")]
    timestamp: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Type")]
    category: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl LogRow {
    fn new(e: &LogEntry, color: bool) -> Self {
        Self {
            timestamp: e.timestamp.clone(),
            level: paint_level(e.level, color),
            category: e.category.clone(),
            source: e.source.clone(),
            message: e.message.clone(),
        }
    }
}

fn log_detail(e: &LogEntry) -> String {
    output::detail(&[
        ("ID", e.id.to_string()),
        ("Time", e.timestamp.clone()),
        ("Level", e.level.to_string()),
        ("Type", e.category.clone()),
        ("Source", e.source.clone()),
        ("Message", e.message.clone()),
        ("Details", output::or_dash(&e.details)),
    ])
}

fn plain_line(e: &LogEntry) -> String {
    format!("{} [{}] {}", e.timestamp, e.level, e.message)
}

pub fn handle(console: &mut Console, args: LogsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        LogsCommand::List {
            category,
            level,
            search,
        } => {
            let filter = log_filter(category.as_deref(), level, search.as_deref());
            let rows = console.logs().filtered(&filter);
            util::print_list(global, &rows, |e| LogRow::new(e, color), |e| plain_line(e))
        }

        LogsCommand::Append {
            level,
            category,
            source,
            message,
            details,
        } => {
            let request = AppendLogRequest {
                level: map_level(level),
                category,
                source,
                message,
                details,
            };
            let result = console.execute(CoreCommand::AppendLog(request))?;
            if let CommandResult::Log(entry) = result {
                util::print_single(global, &entry, log_detail, |e| e.id.to_string())?;
            }
            Ok(())
        }

        LogsCommand::Clear => {
            let count = console.logs().entries.len();
            if !util::confirm(&format!("Clear {count} log entries?"), global.yes)? {
                return Ok(());
            }
            console.execute(CoreCommand::ClearLogs)?;
            if !global.quiet {
                eprintln!("Cleared {count} log entries");
            }
            Ok(())
        }

        LogsCommand::Export {
            category,
            level,
            search,
            file,
        } => {
            let filter = log_filter(category.as_deref(), level, search.as_deref());
            let result = console.execute(CoreCommand::ExportLogs(filter))?;
            let CommandResult::Exported(entries) = result else {
                return Ok(());
            };
            let json = serde_json::to_string_pretty(&entries)?;
            match file {
                Some(path) => {
                    std::fs::write(&path, json + "\n")?;
                    if !global.quiet {
                        eprintln!(
                            "Exported {} log entries to {}",
                            entries.len(),
                            path.display()
                        );
                    }
                }
                None => output::print_output(&json, global.quiet),
            }
            Ok(())
        }
    }
}

fn log_filter(
    category: Option<&str>,
    level: Option<LogLevelArg>,
    search: Option<&str>,
) -> RecordFilter {
    let level = level.map(|l| map_level(l).to_string());
    let mut filter = RecordFilter::new()
        .category(category)
        .facet("level", level.as_deref());
    if let Some(search) = search {
        filter = filter.query(search);
    }
    filter
}
