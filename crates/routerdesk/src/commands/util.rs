//! Shared helpers for command handlers.

use std::io::IsTerminal;

use serde::Serialize;

use routerdesk_core::{CommandResult, RecordFilter, RecordId, split_list};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

/// Build a record filter from the shared `--search` / `--category` flags.
pub fn filter(list: &ListArgs) -> RecordFilter {
    let mut filter = RecordFilter::new();
    if let Some(ref search) = list.search {
        filter = filter.query(search);
    }
    if let Some(ref category) = list.category {
        filter = filter.category(category.as_str());
    }
    filter
}

pub fn id(raw: u64) -> RecordId {
    RecordId::new(raw)
}

/// Comma-separated flag value into a trimmed list, when the flag was given.
pub fn list_flag(value: Option<String>) -> Option<Vec<String>> {
    value.map(|v| split_list(&v))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so the operation is
/// refused instead of hanging.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[derive(Serialize)]
struct Removed<'a> {
    entity_type: &'a str,
    id: RecordId,
    label: &'a str,
}

/// Report a `CommandResult::Removed`; other results are ignored.
pub fn print_removed(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    let CommandResult::Removed {
        entity_type,
        id,
        label,
    } = result
    else {
        return Ok(());
    };
    let removed = Removed {
        entity_type,
        id: *id,
        label,
    };
    let out = output::render_single(
        &global.output_format(),
        &removed,
        |r| format!("Deleted {} '{}' (#{})", r.entity_type, r.label, r.id),
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Render one record with its detail view.
pub fn print_single<T: Serialize>(
    global: &GlobalOpts,
    record: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError> {
    let out = output::render_single(&global.output_format(), record, detail_fn, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Render a filtered listing.
pub fn print_list<T, R>(
    global: &GlobalOpts,
    records: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: Serialize,
    R: tabled::Tabled,
{
    let out = output::render_list(&global.output_format(), records, to_row, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Whether table cells should carry color codes.
pub fn color(global: &GlobalOpts) -> bool {
    output::should_color(&global.color_mode())
}
