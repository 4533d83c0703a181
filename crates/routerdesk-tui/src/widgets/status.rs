//! Colored cells for the enum columns of the section tables.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use routerdesk_core::{
    AccessState, ActivityStatus, CommandStatus, FirewallAction, LinkStatus, LogLevel, Permille,
    Priority,
};

use crate::theme;

pub fn link(status: LinkStatus) -> Span<'static> {
    match status {
        LinkStatus::Up => Span::styled("● up", theme::ok()),
        LinkStatus::Down => Span::styled("○ down", theme::fail()),
    }
}

pub fn activity(status: ActivityStatus) -> Span<'static> {
    match status {
        ActivityStatus::Active => Span::styled("● active", theme::ok()),
        ActivityStatus::Inactive => Span::styled("○ inactive", theme::label()),
    }
}

pub fn firewall_action(action: FirewallAction) -> Span<'static> {
    let style = match action {
        FirewallAction::Allow => theme::ok(),
        FirewallAction::Deny => theme::fail(),
        FirewallAction::Drop => theme::warn(),
    };
    Span::styled(action.to_string(), style)
}

pub fn access(state: AccessState) -> Span<'static> {
    let style = match state {
        AccessState::Allowed => theme::ok(),
        AccessState::Restricted => theme::warn(),
        AccessState::Blocked => theme::fail(),
    };
    Span::styled(state.to_string(), style)
}

pub fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => theme::value(),
        LogLevel::Warning => theme::warn(),
        LogLevel::Error => theme::fail().add_modifier(Modifier::BOLD),
        LogLevel::Debug => theme::label(),
    }
}

pub fn level(level: LogLevel) -> Span<'static> {
    Span::styled(level.to_string().to_uppercase(), level_style(level))
}

pub fn priority(priority: Priority) -> Span<'static> {
    let style = match priority {
        Priority::High => theme::fail(),
        Priority::Medium => theme::warn(),
        Priority::Low => theme::label(),
    };
    Span::styled(priority.to_string(), style)
}

pub fn command(status: CommandStatus) -> Span<'static> {
    match status {
        CommandStatus::Success => Span::styled("✓", theme::ok()),
        CommandStatus::Error => Span::styled("✗", theme::fail()),
    }
}

pub fn flag(on: bool) -> Span<'static> {
    if on {
        Span::styled("on", theme::ok())
    } else {
        Span::styled("off", theme::label())
    }
}

/// Green below 75%, amber below 90%, red above.
pub fn usage_style(usage: Permille) -> Style {
    match usage.percent() {
        0..75 => theme::ok(),
        75..90 => theme::warn(),
        _ => theme::fail(),
    }
}

/// Error counter: red when nonzero.
pub fn errors(count: u64) -> Span<'static> {
    let style = if count == 0 { theme::ok() } else { theme::fail() };
    Span::styled(count.to_string(), style)
}
