//! Section screens. Each screen is a top-level Component.

pub mod dashboard;
pub mod dhcp;
pub mod interfaces;
pub mod logs;
pub mod monitoring;
pub mod qos;
pub mod routing;
pub mod security;
pub mod terminal;
pub mod vlans;
pub mod vrfs;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table};

use routerdesk_core::{Command, Record, RecordFilter, RecordId};

use crate::action::{Action, FormRequest, PendingConfirm, RecordKind};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::table_nav::TableNav;

/// One screen per sidebar entry, in sidebar order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Dashboard, Box::new(dashboard::DashboardScreen::new())),
        (ScreenId::Interfaces, Box::new(interfaces::InterfacesScreen::new())),
        (ScreenId::Dhcp, Box::new(dhcp::DhcpScreen::new())),
        (ScreenId::Routing, Box::new(routing::RoutingScreen::new())),
        (ScreenId::Vlans, Box::new(vlans::VlansScreen::new())),
        (ScreenId::Vrfs, Box::new(vrfs::VrfsScreen::new())),
        (ScreenId::Security, Box::new(security::SecurityScreen::new())),
        (ScreenId::Qos, Box::new(qos::QosScreen::new())),
        (ScreenId::Terminal, Box::new(terminal::TerminalScreen::new())),
        (ScreenId::Logs, Box::new(logs::LogsScreen::new())),
        (ScreenId::Monitoring, Box::new(monitoring::MonitoringScreen::new())),
    ]
}

// ── Shared table plumbing ────────────────────────────────────────────

/// Text typed into the filter bar, as seen by one screen.
#[derive(Debug, Default)]
pub struct FilterText(String);

impl FilterText {
    /// Track filter bar actions. Returns true when the text changed.
    pub fn update(&mut self, action: &Action) -> bool {
        match action {
            Action::FilterChanged(text) if *text != self.0 => {
                self.0.clone_from(text);
                true
            }
            Action::ClearFilter if !self.0.is_empty() => {
                self.0.clear();
                true
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter::new().query(&self.0)
    }

    /// `" (n/total)"` when the filter hides rows, empty otherwise.
    pub fn count_suffix(&self, shown: usize, total: usize) -> String {
        if self.0.trim().is_empty() {
            format!(" ({total})")
        } else {
            format!(" ({shown}/{total})")
        }
    }
}

/// Next item after `current` in `items`, wrapping through `None`.
pub fn cycle_option<T: Clone + PartialEq>(items: &[T], current: Option<&T>) -> Option<T> {
    match current.and_then(|c| items.iter().position(|i| i == c)) {
        None => items.first().cloned(),
        Some(idx) => items.get(idx + 1).cloned(),
    }
}

/// Header row from column titles.
pub fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(*t).style(theme::table_header()))
            .collect::<Vec<_>>(),
    )
}

/// Draw a table with the shared header and selection styling.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    titles: &[&'static str],
    widths: &[Constraint],
    rows: Vec<Row<'_>>,
    nav: &TableNav,
) {
    let len = rows.len();
    if len == 0 {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::styled("  nothing to show", theme::label())),
            inner,
        );
        return;
    }
    let table = Table::new(rows, widths.to_vec())
        .header(header(titles))
        .block(block)
        .row_highlight_style(theme::table_selected());
    let mut state = nav.state(len);
    frame.render_stateful_widget(table, area, &mut state);
}

/// Cell with the row marker in front of `text`.
pub fn first_cell(selected: bool, text: impl Into<String>) -> Cell<'static> {
    Cell::from(format!(
        "{}{}",
        crate::widgets::marker(selected),
        text.into()
    ))
}

/// Navigation plus n/e/d over a record table. `delete` is `None` for
/// records that can only be edited.
pub fn record_keys<T: Record>(
    nav: &mut TableNav,
    key: KeyEvent,
    rows: &[&T],
    kind: RecordKind,
    delete: Option<fn(RecordId) -> Command>,
) -> Option<Action> {
    if nav.handle_key(key, rows.len()) {
        return None;
    }
    if key.code == KeyCode::Char('n') && kind.creatable() {
        return Some(Action::OpenForm(FormRequest::Create(kind)));
    }
    let record = nav.selected(rows.len()).and_then(|i| rows.get(i))?;
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => {
            Some(Action::OpenForm(FormRequest::Edit(kind, record.id())))
        }
        KeyCode::Char('d') => {
            delete.map(|delete| confirm_delete(T::KIND, &record.label(), delete(record.id())))
        }
        _ => None,
    }
}

/// Ask before running a delete.
pub fn confirm_delete(kind: &str, label: &str, command: Command) -> Action {
    Action::ShowConfirm(PendingConfirm::new(
        format!("Delete {kind} '{label}'?"),
        command,
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use routerdesk_core::ConsoleConfig;
    use tokio::sync::mpsc;

    use crate::component::Component;
    use crate::console_bridge::{self, RouterConsole};

    pub fn console() -> RouterConsole {
        let (tx, _rx) = mpsc::unbounded_channel();
        console_bridge::connect(ConsoleConfig::default(), tx)
    }

    pub fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Render `screen` into a test buffer and return its text.
    #[allow(clippy::unwrap_used)]
    pub fn render_text(screen: &dyn Component, console: &RouterConsole) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), console))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_text_tracks_changes() {
        let mut filter = FilterText::default();
        assert!(filter.update(&Action::FilterChanged("gig".into())));
        assert!(!filter.update(&Action::FilterChanged("gig".into())));
        assert_eq!(filter.count_suffix(2, 5), " (2/5)");
        assert!(filter.update(&Action::ClearFilter));
        assert_eq!(filter.count_suffix(5, 5), " (5)");
        assert!(!filter.update(&Action::Tick));
    }

    #[test]
    fn cycle_option_wraps_through_none() {
        let items = ["a", "b"];
        assert_eq!(cycle_option(&items, None), Some("a"));
        assert_eq!(cycle_option(&items, Some(&"a")), Some("b"));
        assert_eq!(cycle_option(&items, Some(&"b")), None);
    }
}
