//! Logs screen: newest-first system log with category and level selectors.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Wrap};
use strum::IntoEnumIterator;

use routerdesk_core::{Command, LogEntry, LogLevel, RecordFilter};

use crate::action::{Action, FormRequest, PendingConfirm};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, cycle_option, first_cell, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status};

pub struct LogsScreen {
    focused: bool,
    nav: TableNav,
    filter: FilterText,
    category: Option<String>,
    level: Option<LogLevel>,
    detail_open: bool,
}

/// Distinct categories in log order.
fn categories(console: &RouterConsole) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in console.logs().entries.iter() {
        if !out.contains(&entry.category) {
            out.push(entry.category.clone());
        }
    }
    out
}

impl LogsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            nav: TableNav::default(),
            filter: FilterText::default(),
            category: None,
            level: None,
            detail_open: false,
        }
    }

    fn record_filter(&self) -> RecordFilter {
        RecordFilter::new()
            .query(self.filter.as_str())
            .category(self.category.as_deref())
            .facet("level", self.level.map(|l| l.to_string()).as_deref())
    }

    fn visible<'a>(&self, console: &'a RouterConsole) -> Vec<&'a LogEntry> {
        console.logs().filtered(&self.record_filter())
    }

    fn render_detail(frame: &mut Frame, area: Rect, entry: &LogEntry) {
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {}  ", entry.timestamp), theme::label()),
                status::level(entry.level),
                Span::styled(format!("  {} / {}", entry.category, entry.source), theme::label()),
            ]),
            Line::styled(format!(" {}", entry.message), theme::value()),
            Line::styled(format!(" {}", entry.details), theme::label()),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel(format!(" Log #{} ", entry.id), true)),
            area,
        );
    }
}

impl Component for LogsScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        let rows = self.visible(console);
        if self.nav.handle_key(key, rows.len()) {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Char('c') => {
                self.category = cycle_option(&categories(console), self.category.as_ref());
                self.nav.reset();
                None
            }
            KeyCode::Char('l') => {
                let levels: Vec<LogLevel> = LogLevel::iter().collect();
                self.level = cycle_option(&levels, self.level.as_ref());
                self.nav.reset();
                None
            }
            KeyCode::Char('n') => Some(Action::OpenForm(FormRequest::AppendLog)),
            KeyCode::Char('x') => Some(Action::ExportLogs(self.record_filter())),
            KeyCode::Char('D') => Some(Action::ShowConfirm(PendingConfirm::new(
                format!("Clear all {} log entries?", console.logs().entries.len()),
                Command::ClearLogs,
            ))),
            KeyCode::Enter if !rows.is_empty() => {
                self.detail_open = !self.detail_open;
                None
            }
            KeyCode::Esc if self.detail_open => {
                self.detail_open = false;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            self.nav.reset();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible(console);
        let selected = self.nav.selected(rows.len());
        let detail = selected.and_then(|i| rows.get(i)).filter(|_| self.detail_open);

        let [table_area, detail_area] = Layout::vertical([
            Constraint::Min(5),
            Constraint::Length(if detail.is_some() { 6 } else { 0 }),
        ])
        .areas(area);

        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, e)| {
                Row::new(vec![
                    first_cell(selected == Some(i), e.timestamp.clone()),
                    Cell::from(status::level(e.level)),
                    Cell::from(e.category.clone()),
                    Cell::from(e.source.clone()).style(theme::label()),
                    Cell::from(e.message.clone()).style(status::level_style(e.level)),
                ])
            })
            .collect();

        let total = console.logs().entries.len();
        let category = self.category.as_deref().unwrap_or("all");
        let level = self.level.map_or_else(|| "all".to_owned(), |l| l.to_string());
        render_table(
            frame,
            table_area,
            panel(
                format!(
                    " Logs{}  category: {category}  level: {level} ",
                    self.filter.count_suffix(rows.len(), total)
                ),
                self.focused,
            ),
            &["Time", "Level", "Category", "Source", "Message"],
            &[
                Constraint::Length(21),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Min(20),
            ],
            table_rows,
            &self.nav,
        );

        if let Some(entry) = detail {
            Self::render_detail(frame, detail_area, entry);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("c", "category"),
            ("l", "level"),
            ("n", "new entry"),
            ("x", "export"),
            ("D", "clear"),
            ("Enter", "detail"),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::test_support::{console, key};

    #[test]
    fn level_selector_filters_entries() {
        let console = console();
        let mut screen = LogsScreen::new();
        let all = screen.visible(&console).len();

        screen.handle_key_event(key('l'), &console).unwrap();
        assert_eq!(screen.level, Some(LogLevel::Info));
        let infos = screen.visible(&console);
        assert!(infos.len() < all);
        assert!(infos.iter().all(|e| e.level == LogLevel::Info));

        // info, warning, error, debug, then back to all
        for _ in 0..4 {
            screen.handle_key_event(key('l'), &console).unwrap();
        }
        assert_eq!(screen.level, None);
        assert_eq!(screen.visible(&console).len(), all);
    }

    #[test]
    fn newest_entry_comes_first() {
        let console = console();
        let screen = LogsScreen::new();
        let rows = screen.visible(&console);
        let newest = console.logs().entries.iter().last().unwrap();
        assert_eq!(rows[0].id, newest.id);
    }

    #[test]
    fn clear_requires_confirmation() {
        let console = console();
        let mut screen = LogsScreen::new();
        match screen.handle_key_event(key('D'), &console).unwrap() {
            Some(Action::ShowConfirm(pending)) => {
                assert!(matches!(pending.command, Command::ClearLogs));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn export_carries_the_current_selectors() {
        let console = console();
        let mut screen = LogsScreen::new();
        screen.handle_key_event(key('c'), &console).unwrap();
        let category = screen.category.clone().unwrap();
        match screen.handle_key_event(key('x'), &console).unwrap() {
            Some(Action::ExportLogs(filter)) => {
                assert_eq!(filter, screen.record_filter());
                assert_eq!(filter.category_value(), &routerdesk_core::Category::Only(category));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
