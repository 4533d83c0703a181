//! Terminal screen: simulated IOS prompt, command catalog and history.
//!
//! `:` (or `i`) opens the prompt. While it is open the screen captures
//! every key; Enter runs the line, Up/Down walk the history and Esc closes
//! the prompt. Enter on a catalog or history row runs that command.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};
use tui_input::Input;

use routerdesk_core::{Command, CommandHistoryEntry, CommandReference, RecordFilter};

use crate::action::Action;
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status, sub_tabs, text_input};

const TABS: &[&str] = &["Reference", "History"];
const REFERENCE: usize = 0;

pub struct TerminalScreen {
    focused: bool,
    tab: usize,
    reference: TableNav,
    history: TableNav,
    filter: FilterText,
    /// Index into the distinct catalog categories; `None` shows all.
    category: Option<usize>,
    prompt: Option<Input>,
    /// Steps back from the newest history entry while browsing with Up.
    history_cursor: Option<usize>,
}

/// Distinct catalog categories, in catalog order.
fn categories(console: &RouterConsole) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for entry in console.terminal().reference.iter() {
        if !out.contains(&entry.category.as_str()) {
            out.push(entry.category.as_str());
        }
    }
    out
}

fn run(line: impl Into<String>) -> Action {
    Action::Execute(Command::RunCommand { line: line.into() })
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: REFERENCE,
            reference: TableNav::default(),
            history: TableNav::default(),
            filter: FilterText::default(),
            category: None,
            prompt: None,
            history_cursor: None,
        }
    }

    fn category_name<'a>(&self, console: &'a RouterConsole) -> Option<&'a str> {
        self.category
            .and_then(|idx| categories(console).get(idx).copied())
    }

    fn visible_reference<'a>(&self, console: &'a RouterConsole) -> Vec<&'a CommandReference> {
        RecordFilter::new()
            .query(self.filter.as_str())
            .category(self.category_name(console))
            .apply(console.terminal().reference.iter())
    }

    fn visible_history<'a>(&self, console: &'a RouterConsole) -> Vec<&'a CommandHistoryEntry> {
        self.filter
            .filter()
            .apply(console.terminal().recent_history())
    }

    fn prompt_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let prompt = self.prompt.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.history_cursor = None;
                None
            }
            KeyCode::Enter => {
                let line = prompt.value().trim().to_owned();
                *prompt = Input::default();
                self.history_cursor = None;
                (!line.is_empty()).then(|| run(line))
            }
            KeyCode::Up | KeyCode::Down => {
                let history: Vec<&CommandHistoryEntry> =
                    console.terminal().recent_history().collect();
                let next = match (key.code, self.history_cursor) {
                    (KeyCode::Up, None) => Some(0),
                    (KeyCode::Up, Some(i)) => Some((i + 1).min(history.len().saturating_sub(1))),
                    (_, Some(0) | None) => None,
                    (_, Some(i)) => Some(i - 1),
                };
                self.history_cursor = next.filter(|i| *i < history.len());
                *prompt = match self.history_cursor.and_then(|i| history.get(i)) {
                    Some(entry) => Input::new(entry.command.clone()),
                    None => Input::default(),
                };
                None
            }
            _ => {
                text_input::apply_key(prompt, key);
                None
            }
        }
    }

    fn table_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        match key.code {
            KeyCode::Char(':' | 'i') => {
                self.prompt = Some(Input::default());
                return None;
            }
            KeyCode::Char('c') if self.tab == REFERENCE => {
                let count = categories(console).len();
                self.category = match self.category {
                    None if count > 0 => Some(0),
                    Some(i) if i + 1 < count => Some(i + 1),
                    _ => None,
                };
                self.reference.reset();
                return None;
            }
            _ => {}
        }

        if self.tab == REFERENCE {
            let rows = self.visible_reference(console);
            if self.reference.handle_key(key, rows.len()) {
                return None;
            }
            let entry = self.reference.selected(rows.len()).and_then(|i| rows.get(i))?;
            match key.code {
                KeyCode::Enter => Some(run(entry.command.clone())),
                KeyCode::Char('y') => {
                    self.prompt = Some(Input::new(entry.command.clone()));
                    None
                }
                _ => None,
            }
        } else {
            let rows = self.visible_history(console);
            if self.history.handle_key(key, rows.len()) {
                return None;
            }
            let entry = self.history.selected(rows.len()).and_then(|i| rows.get(i))?;
            (key.code == KeyCode::Enter).then(|| run(entry.command.clone()))
        }
    }

    fn render_output(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let hostname = &console.config().hostname;
        let [output_area, prompt_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

        let output = &console.terminal().output;
        let inner_height = usize::from(output_area.height.saturating_sub(2));
        let skip = output.len().saturating_sub(inner_height);
        let lines: Vec<Line> = output
            .iter()
            .skip(skip)
            .map(|line| {
                if line.starts_with(hostname.as_str()) {
                    Line::styled(line.clone(), theme::preview_command())
                } else if line.starts_with('%') {
                    Line::styled(line.clone(), theme::fail())
                } else {
                    Line::styled(line.clone(), theme::value())
                }
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(panel(" Output ".to_owned(), self.focused)),
            output_area,
        );

        let block = panel(" Prompt ".to_owned(), self.prompt.is_some());
        let inner = block.inner(prompt_area);
        frame.render_widget(block, prompt_area);
        let prefix = format!("{hostname}# ");
        let width = u16::try_from(prefix.chars().count()).unwrap_or(u16::MAX);
        let [prefix_area, input_area] =
            Layout::horizontal([Constraint::Length(width), Constraint::Min(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(prefix, theme::preview_command())),
            prefix_area,
        );
        match &self.prompt {
            Some(input) => {
                text_input::render_input(frame, input_area, input, theme::value(), true);
            }
            None => frame.render_widget(
                Paragraph::new(Span::styled("press : to type a command", theme::label())),
                input_area,
            ),
        }
    }

    fn render_reference(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_reference(console);
        let selected = self.reference.selected(rows.len());
        let [table_area, detail_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(4)]).areas(area);

        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Row::new(vec![
                    first_cell(selected == Some(i), r.command.clone()),
                    Cell::from(r.category.clone()).style(theme::label()),
                ])
            })
            .collect();
        let category = self.category_name(console).unwrap_or("all");
        let total = console.terminal().reference.len();
        render_table(
            frame,
            table_area,
            panel(
                format!(
                    " Commands{}  [{category}] ",
                    self.filter.count_suffix(rows.len(), total)
                ),
                self.focused,
            ),
            &["Command", "Category"],
            &[Constraint::Percentage(60), Constraint::Percentage(40)],
            table_rows,
            &self.reference,
        );

        if let Some(entry) = selected.and_then(|i| rows.get(i)) {
            let lines = vec![
                Line::styled(format!(" {}", entry.description), theme::value()),
                Line::from(vec![
                    Span::styled(" e.g. ", theme::label()),
                    Span::styled(entry.example.clone(), theme::preview_command()),
                ]),
            ];
            frame.render_widget(
                Paragraph::new(lines).block(panel(" Usage ".to_owned(), false)),
                detail_area,
            );
        }
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_history(console);
        let selected = self.history.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, h)| {
                Row::new(vec![
                    first_cell(selected == Some(i), h.timestamp.clone()),
                    Cell::from(status::command(h.status)),
                    Cell::from(h.command.clone()),
                ])
            })
            .collect();
        let total = console.terminal().history.len();
        render_table(
            frame,
            area,
            panel(
                format!(" History{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Time", "", "Command"],
            &[Constraint::Length(11), Constraint::Length(2), Constraint::Min(10)],
            table_rows,
            &self.history,
        );
    }
}

impl Component for TerminalScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        if self.prompt.is_some() {
            return Ok(self.prompt_key(key, console));
        }
        if let KeyCode::Char(c @ ('[' | ']')) = key.code {
            self.tab = sub_tabs::cycle(self.tab, TABS.len(), c == ']');
            return Ok(None);
        }
        Ok(self.table_key(key, console))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            self.reference.reset();
            self.history.reset();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
                .areas(area);
        self.render_output(frame, left, console);

        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(right);
        frame.render_widget(Paragraph::new(sub_tabs::render_sub_tabs(TABS, self.tab)), tabs_area);
        if self.tab == REFERENCE {
            self.render_reference(frame, body, console);
        } else {
            self.render_history(frame, body, console);
        }
    }

    fn captures_input(&self) -> bool {
        self.prompt.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.prompt.is_some() {
            &[("Enter", "run"), ("↑/↓", "history"), ("Esc", "close")]
        } else if self.tab == REFERENCE {
            &[(":", "prompt"), ("Enter", "run"), ("y", "copy to prompt"), ("c", "category")]
        } else {
            &[(":", "prompt"), ("Enter", "run again"), ("[ ]", "tabs")]
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::test_support::{code, console, key, render_text};

    #[test]
    fn prompt_captures_and_runs_line() {
        let console = console();
        let mut screen = TerminalScreen::new();
        screen.handle_key_event(key(':'), &console).unwrap();
        assert!(screen.captures_input());

        for c in "show vlan brief".chars() {
            assert!(screen.handle_key_event(key(c), &console).unwrap().is_none());
        }
        match screen.handle_key_event(code(KeyCode::Enter), &console).unwrap() {
            Some(Action::Execute(Command::RunCommand { line })) => {
                assert_eq!(line, "show vlan brief");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(screen.captures_input());

        screen.handle_key_event(code(KeyCode::Esc), &console).unwrap();
        assert!(!screen.captures_input());
    }

    #[test]
    fn up_recalls_latest_history() {
        let console = console();
        let latest = console.terminal().recent_history().next().unwrap().command.clone();
        let mut screen = TerminalScreen::new();
        screen.handle_key_event(key('i'), &console).unwrap();
        screen.handle_key_event(code(KeyCode::Up), &console).unwrap();
        assert_eq!(screen.prompt.as_ref().unwrap().value(), latest);
        screen.handle_key_event(code(KeyCode::Down), &console).unwrap();
        assert_eq!(screen.prompt.as_ref().unwrap().value(), "");
    }

    #[test]
    fn category_cycle_narrows_catalog() {
        let console = console();
        let mut screen = TerminalScreen::new();
        let all = screen.visible_reference(&console).len();
        screen.handle_key_event(key('c'), &console).unwrap();
        let first = screen.visible_reference(&console);
        assert!(!first.is_empty() && first.len() < all);
        assert!(first.iter().all(|r| r.category == first[0].category));

        let count = categories(&console).len();
        for _ in 0..count {
            screen.handle_key_event(key('c'), &console).unwrap();
        }
        assert_eq!(screen.visible_reference(&console).len(), all);
    }

    #[test]
    fn enter_on_catalog_row_runs_it() {
        let console = console();
        let mut screen = TerminalScreen::new();
        assert!(matches!(
            screen.handle_key_event(code(KeyCode::Enter), &console).unwrap(),
            Some(Action::Execute(Command::RunCommand { line })) if line == "show version"
        ));
        let text = render_text(&screen, &console);
        assert!(text.contains("Router#"));
    }
}
