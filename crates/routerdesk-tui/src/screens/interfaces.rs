//! Interfaces screen: link table with a detail strip for the selection.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};

use routerdesk_core::{Command, NetworkInterface};

use crate::action::{Action, FormRequest, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status};

const TITLES: &[&str] = &["Interface", "Type", "Address", "Mask", "Status", "Speed", "Description"];

pub struct InterfacesScreen {
    focused: bool,
    nav: TableNav,
    filter: FilterText,
}

impl InterfacesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            nav: TableNav::default(),
            filter: FilterText::default(),
        }
    }

    fn visible<'a>(&self, console: &'a RouterConsole) -> Vec<&'a NetworkInterface> {
        self.filter
            .filter()
            .apply(console.interfaces().interfaces.iter())
    }

    fn render_detail(frame: &mut Frame, area: Rect, iface: &NetworkInterface) {
        let address = if iface.has_address() {
            format!("{} {}", iface.ip, iface.mask)
        } else {
            "unassigned".to_owned()
        };
        let lines = vec![
            Line::from(vec![
                Span::styled("  Name      ", theme::label()),
                Span::styled(iface.name.clone(), theme::value()),
                Span::styled("    Type    ", theme::label()),
                Span::styled(iface.kind.to_string(), theme::value()),
                Span::styled("    Link    ", theme::label()),
                status::link(iface.status),
            ]),
            Line::from(vec![
                Span::styled("  Address   ", theme::label()),
                Span::styled(address, theme::value()),
                Span::styled("    Duplex  ", theme::label()),
                Span::styled(iface.duplex.to_string(), theme::value()),
                Span::styled("    Speed   ", theme::label()),
                Span::styled(iface.speed.clone(), theme::value()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel(" Detail ".into(), false)), area);
    }
}

impl Component for InterfacesScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        let rows = self.visible(console);
        if self.nav.handle_key(key, rows.len()) {
            return Ok(None);
        }
        let Some(selected) = self.nav.selected(rows.len()).and_then(|i| rows.get(i)) else {
            return Ok(None);
        };
        let action = match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenForm(FormRequest::Edit(
                RecordKind::Interface,
                selected.id,
            ))),
            KeyCode::Char(' ') => Some(Action::Execute(Command::ToggleInterface { id: selected.id })),
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
        let store = &console.interfaces().interfaces;
        let rows = self.visible(console);
        let selected = self.nav.selected(rows.len());

        let [table_area, detail_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(4)]).areas(area);

        let table_rows: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(i, iface)| {
                let address = if iface.has_address() { iface.ip.as_str() } else { "unassigned" };
                Row::new(vec![
                    first_cell(selected == Some(i), iface.name.clone()),
                    Cell::from(iface.kind.to_string()),
                    Cell::from(address.to_owned()),
                    Cell::from(iface.mask.clone()),
                    Cell::from(status::link(iface.status)),
                    Cell::from(iface.speed.clone()),
                    Cell::from(iface.description.clone()).style(theme::label()),
                ])
            })
            .collect();

        let title = format!(
            " Interfaces{} ",
            self.filter.count_suffix(rows.len(), store.len())
        );
        render_table(
            frame,
            table_area,
            panel(title, self.focused),
            TITLES,
            &[
                Constraint::Length(24),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(16),
                Constraint::Length(9),
                Constraint::Length(10),
                Constraint::Min(12),
            ],
            table_rows,
            &self.nav,
        );

        if let Some(iface) = selected.and_then(|i| rows.get(i)) {
            Self::render_detail(frame, detail_area, iface);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("e", "edit"), ("space", "up/down"), ("/", "filter"), ("p", "preview")]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use routerdesk_core::RecordId;

    use super::*;
    use crate::screens::test_support::{console, key, render_text};

    #[test]
    fn space_toggles_selected_interface() {
        let console = console();
        let mut screen = InterfacesScreen::new();
        let action = screen.handle_key_event(key('j'), &console).unwrap();
        assert!(action.is_none());
        let action = screen.handle_key_event(key(' '), &console).unwrap();
        assert!(matches!(
            action,
            Some(Action::Execute(Command::ToggleInterface { id })) if id == RecordId::new(2)
        ));
    }

    #[test]
    fn filter_narrows_rows() {
        let console = console();
        let mut screen = InterfacesScreen::new();
        screen
            .update(&Action::FilterChanged("loopback".into()))
            .unwrap();
        let rows = screen.visible(&console);
        assert!(!rows.is_empty());
        assert!(rows.len() < console.interfaces().interfaces.len());
    }

    #[test]
    fn renders_the_seeded_interfaces() {
        let console = console();
        let text = render_text(&InterfacesScreen::new(), &console);
        assert!(text.contains("GigabitEthernet0/0/1"));
        assert!(text.contains("Interfaces (5)"));
    }
}
