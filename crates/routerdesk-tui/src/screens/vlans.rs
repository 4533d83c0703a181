//! VLANs screen: VLAN database and switchport membership.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Cell, Paragraph, Row};

use routerdesk_core::{Command, PortMode, SwitchPort, Vlan};

use crate::action::{Action, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, record_keys, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, sub_tabs};

const TABS: &[&str] = &["VLANs", "Ports"];
const VLANS: usize = 0;

pub struct VlansScreen {
    focused: bool,
    tab: usize,
    vlans: TableNav,
    ports: TableNav,
    filter: FilterText,
}

impl VlansScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: VLANS,
            vlans: TableNav::default(),
            ports: TableNav::default(),
            filter: FilterText::default(),
        }
    }

    fn visible_vlans<'a>(&self, console: &'a RouterConsole) -> Vec<&'a Vlan> {
        self.filter.filter().apply(console.vlans().vlans.iter())
    }

    fn visible_ports<'a>(&self, console: &'a RouterConsole) -> Vec<&'a SwitchPort> {
        self.filter.filter().apply(console.vlans().ports.iter())
    }

    fn render_vlans(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_vlans(console);
        let selected = self.vlans.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Row::new(vec![
                    first_cell(selected == Some(i), v.vlan_id.to_string()),
                    Cell::from(v.name.clone()).style(theme::value()),
                    Cell::from(v.subnet.clone()),
                    Cell::from(v.ports.join(", ")),
                    Cell::from(v.description.clone()).style(theme::label()),
                ])
            })
            .collect();
        let total = console.vlans().vlans.len();
        render_table(
            frame,
            area,
            panel(
                format!(" VLANs{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["VLAN", "Name", "Subnet", "Ports", "Description"],
            &[
                Constraint::Length(7),
                Constraint::Length(18),
                Constraint::Length(18),
                Constraint::Length(28),
                Constraint::Min(12),
            ],
            table_rows,
            &self.vlans,
        );
    }

    fn render_ports(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_ports(console);
        let selected = self.ports.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mode_style = match p.mode {
                    PortMode::Access => theme::value(),
                    PortMode::Trunk => theme::warn(),
                };
                Row::new(vec![
                    first_cell(selected == Some(i), p.port.clone()),
                    Cell::from(p.mode.to_string()).style(mode_style),
                    Cell::from(p.vlans.clone()),
                    Cell::from(p.description.clone()).style(theme::label()),
                ])
            })
            .collect();
        let total = console.vlans().ports.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Switch Ports{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Port", "Mode", "VLANs", "Description"],
            &[
                Constraint::Length(24),
                Constraint::Length(8),
                Constraint::Length(18),
                Constraint::Min(12),
            ],
            table_rows,
            &self.ports,
        );
    }
}

impl Component for VlansScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        if let KeyCode::Char(c @ ('[' | ']')) = key.code {
            self.tab = sub_tabs::cycle(self.tab, TABS.len(), c == ']');
            return Ok(None);
        }
        let action = if self.tab == VLANS {
            let rows = self.visible_vlans(console);
            record_keys(
                &mut self.vlans,
                key,
                &rows,
                RecordKind::Vlan,
                Some(|id| Command::DeleteVlan { id }),
            )
        } else {
            let rows = self.visible_ports(console);
            record_keys(&mut self.ports, key, &rows, RecordKind::SwitchPort, None)
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            self.vlans.reset();
            self.ports.reset();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        frame.render_widget(Paragraph::new(sub_tabs::render_sub_tabs(TABS, self.tab)), tabs_area);
        if self.tab == VLANS {
            self.render_vlans(frame, body, console);
        } else {
            self.render_ports(frame, body, console);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.tab == VLANS {
            &[("n", "new"), ("e", "edit"), ("d", "delete"), ("[ ]", "tabs")]
        } else {
            &[("e", "edit"), ("/", "filter"), ("[ ]", "tabs")]
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action::FormRequest;
    use crate::screens::test_support::{console, key};

    #[test]
    fn ports_cannot_be_created_or_deleted() {
        let console = console();
        let mut screen = VlansScreen::new();
        screen.handle_key_event(key(']'), &console).unwrap();
        assert!(screen.handle_key_event(key('n'), &console).unwrap().is_none());
        assert!(screen.handle_key_event(key('d'), &console).unwrap().is_none());
        assert!(matches!(
            screen.handle_key_event(key('e'), &console).unwrap(),
            Some(Action::OpenForm(FormRequest::Edit(RecordKind::SwitchPort, _)))
        ));
    }

    #[test]
    fn delete_prompt_names_the_vlan() {
        let console = console();
        let mut screen = VlansScreen::new();
        match screen.handle_key_event(key('d'), &console).unwrap() {
            Some(Action::ShowConfirm(pending)) => {
                assert!(pending.prompt.starts_with("Delete VLAN"));
                assert!(matches!(pending.command, Command::DeleteVlan { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
