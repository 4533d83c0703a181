//! Security screen: firewall rules, per-device access control and the
//! remote-access VPN server.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};

use routerdesk_core::{
    AccessControlEntry, Command, FirewallRule, UpdateVpnSettingsRequest, VpnAuthentication,
};

use crate::action::{Action, FormRequest, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, record_keys, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status, sub_tabs};

const TABS: &[&str] = &["Firewall", "Access Control", "VPN"];
const FIREWALL: usize = 0;
const ACCESS: usize = 1;

pub struct SecurityScreen {
    focused: bool,
    tab: usize,
    firewall: TableNav,
    access: TableNav,
    filter: FilterText,
}

impl SecurityScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: FIREWALL,
            firewall: TableNav::default(),
            access: TableNav::default(),
            filter: FilterText::default(),
        }
    }

    fn visible_rules<'a>(&self, console: &'a RouterConsole) -> Vec<&'a FirewallRule> {
        self.filter.filter().apply(console.security().firewall.iter())
    }

    fn visible_access<'a>(&self, console: &'a RouterConsole) -> Vec<&'a AccessControlEntry> {
        self.filter.filter().apply(console.security().access.iter())
    }

    fn firewall_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let rows = self.visible_rules(console);
        if key.code == KeyCode::Char(' ') {
            let rule = self.firewall.selected(rows.len()).and_then(|i| rows.get(i))?;
            return Some(Action::Execute(Command::ToggleFirewallRule { id: rule.id }));
        }
        record_keys(
            &mut self.firewall,
            key,
            &rows,
            RecordKind::FirewallRule,
            Some(|id| Command::DeleteFirewallRule { id }),
        )
    }

    fn access_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let rows = self.visible_access(console);
        if self.access.handle_key(key, rows.len()) {
            return None;
        }
        let entry = self.access.selected(rows.len()).and_then(|i| rows.get(i))?;
        match key.code {
            KeyCode::Char(' ') => Some(Action::Execute(Command::ToggleAccess { id: entry.id })),
            KeyCode::Char('c') => {
                Some(Action::Execute(Command::ToggleParentalControl { id: entry.id }))
            }
            _ => None,
        }
    }

    fn vpn_key(key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenForm(FormRequest::VpnSettings)),
            KeyCode::Char(' ') => Some(Action::Execute(Command::UpdateVpnSettings(
                UpdateVpnSettingsRequest {
                    enabled: Some(!console.security().vpn.enabled),
                    ..UpdateVpnSettingsRequest::default()
                },
            ))),
            _ => None,
        }
    }

    fn render_vpn(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let vpn = &console.security().vpn;
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<18}"), theme::label()),
                Span::styled(value, theme::value()),
            ])
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("  {:<18}", "Server"), theme::label()),
                status::flag(vpn.enabled),
            ]),
            Line::raw(""),
            row("Protocol", vpn.protocol.to_string()),
            row("Port", vpn.port.to_string()),
            row("Encryption", vpn.encryption.to_string()),
            row("Authentication", vpn.authentication.to_string()),
        ];
        if vpn.authentication == VpnAuthentication::Md5 {
            lines.push(Line::raw(""));
            lines.push(Line::styled("  MD5 is weak; prefer SHA-256", theme::fail()));
        }
        frame.render_widget(
            Paragraph::new(lines).block(panel(" VPN Server ".to_owned(), self.focused)),
            area,
        );
    }

    fn render_firewall(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_rules(console);
        let selected = self.firewall.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Row::new(vec![
                    first_cell(selected == Some(i), r.name.clone()),
                    Cell::from(r.source.clone()),
                    Cell::from(r.destination.clone()),
                    Cell::from(r.port.clone()),
                    Cell::from(r.protocol.to_string()),
                    Cell::from(status::firewall_action(r.action)),
                    Cell::from(status::activity(r.status)),
                ])
            })
            .collect();
        let total = console.security().firewall.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Firewall Rules{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Name", "Source", "Destination", "Port", "Proto", "Action", "Status"],
            &[
                Constraint::Length(22),
                Constraint::Length(18),
                Constraint::Length(18),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(10),
            ],
            table_rows,
            &self.firewall,
        );
    }

    fn render_access(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_access(console);
        let selected = self.access.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, a)| {
                Row::new(vec![
                    first_cell(selected == Some(i), a.device.clone()),
                    Cell::from(a.mac.clone()),
                    Cell::from(a.time_restriction.clone()).style(theme::label()),
                    Cell::from(status::access(a.access)),
                    Cell::from(status::flag(a.parental_control)),
                ])
            })
            .collect();
        let total = console.security().access.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Access Control{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Device", "MAC", "Schedule", "Access", "Parental"],
            &[
                Constraint::Length(22),
                Constraint::Length(20),
                Constraint::Length(18),
                Constraint::Length(12),
                Constraint::Min(8),
            ],
            table_rows,
            &self.access,
        );
    }
}

impl Component for SecurityScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        if let KeyCode::Char(c @ ('[' | ']')) = key.code {
            self.tab = sub_tabs::cycle(self.tab, TABS.len(), c == ']');
            return Ok(None);
        }
        let action = match self.tab {
            FIREWALL => self.firewall_key(key, console),
            ACCESS => self.access_key(key, console),
            _ => Self::vpn_key(key, console),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            self.firewall.reset();
            self.access.reset();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        frame.render_widget(Paragraph::new(sub_tabs::render_sub_tabs(TABS, self.tab)), tabs_area);
        match self.tab {
            FIREWALL => self.render_firewall(frame, body, console),
            ACCESS => self.render_access(frame, body, console),
            _ => self.render_vpn(frame, body, console),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tab {
            FIREWALL => &[
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("space", "on/off"),
                ("[ ]", "tabs"),
            ],
            ACCESS => &[("space", "allow/block"), ("c", "parental"), ("[ ]", "tabs")],
            _ => &[("e", "configure"), ("space", "on/off"), ("[ ]", "tabs")],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use routerdesk_core::RecordId;

    use super::*;
    use crate::screens::test_support::{console, key, render_text};

    #[test]
    fn space_toggles_rule_on_firewall_tab() {
        let console = console();
        let mut screen = SecurityScreen::new();
        assert!(matches!(
            screen.handle_key_event(key(' '), &console).unwrap(),
            Some(Action::Execute(Command::ToggleFirewallRule { id })) if id == RecordId::new(1)
        ));
    }

    #[test]
    fn access_tab_keys() {
        let console = console();
        let mut screen = SecurityScreen::new();
        screen.handle_key_event(key(']'), &console).unwrap();
        screen.handle_key_event(key('G'), &console).unwrap();
        assert!(matches!(
            screen.handle_key_event(key('c'), &console).unwrap(),
            Some(Action::Execute(Command::ToggleParentalControl { id })) if id == RecordId::new(4)
        ));
        assert!(matches!(
            screen.handle_key_event(key(' '), &console).unwrap(),
            Some(Action::Execute(Command::ToggleAccess { .. }))
        ));
        assert!(screen.handle_key_event(key('n'), &console).unwrap().is_none());
    }

    #[test]
    fn vpn_tab_shows_and_flips_server() {
        let console = console();
        let mut screen = SecurityScreen::new();
        screen.handle_key_event(key('['), &console).unwrap();
        assert_eq!(TABS[screen.tab], "VPN");

        let text = render_text(&screen, &console);
        assert!(text.contains("OpenVPN"));
        assert!(text.contains("1194"));

        match screen.handle_key_event(key(' '), &console).unwrap() {
            Some(Action::Execute(Command::UpdateVpnSettings(req))) => {
                assert_eq!(req.enabled, Some(true));
                assert!(req.port.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            screen.handle_key_event(key('e'), &console).unwrap(),
            Some(Action::OpenForm(FormRequest::VpnSettings))
        ));
    }
}
