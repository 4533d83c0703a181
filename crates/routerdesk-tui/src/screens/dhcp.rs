//! DHCP screen: server settings, static reservations and active leases.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};

use routerdesk_core::{
    Command, DhcpLease, DhcpReservation, LeaseKind, UpdateDhcpSettingsRequest,
};

use crate::action::{Action, FormRequest, PendingConfirm, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, record_keys, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status, sub_tabs};

const TABS: &[&str] = &["Settings", "Reservations", "Leases"];
const SETTINGS: usize = 0;
const RESERVATIONS: usize = 1;
const LEASES: usize = 2;

pub struct DhcpScreen {
    focused: bool,
    tab: usize,
    reservations: TableNav,
    leases: TableNav,
    filter: FilterText,
}

impl DhcpScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: SETTINGS,
            reservations: TableNav::default(),
            leases: TableNav::default(),
            filter: FilterText::default(),
        }
    }

    fn visible_reservations<'a>(&self, console: &'a RouterConsole) -> Vec<&'a DhcpReservation> {
        self.filter.filter().apply(console.dhcp().reservations.iter())
    }

    fn visible_leases<'a>(&self, console: &'a RouterConsole) -> Vec<&'a DhcpLease> {
        self.filter.filter().apply(console.dhcp().leases.iter())
    }

    fn settings_key(key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenForm(FormRequest::DhcpSettings)),
            KeyCode::Char(' ') => Some(Action::Execute(Command::UpdateDhcpSettings(
                UpdateDhcpSettingsRequest {
                    enabled: Some(!console.dhcp().settings.enabled),
                    ..UpdateDhcpSettingsRequest::default()
                },
            ))),
            _ => None,
        }
    }

    fn leases_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let rows = self.visible_leases(console);
        if self.leases.handle_key(key, rows.len()) {
            return None;
        }
        let selected = self.leases.selected(rows.len()).and_then(|i| rows.get(i))?;
        match key.code {
            KeyCode::Char('r' | 'd') => Some(Action::ShowConfirm(
                PendingConfirm::new(
                    format!("Release lease {} ({})?", selected.ip, selected.hostname),
                    Command::ReleaseLease {
                        ip: selected.ip.clone(),
                    },
                ),
            )),
            _ => None,
        }
    }

    fn render_settings(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let settings = &console.dhcp().settings;
        let row = |label: &str, value: &str| {
            Line::from(vec![
                Span::styled(format!("  {label:<18}"), theme::label()),
                Span::styled(value.to_owned(), theme::value()),
            ])
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("  {:<18}", "Server"), theme::label()),
                status::flag(settings.enabled),
            ]),
            Line::raw(""),
            row("Pool", &format!("{} - {}", settings.pool_start, settings.pool_end)),
            row("Lease time", &format!("{} h", settings.lease_hours)),
            row("Default gateway", &settings.gateway),
            row("DNS", &format!("{}, {}", settings.dns_primary, settings.dns_secondary)),
            Line::raw(""),
            row(
                "Leases",
                &format!(
                    "{} dynamic, {} reservations",
                    console.dhcp().dynamic_leases(),
                    console.dhcp().reservations.len()
                ),
            ),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(panel(" DHCP Server ".to_owned(), self.focused)),
            area,
        );
    }

    fn render_reservations(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_reservations(console);
        let selected = self.reservations.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Row::new(vec![
                    first_cell(selected == Some(i), r.hostname.clone()),
                    Cell::from(r.mac.clone()),
                    Cell::from(r.ip.clone()),
                    Cell::from(r.description.clone()).style(theme::label()),
                ])
            })
            .collect();
        let total = console.dhcp().reservations.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Reservations{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Hostname", "MAC", "Address", "Description"],
            &[
                Constraint::Length(24),
                Constraint::Length(20),
                Constraint::Length(16),
                Constraint::Min(12),
            ],
            table_rows,
            &self.reservations,
        );
    }

    fn render_leases(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible_leases(console);
        let selected = self.leases.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let kind_style = match l.kind {
                    LeaseKind::Dynamic => theme::value(),
                    LeaseKind::Reserved => theme::warn(),
                };
                Row::new(vec![
                    first_cell(selected == Some(i), l.ip.clone()),
                    Cell::from(l.hostname.clone()),
                    Cell::from(l.mac.clone()),
                    Cell::from(l.lease.clone()),
                    Cell::from(l.kind.to_string()).style(kind_style),
                ])
            })
            .collect();
        let total = console.dhcp().leases.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Leases{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Address", "Hostname", "MAC", "Expires", "Type"],
            &[
                Constraint::Length(18),
                Constraint::Length(22),
                Constraint::Length(20),
                Constraint::Length(22),
                Constraint::Min(9),
            ],
            table_rows,
            &self.leases,
        );
    }
}

impl Component for DhcpScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char(']') => {
                self.tab = sub_tabs::cycle(self.tab, TABS.len(), true);
                return Ok(None);
            }
            KeyCode::Char('[') => {
                self.tab = sub_tabs::cycle(self.tab, TABS.len(), false);
                return Ok(None);
            }
            _ => {}
        }
        let action = match self.tab {
            SETTINGS => Self::settings_key(key, console),
            RESERVATIONS => {
                let rows = self.visible_reservations(console);
                record_keys(
                    &mut self.reservations,
                    key,
                    &rows,
                    RecordKind::Reservation,
                    Some(|id| Command::DeleteReservation { id }),
                )
            }
            _ => self.leases_key(key, console),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            self.reservations.reset();
            self.leases.reset();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        frame.render_widget(Paragraph::new(sub_tabs::render_sub_tabs(TABS, self.tab)), tabs_area);
        match self.tab {
            SETTINGS => self.render_settings(frame, body, console),
            RESERVATIONS => self.render_reservations(frame, body, console),
            LEASES => self.render_leases(frame, body, console),
            _ => {}
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tab {
            SETTINGS => &[("e", "edit"), ("space", "on/off"), ("[ ]", "tabs")],
            RESERVATIONS => &[("n", "new"), ("e", "edit"), ("d", "delete"), ("[ ]", "tabs")],
            _ => &[("r", "release"), ("/", "filter"), ("[ ]", "tabs")],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::test_support::{console, key, render_text};

    #[test]
    fn settings_space_flips_server() {
        let console = console();
        let mut screen = DhcpScreen::new();
        let action = screen.handle_key_event(key(' '), &console).unwrap();
        match action {
            Some(Action::Execute(Command::UpdateDhcpSettings(req))) => {
                assert_eq!(req.enabled, Some(false));
                assert!(req.pool_start.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn release_asks_first() {
        let console = console();
        let mut screen = DhcpScreen::new();
        screen.handle_key_event(key('['), &console).unwrap();
        assert_eq!(screen.tab, LEASES);
        let action = screen.handle_key_event(key('r'), &console).unwrap();
        match action {
            Some(Action::ShowConfirm(pending)) => {
                assert!(matches!(pending.command, Command::ReleaseLease { .. }));
                assert!(pending.prompt.starts_with("Release lease"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn reservations_tab_opens_create_dialog() {
        let console = console();
        let mut screen = DhcpScreen::new();
        screen.handle_key_event(key(']'), &console).unwrap();
        let action = screen.handle_key_event(key('n'), &console).unwrap();
        assert!(matches!(
            action,
            Some(Action::OpenForm(FormRequest::Create(RecordKind::Reservation)))
        ));
        let text = render_text(&screen, &console);
        assert!(text.contains("Servidor-Principal"));
    }
}
