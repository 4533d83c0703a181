//! VRFs screen: VRF table with a detail pane for route targets, member
//! interfaces and the VRF routing table.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Wrap};

use routerdesk_core::{Command, Vrf};

use crate::action::{Action, FormRequest, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, record_keys, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status};

pub struct VrfsScreen {
    focused: bool,
    nav: TableNav,
    detail_open: bool,
    filter: FilterText,
}

impl VrfsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            nav: TableNav::default(),
            detail_open: false,
            filter: FilterText::default(),
        }
    }

    fn visible<'a>(&self, console: &'a RouterConsole) -> Vec<&'a Vrf> {
        self.filter.filter().apply(console.vrfs().vrfs.iter())
    }

    fn render_detail(frame: &mut Frame, area: Rect, vrf: &Vrf) {
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<14}"), theme::label()),
                Span::styled(value, theme::value()),
            ])
        };
        let none = |items: &[String]| {
            if items.is_empty() {
                "none".to_owned()
            } else {
                items.join(", ")
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("  {:<14}", "Status"), theme::label()),
                status::activity(vrf.status),
            ]),
            field("RD", vrf.rd.clone()),
            field("RT import", none(&vrf.rt_import)),
            field("RT export", none(&vrf.rt_export)),
            field("Interfaces", none(&vrf.interfaces)),
            Line::raw(""),
            Line::styled(" Routes", theme::title_style()),
        ];
        if vrf.routes.is_empty() {
            lines.push(Line::styled("  no routes", theme::label()));
        }
        for route in &vrf.routes {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", route.source.to_string()), theme::warn()),
                Span::styled(format!("{:<20}", route.network), theme::value()),
                Span::styled(format!("via {}", route.next_hop), theme::label()),
            ]));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel(format!(" {} ", vrf.name), true)),
            area,
        );
    }
}

impl Component for VrfsScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        let rows = self.visible(console);
        let selected = self.nav.selected(rows.len()).and_then(|i| rows.get(i));

        if let Some(vrf) = selected {
            let action = match key.code {
                KeyCode::Enter => {
                    self.detail_open = !self.detail_open;
                    return Ok(None);
                }
                KeyCode::Esc if self.detail_open => {
                    self.detail_open = false;
                    return Ok(None);
                }
                KeyCode::Char(' ') => Some(Action::Execute(Command::ToggleVrf { id: vrf.id })),
                KeyCode::Char('a') => Some(Action::OpenForm(FormRequest::AssignInterface(vrf.id))),
                KeyCode::Char('u') => {
                    Some(Action::OpenForm(FormRequest::UnassignInterface(vrf.id)))
                }
                _ => None,
            };
            if action.is_some() {
                return Ok(action);
            }
        }

        Ok(record_keys(
            &mut self.nav,
            key,
            &rows,
            RecordKind::Vrf,
            Some(|id| Command::DeleteVrf { id }),
        ))
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
        let (table_area, detail_area) = if detail.is_some() {
            let [top, bottom] =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(area);
            (top, Some(bottom))
        } else {
            (area, None)
        };

        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Row::new(vec![
                    first_cell(selected == Some(i), v.name.clone()),
                    Cell::from(v.rd.clone()),
                    Cell::from(status::activity(v.status)),
                    Cell::from(v.interfaces.len().to_string()),
                    Cell::from(v.routes.len().to_string()),
                    Cell::from(v.description.clone()).style(theme::label()),
                ])
            })
            .collect();
        let total = console.vrfs().vrfs.len();
        let active = console.vrfs().active();
        render_table(
            frame,
            table_area,
            panel(
                format!(
                    " VRFs{}  {active} active ",
                    self.filter.count_suffix(rows.len(), total)
                ),
                self.focused,
            ),
            &["Name", "RD", "Status", "Ifaces", "Routes", "Description"],
            &[
                Constraint::Length(16),
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Min(12),
            ],
            table_rows,
            &self.nav,
        );

        if let (Some(vrf), Some(area)) = (detail, detail_area) {
            Self::render_detail(frame, area, vrf);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("Enter", "detail"),
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("space", "on/off"),
            ("a/u", "add/remove iface"),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use routerdesk_core::RecordId;

    use super::*;
    use crate::screens::test_support::{code, console, key, render_text};

    #[test]
    fn enter_opens_detail_instead_of_editing() {
        let console = console();
        let mut screen = VrfsScreen::new();
        assert!(screen.handle_key_event(code(KeyCode::Enter), &console).unwrap().is_none());
        assert!(screen.detail_open);
        let text = render_text(&screen, &console);
        assert!(text.contains("RT import"));
        assert!(text.contains("CUSTOMER_A"));
    }

    #[test]
    fn interface_keys_open_dialogs() {
        let console = console();
        let mut screen = VrfsScreen::new();
        assert!(matches!(
            screen.handle_key_event(key('a'), &console).unwrap(),
            Some(Action::OpenForm(FormRequest::AssignInterface(id))) if id == RecordId::new(1)
        ));
        assert!(matches!(
            screen.handle_key_event(key('e'), &console).unwrap(),
            Some(Action::OpenForm(FormRequest::Edit(RecordKind::Vrf, _)))
        ));
    }
}
