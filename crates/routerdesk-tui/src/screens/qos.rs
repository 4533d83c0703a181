//! QoS screen: traffic classes, application rules and per-device limits.
//!
//! The global switch and current usage sit above every tab; `o` flips the
//! switch and `s` edits the uplink size.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};

use routerdesk_core::{
    ApplicationRule, Command, DeviceLimit, Priority, TrafficClass, UpdateQosSettingsRequest,
};

use crate::action::{Action, FormRequest, RecordKind};
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, first_cell, record_keys, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status, sub_tabs};

const TABS: &[&str] = &["Classes", "Applications", "Device Limits"];
const CLASSES: usize = 0;
const APPS: usize = 1;
const LIMITS: usize = 2;

/// Step used by `+` / `-` on a class share.
const BANDWIDTH_STEP: u8 = 5;

/// `####------` style bar for a share of 100.
fn share_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub struct QosScreen {
    focused: bool,
    tab: usize,
    navs: [TableNav; 3],
    filter: FilterText,
}

impl QosScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: CLASSES,
            navs: Default::default(),
            filter: FilterText::default(),
        }
    }

    fn classes<'a>(&self, console: &'a RouterConsole) -> Vec<&'a TrafficClass> {
        self.filter.filter().apply(console.qos().classes.iter())
    }

    fn apps<'a>(&self, console: &'a RouterConsole) -> Vec<&'a ApplicationRule> {
        self.filter.filter().apply(console.qos().applications.iter())
    }

    fn limits<'a>(&self, console: &'a RouterConsole) -> Vec<&'a DeviceLimit> {
        self.filter.filter().apply(console.qos().limits.iter())
    }

    fn classes_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let rows = self.classes(console);
        let nav = &mut self.navs[CLASSES];
        if nav.handle_key(key, rows.len()) {
            return None;
        }
        let class = nav.selected(rows.len()).and_then(|i| rows.get(i))?;
        let current = class.bandwidth_percent;
        let percent = match key.code {
            KeyCode::Char('e') | KeyCode::Enter => {
                return Some(Action::OpenForm(FormRequest::Bandwidth(class.id)));
            }
            KeyCode::Char('+' | '=') => current.saturating_add(BANDWIDTH_STEP).min(100),
            KeyCode::Char('-') => current.saturating_sub(BANDWIDTH_STEP),
            _ => return None,
        };
        (percent != current).then_some(Action::Execute(Command::SetTrafficClassBandwidth {
            id: class.id,
            percent,
        }))
    }

    fn apps_key(&mut self, key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        let rows = self.apps(console);
        let nav = &mut self.navs[APPS];
        if nav.handle_key(key, rows.len()) {
            return None;
        }
        let app = nav.selected(rows.len()).and_then(|i| rows.get(i))?;
        (key.code == KeyCode::Char(' '))
            .then_some(Action::Execute(Command::ToggleApplicationRule { id: app.id }))
    }

    fn settings_key(key: KeyEvent, console: &RouterConsole) -> Option<Action> {
        match key.code {
            KeyCode::Char('o') => Some(Action::Execute(Command::UpdateQosSettings(
                UpdateQosSettingsRequest {
                    enabled: Some(!console.qos().settings.enabled),
                    ..UpdateQosSettingsRequest::default()
                },
            ))),
            KeyCode::Char('s') => Some(Action::OpenForm(FormRequest::QosSettings)),
            _ => None,
        }
    }

    /// Switch state, uplink size and measured load per priority.
    fn render_usage(frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let settings = &console.qos().settings;
        let mut spans = vec![
            Span::styled(" QoS ", theme::label()),
            status::flag(settings.enabled),
            Span::styled(
                format!("  {} Mbps total ", settings.total_bandwidth_mbps),
                theme::value(),
            ),
        ];
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            spans.push(Span::raw("  "));
            spans.push(status::priority(priority));
            spans.push(Span::styled(
                format!(
                    " {}% ({} Mbps)",
                    settings.usage.get(priority),
                    settings.used_mbps(priority)
                ),
                theme::value(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_classes(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.classes(console);
        let selected = self.navs[CLASSES].selected(rows.len());
        let allocated = console.qos().allocated_percent();

        let [summary_area, table_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        let summary_style = if allocated > 100 { theme::fail() } else { theme::ok() };
        let mut summary = vec![
            Span::styled(" Allocated ", theme::label()),
            Span::styled(format!("{allocated}%"), summary_style),
        ];
        if allocated > 100 {
            summary.push(Span::styled("  classes are oversubscribed", theme::fail()));
        }
        frame.render_widget(Paragraph::new(Line::from(summary)), summary_area);

        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Row::new(vec![
                    first_cell(selected == Some(i), c.name.clone()),
                    Cell::from(status::priority(c.priority)),
                    Cell::from(format!("{:>3}% {}", c.bandwidth_percent, share_bar(c.bandwidth_percent, 20))),
                    Cell::from(c.protocol.clone()).style(theme::label()),
                ])
            })
            .collect();
        render_table(
            frame,
            table_area,
            panel(" Traffic Classes ".to_owned(), self.focused),
            &["Class", "Priority", "Bandwidth", "Traffic"],
            &[
                Constraint::Length(20),
                Constraint::Length(9),
                Constraint::Length(27),
                Constraint::Min(12),
            ],
            table_rows,
            &self.navs[CLASSES],
        );
    }

    fn render_apps(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.apps(console);
        let selected = self.navs[APPS].selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, a)| {
                Row::new(vec![
                    first_cell(selected == Some(i), a.name.clone()),
                    Cell::from(a.kind.clone()),
                    Cell::from(status::priority(a.priority)),
                    Cell::from(a.bandwidth.clone()),
                    Cell::from(status::activity(a.status)),
                ])
            })
            .collect();
        let total = console.qos().applications.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Applications{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Application", "Type", "Priority", "Bandwidth", "Status"],
            &[
                Constraint::Length(18),
                Constraint::Length(20),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Min(10),
            ],
            table_rows,
            &self.navs[APPS],
        );
    }

    fn render_limits(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.limits(console);
        let selected = self.navs[LIMITS].selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, l)| {
                Row::new(vec![
                    first_cell(selected == Some(i), l.device.clone()),
                    Cell::from(l.ip.clone()),
                    Cell::from(format!("{} Mbps", l.upload_mbps)),
                    Cell::from(format!("{} Mbps", l.download_mbps)),
                    Cell::from(status::priority(l.priority)),
                ])
            })
            .collect();
        let total = console.qos().limits.len();
        render_table(
            frame,
            area,
            panel(
                format!(" Device Limits{} ", self.filter.count_suffix(rows.len(), total)),
                self.focused,
            ),
            &["Device", "Address", "Upload", "Download", "Priority"],
            &[
                Constraint::Length(18),
                Constraint::Length(16),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Min(8),
            ],
            table_rows,
            &self.navs[LIMITS],
        );
    }
}

impl Component for QosScreen {
    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        console: &RouterConsole,
    ) -> Result<Option<Action>> {
        if let KeyCode::Char(c @ ('[' | ']')) = key.code {
            self.tab = sub_tabs::cycle(self.tab, TABS.len(), c == ']');
            return Ok(None);
        }
        if let Some(action) = Self::settings_key(key, console) {
            return Ok(Some(action));
        }
        let action = match self.tab {
            CLASSES => self.classes_key(key, console),
            APPS => self.apps_key(key, console),
            _ => {
                let rows = self.limits(console);
                record_keys(&mut self.navs[LIMITS], key, &rows, RecordKind::DeviceLimit, None)
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if self.filter.update(action) {
            for nav in &mut self.navs {
                nav.reset();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let [usage_area, tabs_area, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);
        Self::render_usage(frame, usage_area, console);
        frame.render_widget(Paragraph::new(sub_tabs::render_sub_tabs(TABS, self.tab)), tabs_area);
        match self.tab {
            CLASSES => self.render_classes(frame, body, console),
            APPS => self.render_apps(frame, body, console),
            _ => self.render_limits(frame, body, console),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tab {
            CLASSES => &[
                ("e", "set share"),
                ("+/-", "±5%"),
                ("o", "QoS on/off"),
                ("[ ]", "tabs"),
            ],
            APPS => &[("space", "on/off"), ("o", "QoS on/off"), ("[ ]", "tabs")],
            _ => &[("e", "edit"), ("s", "uplink"), ("[ ]", "tabs")],
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
    fn plus_and_minus_step_the_share() {
        let console = console();
        let mut screen = QosScreen::new();
        assert!(matches!(
            screen.handle_key_event(key('+'), &console).unwrap(),
            Some(Action::Execute(Command::SetTrafficClassBandwidth { id, percent: 45 }))
                if id == RecordId::new(1)
        ));
        assert!(matches!(
            screen.handle_key_event(key('-'), &console).unwrap(),
            Some(Action::Execute(Command::SetTrafficClassBandwidth { percent: 35, .. }))
        ));
    }

    #[test]
    fn share_bar_is_proportional() {
        assert_eq!(share_bar(50, 10), "█████░░░░░");
        assert_eq!(share_bar(0, 4), "░░░░");
        assert_eq!(share_bar(150, 4), "████");
    }

    #[test]
    fn classes_show_allocation() {
        let console = console();
        let text = render_text(&QosScreen::new(), &console);
        assert!(text.contains("Allocated 100%"));
        assert!(text.contains("Alta Prioridad"));
    }

    #[test]
    fn limits_are_edit_only() {
        let console = console();
        let mut screen = QosScreen::new();
        screen.handle_key_event(key('['), &console).unwrap();
        assert_eq!(screen.tab, LIMITS);
        assert!(screen.handle_key_event(key('n'), &console).unwrap().is_none());
        assert!(matches!(
            screen.handle_key_event(key('e'), &console).unwrap(),
            Some(Action::OpenForm(FormRequest::Edit(RecordKind::DeviceLimit, _)))
        ));
    }

    #[test]
    fn switch_and_usage_sit_above_tabs() {
        let console = console();
        let mut screen = QosScreen::new();
        let text = render_text(&screen, &console);
        assert!(text.contains("1000 Mbps total"));
        assert!(text.contains("45% (450 Mbps)"));

        screen.handle_key_event(key(']'), &console).unwrap();
        match screen.handle_key_event(key('o'), &console).unwrap() {
            Some(Action::Execute(Command::UpdateQosSettings(req))) => {
                assert_eq!(req.enabled, Some(false));
                assert!(req.total_bandwidth_mbps.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            screen.handle_key_event(key('s'), &console).unwrap(),
            Some(Action::OpenForm(FormRequest::QosSettings))
        ));
    }
}
