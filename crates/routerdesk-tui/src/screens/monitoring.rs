//! Monitoring screen: resource gauges over per-interface counters.
//!
//! Layout:
//! ┌─ CPU ──────┐ ┌─ Memory ───┐ ┌─ Flash ────┐ ┌─ NVRAM ────┐
//! └────────────┘ └────────────┘ └────────────┘ └────────────┘
//! ┌─ Interface Statistics ─────────┐ ┌─ Detail ──────────────┐
//! └────────────────────────────────┘ └───────────────────────┘

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Gauge, Paragraph, Row};

use routerdesk_core::{Command, InterfaceStats, Permille, RecordFilter, SystemResources};

use crate::action::Action;
use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::screens::{FilterText, cycle_option, first_cell, render_table};
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{panel, status};

pub struct MonitoringScreen {
    focused: bool,
    nav: TableNav,
    filter: FilterText,
    /// Exact interface name, or every interface.
    interface: Option<String>,
}

fn row(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<14}"), theme::label()),
        Span::styled(value.into(), theme::value()),
    ])
}

fn gauge(frame: &mut Frame, area: Rect, title: &str, usage: Permille, detail: String) {
    let block = panel(format!(" {title} "), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [label_area, gauge_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .margin(1)
            .areas(inner);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {usage} "), status::usage_style(usage)),
            Span::styled(detail, theme::label()),
        ])),
        label_area,
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(status::usage_style(usage))
            .ratio(usage.ratio())
            .label(""),
        gauge_area,
    );
}

impl MonitoringScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            nav: TableNav::default(),
            filter: FilterText::default(),
            interface: None,
        }
    }

    fn record_filter(&self) -> RecordFilter {
        RecordFilter::new()
            .query(self.filter.as_str())
            .category(self.interface.as_deref())
    }

    fn visible<'a>(&self, console: &'a RouterConsole) -> Vec<&'a InterfaceStats> {
        self.record_filter()
            .apply(console.monitoring().interfaces.iter())
    }

    fn render_gauges(frame: &mut Frame, area: Rect, resources: &SystemResources) {
        let [cpu, memory, flash, nvram] =
            Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);
        gauge(frame, cpu, "CPU", resources.cpu.usage, String::new());
        gauge(
            frame,
            memory,
            "Memory",
            resources.memory.total.usage(),
            resources.memory.total.to_string(),
        );
        gauge(
            frame,
            flash,
            "Flash",
            resources.storage.flash.usage(),
            resources.storage.flash.to_string(),
        );
        gauge(
            frame,
            nvram,
            "NVRAM",
            resources.storage.nvram.usage(),
            resources.storage.nvram.to_string(),
        );
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible(console);
        let selected = self.nav.selected(rows.len());
        let table_rows = rows
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Row::new(vec![
                    first_cell(selected == Some(i), s.interface.clone()),
                    Cell::from(status::link(s.status)),
                    Cell::from(format!("{:>3}%", s.utilization)),
                    Cell::from(status::errors(s.total_errors())),
                    Cell::from(s.bandwidth.clone()).style(theme::label()),
                ])
            })
            .collect();
        let scope = self.interface.as_deref().unwrap_or("all");
        let total = console.monitoring().interfaces.len();
        render_table(
            frame,
            area,
            panel(
                format!(
                    " Interface Statistics [{scope}]{} ",
                    self.filter.count_suffix(rows.len(), total)
                ),
                self.focused,
            ),
            &["Interface", "Status", "Util", "Errors", "Bandwidth"],
            &[
                Constraint::Length(20),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(10),
            ],
            table_rows,
            &self.nav,
        );
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let rows = self.visible(console);
        let resources = &console.monitoring().resources;
        let mut lines = Vec::new();
        if let Some(s) = self.nav.selected(rows.len()).and_then(|i| rows.get(i)) {
            lines.extend([
                row("In", format!("{} bytes / {} pkts", s.in_octets, s.in_packets)),
                row("Out", format!("{} bytes / {} pkts", s.out_octets, s.out_packets)),
                row("Errors in/out", format!("{} / {}", s.in_errors, s.out_errors)),
                row("CRC", s.crc_errors.to_string()),
                row("Collisions", s.collisions.to_string()),
                Line::raw(""),
            ]);
        }
        lines.push(Line::styled("  Top processes", theme::table_header()));
        for process in &resources.cpu.processes {
            lines.push(row(&process.name, process.cpu.to_string()));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled("  Memory pools", theme::table_header()));
        for pool in &resources.memory.pools {
            let usage = pool.capacity.usage();
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", pool.name), theme::label()),
                Span::styled(format!("{usage} "), status::usage_style(usage)),
                Span::styled(pool.capacity.to_string(), theme::value()),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(row("Sampled", resources.sampled_at.clone()));
        frame.render_widget(
            Paragraph::new(lines).block(panel(" Detail ".to_owned(), false)),
            area,
        );
    }
}

impl Component for MonitoringScreen {
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
            KeyCode::Char('i') => {
                let names: Vec<String> = console
                    .monitoring()
                    .interface_names()
                    .map(str::to_owned)
                    .collect();
                self.interface = cycle_option(&names, self.interface.as_ref());
                self.nav.reset();
                None
            }
            KeyCode::Char('r') => Some(Action::Execute(Command::RefreshMonitoring)),
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
        let [gauges, body] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(6)]).areas(area);
        Self::render_gauges(frame, gauges, &console.monitoring().resources);

        let [table, detail] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        self.render_stats(frame, table, console);
        self.render_detail(frame, detail, console);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("i", "interface"), ("r", "refresh"), ("/", "filter")]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::test_support::{console, key, render_text};

    #[test]
    fn interface_selector_narrows_to_one_row() {
        let console = console();
        let mut screen = MonitoringScreen::new();
        assert_eq!(screen.visible(&console).len(), 4);

        screen.handle_key_event(key('i'), &console).unwrap();
        assert_eq!(screen.interface.as_deref(), Some("GigabitEthernet0/0/1"));
        let rows = screen.visible(&console);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].interface, "GigabitEthernet0/0/1");

        for _ in 0..4 {
            screen.handle_key_event(key('i'), &console).unwrap();
        }
        assert_eq!(screen.interface, None);
        assert_eq!(screen.visible(&console).len(), 4);
    }

    #[test]
    fn refresh_key_requests_a_new_sample() {
        let console = console();
        let mut screen = MonitoringScreen::new();
        assert!(matches!(
            screen.handle_key_event(key('r'), &console).unwrap(),
            Some(Action::Execute(Command::RefreshMonitoring))
        ));
    }

    #[test]
    fn gauges_and_pools_render() {
        let console = console();
        let text = render_text(&MonitoringScreen::new(), &console);
        assert!(text.contains("45.0%"));
        assert!(text.contains("75.6%"));
        assert!(text.contains("Serial0/1/0"));
        assert!(text.contains("Driver"));
        assert!(text.contains("[all]"));
    }
}
