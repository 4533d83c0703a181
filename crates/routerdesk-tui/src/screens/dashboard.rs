//! Dashboard screen: headline counts for every section plus recent logs.
//!
//! Layout:
//! ┌─ Interfaces ─┐ ┌─ DHCP ───────┐ ┌─ Routing ────┐
//! └──────────────┘ └──────────────┘ └──────────────┘
//! ┌─ Segments ───┐ ┌─ Security ───┐ ┌─ QoS ────────┐
//! └──────────────┘ └──────────────┘ └──────────────┘
//! ┌─ CPU ────────┐ ┌─ Memory ─────┐ ┌─ Health ─────┐
//! └──────────────┘ └──────────────┘ └──────────────┘
//! ┌─ Recent Logs ────────────────────────────────────┐
//! └──────────────────────────────────────────────────┘

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use routerdesk_core::{DashboardSummary, Permille};

use crate::component::Component;
use crate::console_bridge::RouterConsole;
use crate::theme;
use crate::widgets::{panel, status};

const RECENT_LOGS: usize = 8;

pub struct DashboardScreen {
    focused: bool,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self { focused: false }
    }
}

fn stat(label: &str, value: impl ToString) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<14}"), theme::label()),
        Span::styled(value.to_string(), theme::value()),
    ])
}

fn stat_styled(label: &str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![Span::styled(format!("  {label:<14}"), theme::label()), value])
}

fn card(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    frame.render_widget(
        Paragraph::new(lines).block(panel(format!(" {title} "), false)),
        area,
    );
}

fn count_span(count: usize, bad: bool) -> Span<'static> {
    let style = if count > 0 && bad { theme::fail() } else { theme::value() };
    Span::styled(count.to_string(), style)
}

fn gauge_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    label: Line<'static>,
    usage: Permille,
) {
    let block = panel(format!(" {title} "), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [label_area, gauge_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .margin(1)
            .areas(inner);
    frame.render_widget(Paragraph::new(label), label_area);
    frame.render_widget(
        Gauge::default()
            .gauge_style(status::usage_style(usage))
            .ratio(usage.ratio())
            .label(""),
        gauge_area,
    );
}

impl DashboardScreen {
    fn render_cards(frame: &mut Frame, area: Rect, summary: &DashboardSummary) {
        let [top, middle, bottom] = Layout::vertical([Constraint::Length(6); 3]).areas(area);
        let thirds = [Constraint::Ratio(1, 3); 3];
        let [ifaces, dhcp, routing] = Layout::horizontal(thirds).areas(top);
        let [segments, security, qos] = Layout::horizontal(thirds).areas(middle);
        let [cpu, memory, health] = Layout::horizontal(thirds).areas(bottom);

        card(
            frame,
            ifaces,
            "Interfaces",
            vec![
                stat_styled("Up", Span::styled(summary.interfaces_up.to_string(), theme::ok())),
                stat_styled("Down", count_span(summary.interfaces_down, true)),
                stat("Unconfigured", summary.interfaces_unconfigured),
            ],
        );

        card(
            frame,
            dhcp,
            "DHCP",
            vec![
                stat_styled("Server", status::flag(summary.dhcp_enabled)),
                stat("Dynamic", summary.dynamic_leases),
                stat(
                    "Reserved",
                    format!("{} ({} bindings)", summary.reserved_leases, summary.reservations),
                ),
            ],
        );

        let protocols = if summary.enabled_protocols.is_empty() {
            "none".to_owned()
        } else {
            summary
                .enabled_protocols
                .iter()
                .map(|p| p.to_string().to_uppercase())
                .collect::<Vec<_>>()
                .join(", ")
        };
        card(
            frame,
            routing,
            "Routing",
            vec![
                stat("Protocols", protocols),
                stat("Static routes", summary.static_routes),
            ],
        );

        card(
            frame,
            segments,
            "Segments",
            vec![
                stat("VLANs", summary.vlans),
                stat(
                    "VRFs",
                    format!("{} active / {}", summary.active_vrfs, summary.total_vrfs),
                ),
            ],
        );

        card(
            frame,
            security,
            "Security",
            vec![
                stat(
                    "Firewall",
                    format!(
                        "{} active / {}",
                        summary.active_firewall_rules, summary.firewall_rules
                    ),
                ),
                stat_styled("Blocked", count_span(summary.blocked_devices, true)),
                stat_styled("VPN", status::flag(summary.vpn_enabled)),
            ],
        );

        let allocated = summary.qos_allocated_percent;
        let gauge_style = if allocated > 100 { theme::fail() } else { theme::ok() };
        let block = panel(" QoS ".to_owned(), false);
        let inner = block.inner(qos);
        frame.render_widget(block, qos);
        let [switch_area, label_area, gauge_area] = Layout::vertical([Constraint::Length(1); 3])
            .margin(1)
            .areas(inner);
        frame.render_widget(
            Paragraph::new(stat_styled("Enabled", status::flag(summary.qos_enabled))),
            switch_area,
        );
        frame.render_widget(Paragraph::new(stat("Allocated", format!("{allocated}%"))), label_area);
        frame.render_widget(
            Gauge::default()
                .gauge_style(gauge_style)
                .ratio(f64::from(allocated.min(100)) / 100.0)
                .label(""),
            gauge_area,
        );

        gauge_card(
            frame,
            cpu,
            "CPU",
            stat_styled(
                "Usage",
                Span::styled(
                    summary.cpu_usage.to_string(),
                    status::usage_style(summary.cpu_usage),
                ),
            ),
            summary.cpu_usage,
        );
        gauge_card(
            frame,
            memory,
            "Memory",
            stat_styled(
                "Usage",
                Span::styled(
                    summary.memory_usage.to_string(),
                    status::usage_style(summary.memory_usage),
                ),
            ),
            summary.memory_usage,
        );
        card(
            frame,
            health,
            "Health",
            vec![
                stat_styled("Link errors", status::errors(summary.interface_errors)),
                stat_styled("Log errors", count_span(summary.log_errors, true)),
                stat_styled(
                    "Log warnings",
                    Span::styled(summary.log_warnings.to_string(), theme::warn()),
                ),
            ],
        );
    }

    fn render_logs(frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let lines: Vec<Line> = console
            .logs()
            .recent()
            .take(RECENT_LOGS)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(format!("  {}  ", entry.timestamp), theme::label()),
                    Span::styled(
                        format!("{:<8}", entry.level.to_string().to_uppercase()),
                        status::level_style(entry.level),
                    ),
                    Span::styled(format!("{:<14}", entry.category), theme::value()),
                    Span::raw(entry.message.clone()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(panel(" Recent Logs ".to_owned(), false)),
            area,
        );
    }
}

impl Component for DashboardScreen {
    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole) {
        let summary = console.dashboard();
        let block = panel(format!(" {} ", summary.hostname), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [cards, logs] =
            Layout::vertical([Constraint::Length(18), Constraint::Min(4)]).areas(inner);
        Self::render_cards(frame, cards, &summary);
        Self::render_logs(frame, logs, console);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("1-9 0 m", "sections"), ("p", "running config")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{console, render_text};

    #[test]
    fn shows_hostname_and_cards() {
        let console = console();
        let text = render_text(&DashboardScreen::new(), &console);
        assert!(text.contains("Router"));
        assert!(text.contains("Interfaces"));
        assert!(text.contains("Recent Logs"));
        assert!(text.contains("Allocated"));
        assert!(text.contains("45.0%"));
        assert!(text.contains("75.6%"));
        assert!(text.contains("VPN"));
    }
}
