// ── Dashboard summary ──

use serde::Serialize;
use strum::IntoEnumIterator;

use super::Console;
use crate::model::{AccessState, LeaseKind, LogLevel, Permille, RoutingProtocol};
use crate::notify::NotificationSink;

/// Headline counts for the overview screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub hostname: String,
    pub interfaces_up: usize,
    pub interfaces_down: usize,
    /// Interfaces with no address, whatever their link state.
    pub interfaces_unconfigured: usize,
    pub dynamic_leases: usize,
    pub reserved_leases: usize,
    pub reservations: usize,
    pub dhcp_enabled: bool,
    pub enabled_protocols: Vec<RoutingProtocol>,
    pub static_routes: usize,
    pub vlans: usize,
    pub active_vrfs: usize,
    pub total_vrfs: usize,
    pub firewall_rules: usize,
    pub active_firewall_rules: usize,
    pub blocked_devices: usize,
    pub vpn_enabled: bool,
    pub qos_enabled: bool,
    pub qos_allocated_percent: u32,
    pub log_errors: usize,
    pub log_warnings: usize,
    pub cpu_usage: Permille,
    pub memory_usage: Permille,
    /// Input, output, CRC and collision counts across every interface.
    pub interface_errors: u64,
}

impl<S: NotificationSink> Console<S> {
    pub fn dashboard(&self) -> DashboardSummary {
        let interfaces = &self.interfaces.interfaces;
        let leases = &self.dhcp.leases;
        let logs = &self.logs.entries;
        let count_logs = |level: LogLevel| logs.iter().filter(|l| l.level == level).count();

        DashboardSummary {
            hostname: self.config.hostname.clone(),
            interfaces_up: interfaces.iter().filter(|i| i.is_up()).count(),
            interfaces_down: interfaces.iter().filter(|i| !i.is_up()).count(),
            interfaces_unconfigured: interfaces.iter().filter(|i| !i.has_address()).count(),
            dynamic_leases: self.dhcp.dynamic_leases(),
            reserved_leases: leases
                .iter()
                .filter(|l| l.kind == LeaseKind::Reserved)
                .count(),
            reservations: self.dhcp.reservations.len(),
            dhcp_enabled: self.dhcp.settings.enabled,
            enabled_protocols: RoutingProtocol::iter()
                .filter(|p| self.routing.protocols.is_enabled(*p))
                .collect(),
            static_routes: self.routing.static_routes.len(),
            vlans: self.vlans.vlans.len(),
            active_vrfs: self.vrfs.active(),
            total_vrfs: self.vrfs.vrfs.len(),
            firewall_rules: self.security.firewall.len(),
            active_firewall_rules: self
                .security
                .firewall
                .iter()
                .filter(|r| r.is_active())
                .count(),
            blocked_devices: self
                .security
                .access
                .iter()
                .filter(|a| a.access == AccessState::Blocked)
                .count(),
            vpn_enabled: self.security.vpn.enabled,
            qos_enabled: self.qos.settings.enabled,
            qos_allocated_percent: self.qos.allocated_percent(),
            log_errors: count_logs(LogLevel::Error),
            log_warnings: count_logs(LogLevel::Warning),
            cpu_usage: self.monitoring.resources.cpu.usage,
            memory_usage: self.monitoring.resources.memory.total.usage(),
            interface_errors: self.monitoring.total_errors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::console::Console;

    #[test]
    fn seeded_dashboard_counts() {
        let summary = Console::default().dashboard();
        assert_eq!(summary.interfaces_up, 4);
        assert_eq!(summary.interfaces_down, 1);
        assert_eq!(summary.interfaces_unconfigured, 1);
        assert_eq!(summary.dynamic_leases, 4);
        assert_eq!(summary.reserved_leases, 1);
        assert_eq!(summary.active_vrfs, 3);
        assert_eq!(summary.total_vrfs, 4);
        assert_eq!(summary.active_firewall_rules, 4);
        assert_eq!(summary.qos_allocated_percent, 100);
        assert_eq!(summary.log_errors, 2);
        assert!(summary.enabled_protocols.is_empty());
        assert!(!summary.vpn_enabled);
        assert!(summary.qos_enabled);
        assert_eq!(summary.cpu_usage.to_string(), "45.0%");
        assert_eq!(summary.memory_usage.to_string(), "75.6%");
        assert_eq!(summary.interface_errors, 3);
    }
}
