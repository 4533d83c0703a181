// ── Panel state ──
//
// One struct per console panel. The console hands these out by shared
// reference only; every write goes through `Console::execute` or
// `Console::commit_form`.

use crate::config::ValidationPolicy;
use crate::filter::{Category, RecordFilter};
use crate::model::{
    AccessControlEntry, ApplicationRule, BgpNeighbor, CommandHistoryEntry, CommandReference,
    DeviceLimit, DhcpLease, DhcpReservation, DhcpServerSettings, FirewallRule, InterfaceStats,
    LeaseKind, LinkStatus, LogEntry, NetworkInterface, OspfArea, QosSettings, RoutingProtocols,
    StaticRoute, SwitchPort, SystemResources, TrafficClass, Vlan, VpnSettings, Vrf,
};
use crate::seed;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct InterfacesPanel {
    pub interfaces: RecordStore<NetworkInterface>,
}

impl InterfacesPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            interfaces: RecordStore::seeded(policy, seed::interfaces()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DhcpPanel {
    pub settings: DhcpServerSettings,
    pub reservations: RecordStore<DhcpReservation>,
    pub leases: RecordStore<DhcpLease>,
}

impl DhcpPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            settings: seed::dhcp_settings(),
            reservations: RecordStore::seeded(policy, seed::reservations()),
            leases: RecordStore::seeded(policy, seed::leases()),
        }
    }

    pub fn dynamic_leases(&self) -> usize {
        self.leases
            .iter()
            .filter(|l| l.kind == LeaseKind::Dynamic)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct RoutingPanel {
    pub protocols: RoutingProtocols,
    pub static_routes: RecordStore<StaticRoute>,
    pub ospf_areas: RecordStore<OspfArea>,
    pub bgp_neighbors: RecordStore<BgpNeighbor>,
}

impl RoutingPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            protocols: seed::routing_protocols(),
            static_routes: RecordStore::seeded(policy, seed::static_routes()),
            ospf_areas: RecordStore::seeded(policy, seed::ospf_areas()),
            bgp_neighbors: RecordStore::seeded(policy, seed::bgp_neighbors()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VlanPanel {
    pub vlans: RecordStore<Vlan>,
    pub ports: RecordStore<SwitchPort>,
}

impl VlanPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            vlans: RecordStore::seeded(policy, seed::vlans()),
            ports: RecordStore::seeded(policy, seed::switch_ports()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VrfPanel {
    pub vrfs: RecordStore<Vrf>,
}

impl VrfPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            vrfs: RecordStore::seeded(policy, seed::vrfs()),
        }
    }

    pub fn active(&self) -> usize {
        self.vrfs.iter().filter(|v| v.is_active()).count()
    }
}

#[derive(Debug, Clone)]
pub struct SecurityPanel {
    pub firewall: RecordStore<FirewallRule>,
    pub access: RecordStore<AccessControlEntry>,
    pub vpn: VpnSettings,
}

impl SecurityPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            firewall: RecordStore::seeded(policy, seed::firewall_rules()),
            access: RecordStore::seeded(policy, seed::access_control()),
            vpn: seed::vpn_settings(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QosPanel {
    pub settings: QosSettings,
    pub classes: RecordStore<TrafficClass>,
    pub applications: RecordStore<ApplicationRule>,
    pub limits: RecordStore<DeviceLimit>,
}

impl QosPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            settings: seed::qos_settings(),
            classes: RecordStore::seeded(policy, seed::traffic_classes()),
            applications: RecordStore::seeded(policy, seed::application_rules()),
            limits: RecordStore::seeded(policy, seed::device_limits()),
        }
    }

    /// Sum of every class share. Over 100 means the classes are oversubscribed.
    pub fn allocated_percent(&self) -> u32 {
        self.classes
            .iter()
            .map(|c| u32::from(c.bandwidth_percent))
            .sum()
    }
}

/// Interface counters and system resources. Read-only apart from refresh.
#[derive(Debug, Clone)]
pub struct MonitoringPanel {
    pub interfaces: RecordStore<InterfaceStats>,
    pub resources: SystemResources,
}

impl MonitoringPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            interfaces: RecordStore::seeded(policy, seed::interface_stats()),
            resources: seed::system_resources(),
        }
    }

    /// Counters for one interface by exact name; `"all"` keeps every row.
    pub fn stats_for(&self, interface: impl Into<Category>) -> Vec<&InterfaceStats> {
        RecordFilter::new()
            .category(interface)
            .apply(self.interfaces.iter())
    }

    /// Monitored interface names, in display order.
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.iter().map(|s| s.interface.as_str())
    }

    pub fn interfaces_up(&self) -> usize {
        self.interfaces
            .iter()
            .filter(|s| s.status == LinkStatus::Up)
            .count()
    }

    pub fn total_errors(&self) -> u64 {
        self.interfaces.iter().map(InterfaceStats::total_errors).sum()
    }
}

/// Append-only log; listings are most recent first.
#[derive(Debug, Clone)]
pub struct LogsPanel {
    pub entries: RecordStore<LogEntry>,
}

impl LogsPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            entries: RecordStore::seeded(policy, seed::logs()),
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    /// Category and level filters apply together; newest first.
    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&LogEntry> {
        filter.apply(self.recent())
    }
}

#[derive(Debug, Clone)]
pub struct TerminalPanel {
    pub reference: RecordStore<CommandReference>,
    pub history: RecordStore<CommandHistoryEntry>,
    /// Screen contents after the last command.
    pub output: Vec<String>,
}

impl TerminalPanel {
    pub(crate) fn seeded(policy: ValidationPolicy) -> Self {
        Self {
            reference: RecordStore::seeded(policy, seed::command_reference()),
            history: RecordStore::seeded(policy, seed::command_history()),
            output: seed::terminal_banner(),
        }
    }

    pub fn recent_history(&self) -> impl Iterator<Item = &CommandHistoryEntry> {
        self.history.iter().rev()
    }
}
