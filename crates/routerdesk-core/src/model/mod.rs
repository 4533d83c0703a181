// ── Domain model ──
//
// One module per console panel. Every storable type implements `Record`
// (identity, validation, unique keys) and `Filterable` (search + facets).

pub mod common;
pub mod entity_id;

pub mod dhcp;
pub mod interface;
pub mod logs;
pub mod monitoring;
pub mod qos;
pub mod routing;
pub mod security;
pub mod terminal;
pub mod vlan;
pub mod vrf;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use routerdesk_core::model::*` gives you everything.

pub use common::{ActivityStatus, Priority, TwoState};
pub use entity_id::RecordId;

pub use dhcp::{DhcpLease, DhcpReservation, DhcpServerSettings, LeaseKind};
pub use interface::{Duplex, InterfaceKind, LinkStatus, NetworkInterface};
pub use logs::{LogEntry, LogLevel};
pub use monitoring::{
    Capacity, CpuUsage, InterfaceStats, MemoryPool, MemoryUsage, Permille, ProcessUsage,
    StorageUsage, SystemResources,
};
pub use qos::{ApplicationRule, DeviceLimit, QosSettings, QosUsage, TrafficClass};
pub use routing::{
    BgpNeighbor, BgpSettings, EigrpSettings, OspfArea, OspfAreaKind, OspfSettings, RipSettings,
    RoutingProtocol, RoutingProtocols, StaticRoute,
};
pub use security::{
    AccessControlEntry, AccessState, FirewallAction, FirewallProtocol, FirewallRule,
    VpnAuthentication, VpnEncryption, VpnProtocol, VpnSettings,
};
pub use terminal::{CommandHistoryEntry, CommandReference, CommandStatus};
pub use vlan::{PortMode, SwitchPort, Vlan};
pub use vrf::{RouteSource, Vrf, VrfRoute};
