// routerdesk-core: In-memory state, command routing and config previews for a simulated router.

pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod filter;
pub mod form;
pub mod model;
pub mod notify;
pub mod preview;
pub mod seed;
pub mod store;

mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::drafts::*;
pub use command::requests::*;
pub use command::{Command, CommandResult};
pub use config::{ConsoleConfig, DuplicatePolicy, ValidationPolicy};
pub use console::{Console, DashboardSummary, MonitoringPanel, StoreFor};
pub use error::CoreError;
pub use filter::{Category, Filterable, RecordFilter};
pub use form::{Draft, FieldSpec, FormController, FormMode};
pub use notify::{
    MemorySink, Notification, NotificationLevel, NotificationSink, NullSink, TracingSink,
};
pub use preview::CommandPreview;
pub use store::{Patch, Record, RecordStore};

pub use validate::split_list;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Interfaces / DHCP
    DhcpLease, DhcpReservation, DhcpServerSettings, Duplex, InterfaceKind, LeaseKind, LinkStatus,
    NetworkInterface,
    // Routing / VRF
    BgpNeighbor, OspfArea, OspfAreaKind, RouteSource, RoutingProtocol, RoutingProtocols,
    StaticRoute, Vrf, VrfRoute,
    // VLAN
    PortMode, SwitchPort, Vlan,
    // Security / QoS
    AccessControlEntry, AccessState, ApplicationRule, DeviceLimit, FirewallAction,
    FirewallProtocol, FirewallRule, QosSettings, QosUsage, TrafficClass, VpnAuthentication,
    VpnEncryption, VpnProtocol, VpnSettings,
    // Monitoring
    Capacity, CpuUsage, InterfaceStats, MemoryPool, MemoryUsage, Permille, ProcessUsage,
    StorageUsage, SystemResources,
    // Logs / terminal
    CommandHistoryEntry, CommandReference, CommandStatus, LogEntry, LogLevel,
    // Supporting types
    ActivityStatus, Priority, RecordId, TwoState,
};
