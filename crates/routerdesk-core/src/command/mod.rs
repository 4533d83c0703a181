// ── Command API ──
//
// Every write operation flows through a unified `Command` enum. The
// console routes each variant to the owning panel's store and emits one
// notification per command.

pub mod drafts;
pub mod requests;

use strum::IntoStaticStr;

use crate::filter::RecordFilter;
use crate::model::{
    AccessControlEntry, ApplicationRule, BgpNeighbor, DeviceLimit, DhcpLease, DhcpReservation,
    DhcpServerSettings, FirewallRule, LogEntry, NetworkInterface, OspfArea, QosSettings, RecordId,
    RoutingProtocols, StaticRoute, SwitchPort, SystemResources, TrafficClass, Vlan, VpnSettings,
    Vrf,
};

pub use drafts::{
    CreateBgpNeighborRequest, CreateFirewallRuleRequest, CreateOspfAreaRequest,
    CreateReservationRequest, CreateStaticRouteRequest, CreateVlanRequest, CreateVrfRequest,
    DeviceLimitForm, InterfaceForm, SwitchPortForm,
};
pub use requests::{
    AppendLogRequest, UpdateDeviceLimitRequest, UpdateDhcpSettingsRequest,
    UpdateFirewallRuleRequest, UpdateInterfaceRequest, UpdateProtocolRequest,
    UpdateQosSettingsRequest, UpdateReservationRequest, UpdateStaticRouteRequest,
    UpdateSwitchPortRequest, UpdateVlanRequest, UpdateVpnSettingsRequest, UpdateVrfRequest,
};

/// All possible write operations against the console.
#[derive(Debug, Clone, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    // ── Interfaces ───────────────────────────────────────────────────
    UpdateInterface {
        id: RecordId,
        update: UpdateInterfaceRequest,
    },
    ToggleInterface {
        id: RecordId,
    },

    // ── DHCP ─────────────────────────────────────────────────────────
    UpdateDhcpSettings(UpdateDhcpSettingsRequest),
    CreateReservation(CreateReservationRequest),
    UpdateReservation {
        id: RecordId,
        update: UpdateReservationRequest,
    },
    DeleteReservation {
        id: RecordId,
    },
    /// Drop every active lease for this address.
    ReleaseLease {
        ip: String,
    },

    // ── Routing ──────────────────────────────────────────────────────
    UpdateProtocol(UpdateProtocolRequest),
    CreateStaticRoute(CreateStaticRouteRequest),
    UpdateStaticRoute {
        id: RecordId,
        update: UpdateStaticRouteRequest,
    },
    DeleteStaticRoute {
        id: RecordId,
    },
    CreateOspfArea(CreateOspfAreaRequest),
    DeleteOspfArea {
        id: RecordId,
    },
    CreateBgpNeighbor(CreateBgpNeighborRequest),
    DeleteBgpNeighbor {
        id: RecordId,
    },

    // ── VLANs ────────────────────────────────────────────────────────
    CreateVlan(CreateVlanRequest),
    UpdateVlan {
        id: RecordId,
        update: UpdateVlanRequest,
    },
    DeleteVlan {
        id: RecordId,
    },
    UpdateSwitchPort {
        id: RecordId,
        update: UpdateSwitchPortRequest,
    },

    // ── VRFs ─────────────────────────────────────────────────────────
    CreateVrf(CreateVrfRequest),
    UpdateVrf {
        id: RecordId,
        update: UpdateVrfRequest,
    },
    DeleteVrf {
        id: RecordId,
    },
    ToggleVrf {
        id: RecordId,
    },
    AssignVrfInterface {
        id: RecordId,
        interface: String,
    },
    UnassignVrfInterface {
        id: RecordId,
        interface: String,
    },

    // ── Security ─────────────────────────────────────────────────────
    CreateFirewallRule(CreateFirewallRuleRequest),
    UpdateFirewallRule {
        id: RecordId,
        update: UpdateFirewallRuleRequest,
    },
    DeleteFirewallRule {
        id: RecordId,
    },
    ToggleFirewallRule {
        id: RecordId,
    },
    ToggleAccess {
        id: RecordId,
    },
    ToggleParentalControl {
        id: RecordId,
    },
    UpdateVpnSettings(UpdateVpnSettingsRequest),

    // ── QoS ──────────────────────────────────────────────────────────
    UpdateQosSettings(UpdateQosSettingsRequest),
    SetTrafficClassBandwidth {
        id: RecordId,
        percent: u8,
    },
    ToggleApplicationRule {
        id: RecordId,
    },
    UpdateDeviceLimit {
        id: RecordId,
        update: UpdateDeviceLimitRequest,
    },

    // ── Logs ─────────────────────────────────────────────────────────
    AppendLog(AppendLogRequest),
    ClearLogs,
    /// Snapshot of the entries the filter keeps, newest first.
    ExportLogs(RecordFilter),

    // ── Monitoring ───────────────────────────────────────────────────
    /// Restamp the resource snapshot.
    RefreshMonitoring,

    // ── Terminal ─────────────────────────────────────────────────────
    RunCommand {
        line: String,
    },
}

impl Command {
    /// Stable snake_case name, used in logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok,
    Interface(NetworkInterface),
    DhcpSettings(DhcpServerSettings),
    Reservation(DhcpReservation),
    Released(Vec<DhcpLease>),
    Protocols(RoutingProtocols),
    StaticRoute(StaticRoute),
    OspfArea(OspfArea),
    BgpNeighbor(BgpNeighbor),
    Vlan(Vlan),
    SwitchPort(SwitchPort),
    Vrf(Vrf),
    FirewallRule(FirewallRule),
    AccessEntry(AccessControlEntry),
    VpnSettings(VpnSettings),
    QosSettings(QosSettings),
    TrafficClass(TrafficClass),
    ApplicationRule(ApplicationRule),
    DeviceLimit(DeviceLimit),
    Log(LogEntry),
    Exported(Vec<LogEntry>),
    Monitoring(SystemResources),
    Removed {
        entity_type: &'static str,
        id: RecordId,
        label: String,
    },
    /// Lines printed by the simulated terminal.
    Terminal(Vec<String>),
}
