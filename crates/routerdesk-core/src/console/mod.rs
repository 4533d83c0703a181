// ── Console ──
//
// Application state for one router console session. Owns every panel,
// routes typed commands to the owning store, and reports each outcome to
// a notification sink. Synchronous: a command runs to completion before
// `execute` returns.

mod dashboard;
mod panels;
mod terminal;

use chrono::Local;
use tracing::{info, warn};

use crate::command::{Command, CommandResult};
use crate::config::{ConsoleConfig, ValidationPolicy};
use crate::error::CoreError;
use crate::form::{Draft, FormController, FormMode};
use crate::model::{
    BgpNeighbor, DeviceLimit, DhcpReservation, FirewallRule, LogEntry, NetworkInterface,
    OspfArea, RecordId, StaticRoute, SwitchPort, Vlan, Vrf,
};
use crate::notify::{MemorySink, Notification, NotificationSink};
use crate::preview::{self, CommandPreview};
use crate::store::{Patch, Record, RecordStore};

pub use dashboard::DashboardSummary;
pub use panels::{
    DhcpPanel, InterfacesPanel, LogsPanel, MonitoringPanel, QosPanel, RoutingPanel,
    SecurityPanel, TerminalPanel, VlanPanel, VrfPanel,
};
pub use terminal::KNOWN_SHOW_COMMANDS;

/// The console session.
///
/// Generic over its sink so callers that need the queued notifications
/// back (tests, the CLI shell) keep a typed `MemorySink`, while the TUI can
/// plug in a boxed sink that forwards to its event loop.
#[derive(Debug)]
pub struct Console<S: NotificationSink = MemorySink> {
    config: ConsoleConfig,
    sink: S,
    interfaces: InterfacesPanel,
    dhcp: DhcpPanel,
    routing: RoutingPanel,
    vlans: VlanPanel,
    vrfs: VrfPanel,
    security: SecurityPanel,
    qos: QosPanel,
    logs: LogsPanel,
    monitoring: MonitoringPanel,
    terminal: TerminalPanel,
    /// Bumped by every accepted command or form commit.
    revision: u64,
}

impl Console<MemorySink> {
    /// Seeded console that queues notifications in memory.
    pub fn in_memory(config: ConsoleConfig) -> Self {
        let sink = MemorySink::with_capacity(config.notification_capacity);
        Self::new(config, sink)
    }
}

impl Default for Console<MemorySink> {
    fn default() -> Self {
        Self::in_memory(ConsoleConfig::default())
    }
}

impl<S: NotificationSink> Console<S> {
    /// Build a console from seed data.
    pub fn new(config: ConsoleConfig, sink: S) -> Self {
        let policy = config.validation;
        Self {
            interfaces: InterfacesPanel::seeded(policy),
            dhcp: DhcpPanel::seeded(policy),
            routing: RoutingPanel::seeded(policy),
            vlans: VlanPanel::seeded(policy),
            vrfs: VrfPanel::seeded(policy),
            security: SecurityPanel::seeded(policy),
            qos: QosPanel::seeded(policy),
            logs: LogsPanel::seeded(policy),
            monitoring: MonitoringPanel::seeded(policy),
            terminal: TerminalPanel::seeded(policy),
            config,
            sink,
            revision: 0,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.config.validation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Changes whenever console state may have changed. Rejected commands
    /// leave it alone.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Panels ───────────────────────────────────────────────────────

    pub fn interfaces(&self) -> &InterfacesPanel {
        &self.interfaces
    }

    pub fn dhcp(&self) -> &DhcpPanel {
        &self.dhcp
    }

    pub fn routing(&self) -> &RoutingPanel {
        &self.routing
    }

    pub fn vlans(&self) -> &VlanPanel {
        &self.vlans
    }

    pub fn vrfs(&self) -> &VrfPanel {
        &self.vrfs
    }

    pub fn security(&self) -> &SecurityPanel {
        &self.security
    }

    pub fn qos(&self) -> &QosPanel {
        &self.qos
    }

    pub fn logs(&self) -> &LogsPanel {
        &self.logs
    }

    pub fn monitoring(&self) -> &MonitoringPanel {
        &self.monitoring
    }

    pub fn terminal(&self) -> &TerminalPanel {
        &self.terminal
    }

    // ── Command execution ────────────────────────────────────────────

    /// Run one command and notify the sink of the outcome.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CoreError> {
        let name = command.name();
        match self.route(command) {
            Ok((result, message)) => {
                self.revision += 1;
                info!(command = name, "{message}");
                self.sink.notify(Notification::success(message));
                Ok(result)
            }
            Err(err) => {
                warn!(command = name, error = %err, "command rejected");
                self.sink.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Commit a dialog draft into the store that owns its record type.
    pub fn commit_form<D>(&mut self, form: &mut FormController<D>) -> Result<D::Record, CoreError>
    where
        D: Draft,
        Self: StoreFor<D::Record>,
    {
        let verb = match form.mode() {
            FormMode::Create => "created",
            FormMode::Edit(_) => "updated",
        };
        match form.commit(<Self as StoreFor<D::Record>>::store_mut(self)) {
            Ok(record) => {
                self.revision += 1;
                let message = format!("{} '{}' {verb}", D::Record::KIND, record.label());
                info!(kind = D::Record::KIND, id = %record.id(), "{message}");
                self.sink.notify(Notification::success(message));
                Ok(record)
            }
            Err(err) => {
                warn!(kind = D::Record::KIND, error = %err, "form rejected");
                self.sink.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    // ── Preview ──────────────────────────────────────────────────────

    /// Every preview section, in the order a router would print them.
    pub fn running_config(&self) -> CommandPreview {
        let mut out = self.interface_preview();
        out.extend(self.vrf_preview());
        out.extend(self.routing_preview());
        out.extend(self.vlan_preview());
        out.extend(self.dhcp_preview());
        out.extend(self.firewall_preview());
        out
    }

    pub fn interface_preview(&self) -> CommandPreview {
        preview::interfaces(self.interfaces.interfaces.iter())
    }

    pub fn vrf_preview(&self) -> CommandPreview {
        preview::vrfs(self.vrfs.vrfs.iter())
    }

    pub fn routing_preview(&self) -> CommandPreview {
        preview::routing(
            &self.routing.protocols,
            self.routing.ospf_areas.iter(),
            self.routing.bgp_neighbors.iter(),
            self.routing.static_routes.iter(),
        )
    }

    pub fn vlan_preview(&self) -> CommandPreview {
        preview::vlans(self.vlans.vlans.iter(), self.vlans.ports.iter())
    }

    pub fn dhcp_preview(&self) -> CommandPreview {
        preview::dhcp(&self.dhcp.settings, self.dhcp.reservations.iter())
    }

    pub fn firewall_preview(&self) -> CommandPreview {
        preview::firewall(self.security.firewall.iter())
    }

    // ── Private helpers ──────────────────────────────────────────────

    #[allow(clippy::too_many_lines)]
    fn route(&mut self, command: Command) -> Result<(CommandResult, String), CoreError> {
        let strict = self.config.validation.strict;

        let outcome = match command {
            // ── Interfaces ───────────────────────────────────────────
            Command::UpdateInterface { id, update } => {
                let iface = self.interfaces.interfaces.update(id, update)?;
                (
                    CommandResult::Interface(iface.clone()),
                    updated(iface),
                )
            }
            Command::ToggleInterface { id } => {
                let iface = self.interfaces.interfaces.toggle(id, |i| &mut i.status)?;
                let message = format!("Interface {} is now {}", iface.name, iface.status);
                (CommandResult::Interface(iface.clone()), message)
            }

            // ── DHCP ─────────────────────────────────────────────────
            Command::UpdateDhcpSettings(update) => {
                let mut next = self.dhcp.settings.clone();
                update.apply_to(&mut next);
                next.validate(strict)?;
                self.dhcp.settings = next;
                (
                    CommandResult::DhcpSettings(self.dhcp.settings.clone()),
                    "DHCP server settings saved".to_owned(),
                )
            }
            Command::CreateReservation(draft) => {
                let record = create(&mut self.dhcp.reservations, draft)?;
                let message = created(&record);
                (CommandResult::Reservation(record), message)
            }
            Command::UpdateReservation { id, update } => {
                let record = self.dhcp.reservations.update(id, update)?;
                (CommandResult::Reservation(record.clone()), updated(record))
            }
            Command::DeleteReservation { id } => remove(&mut self.dhcp.reservations, id)?,
            Command::ReleaseLease { ip } => {
                let ip = ip.trim();
                let released = self.dhcp.leases.remove_where(|l| l.ip == ip);
                if released.is_empty() {
                    return Err(CoreError::not_found("DHCP lease", ip));
                }
                let message = format!("Lease for {ip} released");
                (CommandResult::Released(released), message)
            }

            // ── Routing ──────────────────────────────────────────────
            Command::UpdateProtocol(update) => {
                let protocol = update.protocol;
                let mut next = self.routing.protocols.clone();
                update.apply(&mut next)?;
                next.validate(strict)?;
                self.routing.protocols = next;
                let state = if self.routing.protocols.is_enabled(protocol) {
                    "enabled"
                } else {
                    "disabled"
                };
                (
                    CommandResult::Protocols(self.routing.protocols.clone()),
                    format!("{} settings saved ({state})", protocol.to_string().to_uppercase()),
                )
            }
            Command::CreateStaticRoute(draft) => {
                let record = create(&mut self.routing.static_routes, draft)?;
                let message = created(&record);
                (CommandResult::StaticRoute(record), message)
            }
            Command::UpdateStaticRoute { id, update } => {
                let record = self.routing.static_routes.update(id, update)?;
                (CommandResult::StaticRoute(record.clone()), updated(record))
            }
            Command::DeleteStaticRoute { id } => remove(&mut self.routing.static_routes, id)?,
            Command::CreateOspfArea(draft) => {
                let record = create(&mut self.routing.ospf_areas, draft)?;
                let message = created(&record);
                (CommandResult::OspfArea(record), message)
            }
            Command::DeleteOspfArea { id } => remove(&mut self.routing.ospf_areas, id)?,
            Command::CreateBgpNeighbor(draft) => {
                let record = create(&mut self.routing.bgp_neighbors, draft)?;
                let message = created(&record);
                (CommandResult::BgpNeighbor(record), message)
            }
            Command::DeleteBgpNeighbor { id } => remove(&mut self.routing.bgp_neighbors, id)?,

            // ── VLANs ────────────────────────────────────────────────
            Command::CreateVlan(draft) => {
                let record = create(&mut self.vlans.vlans, draft)?;
                let message = created(&record);
                (CommandResult::Vlan(record), message)
            }
            Command::UpdateVlan { id, update } => {
                let record = self.vlans.vlans.update(id, update)?;
                (CommandResult::Vlan(record.clone()), updated(record))
            }
            Command::DeleteVlan { id } => remove(&mut self.vlans.vlans, id)?,
            Command::UpdateSwitchPort { id, update } => {
                let record = self.vlans.ports.update(id, update)?;
                (CommandResult::SwitchPort(record.clone()), updated(record))
            }

            // ── VRFs ─────────────────────────────────────────────────
            Command::CreateVrf(draft) => {
                let record = create(&mut self.vrfs.vrfs, draft)?;
                let message = created(&record);
                (CommandResult::Vrf(record), message)
            }
            Command::UpdateVrf { id, update } => {
                let record = self.vrfs.vrfs.update(id, update)?;
                (CommandResult::Vrf(record.clone()), updated(record))
            }
            Command::DeleteVrf { id } => remove(&mut self.vrfs.vrfs, id)?,
            Command::ToggleVrf { id } => {
                let vrf = self.vrfs.vrfs.toggle(id, |v| &mut v.status)?;
                let message = format!("VRF {} is now {}", vrf.name, vrf.status);
                (CommandResult::Vrf(vrf.clone()), message)
            }
            Command::AssignVrfInterface { id, interface } => {
                let interface = interface.trim().to_owned();
                let vrf = self.vrfs.vrfs.update_with(id, |vrf| {
                    if interface.is_empty() {
                        return Err(CoreError::required("interface"));
                    }
                    if vrf.interfaces.contains(&interface) {
                        return Err(CoreError::Conflict {
                            entity_type: Vrf::KIND.into(),
                            field: "interface".into(),
                            value: interface.clone(),
                        });
                    }
                    vrf.interfaces.push(interface.clone());
                    Ok(())
                })?;
                let message = format!("{interface} assigned to VRF {}", vrf.name);
                (CommandResult::Vrf(vrf.clone()), message)
            }
            Command::UnassignVrfInterface { id, interface } => {
                let interface = interface.trim().to_owned();
                let vrf = self.vrfs.vrfs.update_with(id, |vrf| {
                    let before = vrf.interfaces.len();
                    vrf.interfaces.retain(|i| *i != interface);
                    if vrf.interfaces.len() == before {
                        return Err(CoreError::not_found("VRF interface", &interface));
                    }
                    Ok(())
                })?;
                let message = format!("{interface} removed from VRF {}", vrf.name);
                (CommandResult::Vrf(vrf.clone()), message)
            }

            // ── Security ─────────────────────────────────────────────
            Command::CreateFirewallRule(draft) => {
                let record = create(&mut self.security.firewall, draft)?;
                let message = created(&record);
                (CommandResult::FirewallRule(record), message)
            }
            Command::UpdateFirewallRule { id, update } => {
                let record = self.security.firewall.update(id, update)?;
                (CommandResult::FirewallRule(record.clone()), updated(record))
            }
            Command::DeleteFirewallRule { id } => remove(&mut self.security.firewall, id)?,
            Command::ToggleFirewallRule { id } => {
                let rule = self.security.firewall.toggle(id, |r| &mut r.status)?;
                let message = format!("Firewall rule '{}' is now {}", rule.name, rule.status);
                (CommandResult::FirewallRule(rule.clone()), message)
            }
            Command::ToggleAccess { id } => {
                let entry = self.security.access.toggle(id, |a| &mut a.access)?;
                let message = format!("{} access is now {}", entry.device, entry.access);
                (CommandResult::AccessEntry(entry.clone()), message)
            }
            Command::ToggleParentalControl { id } => {
                let entry = self
                    .security
                    .access
                    .toggle(id, |a| &mut a.parental_control)?;
                let state = if entry.parental_control { "on" } else { "off" };
                let message = format!("Parental control for {} turned {state}", entry.device);
                (CommandResult::AccessEntry(entry.clone()), message)
            }
            Command::UpdateVpnSettings(update) => {
                let mut next = self.security.vpn.clone();
                update.apply_to(&mut next);
                next.validate(strict)?;
                self.security.vpn = next;
                let vpn = &self.security.vpn;
                let message = if vpn.enabled {
                    format!("VPN settings saved ({} on port {})", vpn.protocol, vpn.port)
                } else {
                    "VPN settings saved (disabled)".to_owned()
                };
                (CommandResult::VpnSettings(vpn.clone()), message)
            }

            // ── QoS ──────────────────────────────────────────────────
            Command::UpdateQosSettings(update) => {
                let mut next = self.qos.settings.clone();
                update.apply_to(&mut next);
                next.validate(strict)?;
                self.qos.settings = next;
                let state = if self.qos.settings.enabled {
                    "enabled"
                } else {
                    "disabled"
                };
                (
                    CommandResult::QosSettings(self.qos.settings.clone()),
                    format!("QoS settings saved ({state})"),
                )
            }
            Command::SetTrafficClassBandwidth { id, percent } => {
                if percent > 100 {
                    return Err(CoreError::validation(
                        "bandwidth_percent",
                        format!("{percent} is above 100"),
                    ));
                }
                let class = self.qos.classes.update_with(id, |c| {
                    c.bandwidth_percent = percent;
                    Ok(())
                })?;
                let message = format!("{} set to {}% bandwidth", class.name, class.bandwidth_percent);
                (CommandResult::TrafficClass(class.clone()), message)
            }
            Command::ToggleApplicationRule { id } => {
                let rule = self.qos.applications.toggle(id, |r| &mut r.status)?;
                let message = format!("QoS rule for {} is now {}", rule.name, rule.status);
                (CommandResult::ApplicationRule(rule.clone()), message)
            }
            Command::UpdateDeviceLimit { id, update } => {
                let record = self.qos.limits.update(id, update)?;
                (CommandResult::DeviceLimit(record.clone()), updated(record))
            }

            // ── Logs ─────────────────────────────────────────────────
            Command::AppendLog(request) => {
                let entry = self.logs.entries.add(LogEntry {
                    id: RecordId::default(),
                    timestamp: now(),
                    level: request.level,
                    category: request.category,
                    source: request.source,
                    message: request.message,
                    details: request.details,
                })?;
                let message = format!("Logged: {}", entry.message);
                (CommandResult::Log(entry.clone()), message)
            }
            Command::ClearLogs => {
                let count = self.logs.entries.len();
                self.logs.entries.clear();
                (CommandResult::Ok, format!("{count} log entries cleared"))
            }
            Command::ExportLogs(filter) => {
                let entries: Vec<LogEntry> =
                    self.logs.filtered(&filter).into_iter().cloned().collect();
                let message = format!("{} log entries exported", entries.len());
                (CommandResult::Exported(entries), message)
            }

            // ── Monitoring ───────────────────────────────────────────
            Command::RefreshMonitoring => {
                self.monitoring.resources.sampled_at = now();
                (
                    CommandResult::Monitoring(self.monitoring.resources.clone()),
                    "Monitoring data refreshed".to_owned(),
                )
            }

            // ── Terminal ─────────────────────────────────────────────
            Command::RunCommand { line } => {
                let output = self.run_command(&line)?;
                (
                    CommandResult::Terminal(output),
                    "Command executed successfully".to_owned(),
                )
            }
        };
        Ok(outcome)
    }
}

// ── Form routing ────────────────────────────────────────────────────

/// Gives `commit_form` the store that owns records of type `T`.
pub trait StoreFor<T: Record> {
    fn store_mut(&mut self) -> &mut RecordStore<T>;
}

macro_rules! store_for {
    ($($ty:ty => $panel:ident . $field:ident),+ $(,)?) => {
        $(
            impl<S: NotificationSink> StoreFor<$ty> for Console<S> {
                fn store_mut(&mut self) -> &mut RecordStore<$ty> {
                    &mut self.$panel.$field
                }
            }
        )+
    };
}

store_for! {
    NetworkInterface => interfaces.interfaces,
    DhcpReservation => dhcp.reservations,
    StaticRoute => routing.static_routes,
    OspfArea => routing.ospf_areas,
    BgpNeighbor => routing.bgp_neighbors,
    Vlan => vlans.vlans,
    SwitchPort => vlans.ports,
    Vrf => vrfs.vrfs,
    FirewallRule => security.firewall,
    DeviceLimit => qos.limits,
}

// ── Helpers ─────────────────────────────────────────────────────────

fn create<D: Draft>(store: &mut RecordStore<D::Record>, draft: D) -> Result<D::Record, CoreError> {
    FormController::with_draft(draft).commit(store)
}

fn remove<T: Record>(
    store: &mut RecordStore<T>,
    id: RecordId,
) -> Result<(CommandResult, String), CoreError> {
    let record = store.remove(id)?;
    let label = record.label();
    let message = format!("{} '{label}' deleted", T::KIND);
    Ok((
        CommandResult::Removed {
            entity_type: T::KIND,
            id,
            label,
        },
        message,
    ))
}

fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn created<T: Record>(record: &T) -> String {
    format!("{} '{}' created", T::KIND, record.label())
}

fn updated<T: Record>(record: &T) -> String {
    format!("{} '{}' updated", T::KIND, record.label())
}

