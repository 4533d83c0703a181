//! Dialog sessions behind the form overlay.
//!
//! Record dialogs are plain [`FormController`]s committed through
//! `Console::commit_form`. Settings-style dialogs (DHCP server, VPN, QoS,
//! protocol processes, bandwidth shares, VRF interfaces, log entries) have
//! no draft type in the core; they collect text and build a [`Command`].

use std::str::FromStr;

use routerdesk_core::{
    AppendLogRequest, Command, CoreError, CreateBgpNeighborRequest, CreateFirewallRuleRequest,
    CreateOspfAreaRequest, CreateReservationRequest, CreateStaticRouteRequest, CreateVlanRequest,
    CreateVrfRequest, DeviceLimitForm, Draft, FieldSpec, FormController, FormMode,
    InterfaceForm, LogLevel, Record, RecordId, RoutingProtocol, StoreFor, SwitchPortForm,
    UpdateDhcpSettingsRequest, UpdateProtocolRequest, UpdateQosSettingsRequest,
    UpdateVpnSettingsRequest,
};

use crate::action::{FormRequest, RecordKind};
use crate::console_bridge::RouterConsole;

/// One open dialog, independent of the record type behind it.
pub trait FormSession: Send {
    fn title(&self) -> String;

    fn fields(&self) -> &'static [FieldSpec];

    fn value(&self, name: &str) -> String;

    /// Store one field. Typed fields are checked here.
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError>;

    /// Write the dialog to the console. On error the dialog stays open.
    fn submit(&mut self, console: &mut RouterConsole) -> Result<(), CoreError>;
}

impl<D> FormSession for FormController<D>
where
    D: Draft + Send,
    RouterConsole: StoreFor<D::Record>,
{
    fn title(&self) -> String {
        match self.mode() {
            FormMode::Create => format!("New {}", D::Record::KIND),
            FormMode::Edit(id) => format!("Edit {} #{id}", D::Record::KIND),
        }
    }

    fn fields(&self) -> &'static [FieldSpec] {
        D::FIELDS
    }

    fn value(&self, name: &str) -> String {
        FormController::value(self, name).to_owned()
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        FormController::set_field(self, name, value)
    }

    fn submit(&mut self, console: &mut RouterConsole) -> Result<(), CoreError> {
        console.commit_form(self).map(|_| ())
    }
}

// ── Command-backed dialogs ──────────────────────────────────────────

/// Text typed into a [`CommandForm`], keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FieldValues(Vec<(&'static str, String)>);

impl FieldValues {
    fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(field, _)| *field == name)
            .map_or("", |(_, value)| value.as_str())
    }

    /// Trimmed text, `None` when blank.
    fn text(&self, name: &str) -> Option<String> {
        let value = self.get(name).trim();
        (!value.is_empty()).then(|| value.to_owned())
    }

    fn number<N: FromStr>(&self, name: &str) -> Result<Option<N>, CoreError> {
        self.text(name)
            .map(|raw| {
                raw.parse::<N>().map_err(|_| CoreError::Validation {
                    field: name.to_owned(),
                    reason: format!("'{raw}' is not a valid number"),
                })
            })
            .transpose()
    }

    fn choice<T: FromStr>(&self, name: &str) -> Result<Option<T>, CoreError> {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| CoreError::Validation {
                    field: name.to_owned(),
                    reason: format!("'{raw}' is not a known option"),
                })
            })
            .transpose()
    }

    fn flag(&self, name: &str) -> Result<Option<bool>, CoreError> {
        self.text(name)
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "yes" | "true" | "on" => Ok(true),
                "no" | "false" | "off" => Ok(false),
                _ => Err(CoreError::Validation {
                    field: name.to_owned(),
                    reason: format!("'{raw}' is not yes or no"),
                }),
            })
            .transpose()
    }

    fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }
}

type BuildCommand = Box<dyn Fn(&FieldValues) -> Result<Command, CoreError> + Send>;

/// A dialog that turns its fields into one console command.
pub struct CommandForm {
    title: String,
    fields: &'static [FieldSpec],
    values: FieldValues,
    build: BuildCommand,
}

impl CommandForm {
    fn new(
        title: impl Into<String>,
        fields: &'static [FieldSpec],
        build: impl Fn(&FieldValues) -> Result<Command, CoreError> + Send + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            fields,
            values: FieldValues::default(),
            build: Box::new(build),
        }
    }

    fn prefill(mut self, name: &'static str, value: impl ToString) -> Self {
        self.values.set(name, value.to_string());
        self
    }

    fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

impl FormSession for CommandForm {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    fn value(&self, name: &str) -> String {
        self.values.get(name).to_owned()
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        let Some(spec) = self.spec(name) else {
            return Err(CoreError::UnknownField {
                entity_type: self.title.clone(),
                field: name.to_owned(),
            });
        };
        let trimmed = value.trim();
        if !spec.choices.is_empty()
            && !trimmed.is_empty()
            && !spec.choices.iter().any(|c| c.eq_ignore_ascii_case(trimmed))
        {
            return Err(CoreError::Validation {
                field: spec.name.to_owned(),
                reason: format!("expected one of {}", spec.choices.join(", ")),
            });
        }
        self.values.set(spec.name, value);
        Ok(())
    }

    fn submit(&mut self, console: &mut RouterConsole) -> Result<(), CoreError> {
        for spec in self.fields.iter().filter(|s| s.required) {
            if self.values.text(spec.name).is_none() {
                return Err(CoreError::Validation {
                    field: spec.name.to_owned(),
                    reason: "a value is required".to_owned(),
                });
            }
        }
        let command = (self.build)(&self.values)?;
        console.execute(command).map(|_| ())
    }
}

// ── Field sets ──────────────────────────────────────────────────────

const YES_NO: &[&str] = &["yes", "no"];

const DHCP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "Server enabled").choices(YES_NO),
    FieldSpec::text("pool_start", "Pool start").required(),
    FieldSpec::text("pool_end", "Pool end").required(),
    FieldSpec::text("lease_hours", "Lease time (hours)").required(),
    FieldSpec::text("gateway", "Default gateway"),
    FieldSpec::text("dns_primary", "Primary DNS"),
    FieldSpec::text("dns_secondary", "Secondary DNS"),
];

const VPN_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "Server enabled").choices(YES_NO),
    FieldSpec::text("protocol", "Protocol").choices(&[
        "OpenVPN",
        "WireGuard",
        "L2TP/IPSec",
        "PPTP",
    ]),
    FieldSpec::text("port", "Port").required(),
    FieldSpec::text("encryption", "Encryption").choices(&["AES-256", "AES-128", "ChaCha20"]),
    FieldSpec::text("authentication", "Authentication").choices(&["SHA-256", "SHA-1", "MD5"]),
];

const QOS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "QoS enabled").choices(YES_NO),
    FieldSpec::text("total_bandwidth_mbps", "Total bandwidth (Mbps)").required(),
];

const OSPF_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "Enabled").choices(YES_NO),
    FieldSpec::text("process_id", "Process ID").required(),
    FieldSpec::text("router_id", "Router ID"),
];

const EIGRP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "Enabled").choices(YES_NO),
    FieldSpec::text("asn", "Autonomous system").required(),
];

const BGP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "Enabled").choices(YES_NO),
    FieldSpec::text("asn", "Local AS").required(),
    FieldSpec::text("router_id", "Router ID"),
];

const RIP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("enabled", "Enabled").choices(YES_NO),
    FieldSpec::text("version", "Version").choices(&["1", "2"]),
];

const BANDWIDTH_FIELDS: &[FieldSpec] =
    &[FieldSpec::text("bandwidth_percent", "Bandwidth (%)").required()];

const INTERFACE_FIELDS: &[FieldSpec] = &[FieldSpec::text("interface", "Interface").required()];

const LOG_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("level", "Level").choices(&["info", "warning", "error", "debug"]),
    FieldSpec::text("category", "Category").required(),
    FieldSpec::text("source", "Source"),
    FieldSpec::text("message", "Message").required(),
    FieldSpec::text("details", "Details"),
];

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// ── Opening dialogs ─────────────────────────────────────────────────

/// Build the session for `request`, reading current values from `console`.
pub fn open(
    request: FormRequest,
    console: &RouterConsole,
) -> Result<Box<dyn FormSession>, CoreError> {
    let session: Box<dyn FormSession> = match request {
        FormRequest::Create(kind) => create(kind)?,
        FormRequest::Edit(kind, id) => edit(kind, id, console)?,
        FormRequest::DhcpSettings => Box::new(dhcp_settings(console)),
        FormRequest::VpnSettings => Box::new(vpn_settings(console)),
        FormRequest::QosSettings => Box::new(qos_settings(console)),
        FormRequest::Protocol(protocol) => Box::new(protocol_settings(console, protocol)),
        FormRequest::Bandwidth(id) => {
            let class = console.qos().classes.require(id)?;
            Box::new(
                CommandForm::new(format!("Bandwidth: {}", class.name), BANDWIDTH_FIELDS, move |v| {
                    Ok(Command::SetTrafficClassBandwidth {
                        id,
                        percent: v.number("bandwidth_percent")?.unwrap_or_default(),
                    })
                })
                .prefill("bandwidth_percent", class.bandwidth_percent),
            )
        }
        FormRequest::AssignInterface(id) => {
            let vrf = console.vrfs().vrfs.require(id)?;
            Box::new(CommandForm::new(
                format!("Assign interface to {}", vrf.name),
                INTERFACE_FIELDS,
                move |v| {
                    Ok(Command::AssignVrfInterface {
                        id,
                        interface: v.get("interface").to_owned(),
                    })
                },
            ))
        }
        FormRequest::UnassignInterface(id) => {
            let vrf = console.vrfs().vrfs.require(id)?;
            let first = vrf.interfaces.first().cloned().unwrap_or_default();
            Box::new(
                CommandForm::new(
                    format!("Remove interface from {}", vrf.name),
                    INTERFACE_FIELDS,
                    move |v| {
                        Ok(Command::UnassignVrfInterface {
                            id,
                            interface: v.get("interface").to_owned(),
                        })
                    },
                )
                .prefill("interface", first),
            )
        }
        FormRequest::AppendLog => Box::new(
            CommandForm::new("New log entry", LOG_FIELDS, |v| {
                let level = match v.text("level") {
                    Some(raw) => LogLevel::from_str(&raw).map_err(|_| CoreError::Validation {
                        field: "level".to_owned(),
                        reason: format!("'{raw}' is not a log level"),
                    })?,
                    None => LogLevel::default(),
                };
                Ok(Command::AppendLog(AppendLogRequest {
                    level,
                    category: v.text("category").unwrap_or_default(),
                    source: v.text("source").unwrap_or_else(|| "console".to_owned()),
                    message: v.text("message").unwrap_or_default(),
                    details: v.text("details").unwrap_or_default(),
                }))
            })
            .prefill("level", LogLevel::Info),
        ),
    };
    Ok(session)
}

fn create(kind: RecordKind) -> Result<Box<dyn FormSession>, CoreError> {
    let session: Box<dyn FormSession> = match kind {
        RecordKind::Reservation => Box::new(FormController::<CreateReservationRequest>::create()),
        RecordKind::StaticRoute => Box::new(FormController::<CreateStaticRouteRequest>::create()),
        RecordKind::OspfArea => Box::new(FormController::<CreateOspfAreaRequest>::create()),
        RecordKind::BgpNeighbor => Box::new(FormController::<CreateBgpNeighborRequest>::create()),
        RecordKind::Vlan => Box::new(FormController::<CreateVlanRequest>::create()),
        RecordKind::Vrf => Box::new(FormController::<CreateVrfRequest>::create()),
        RecordKind::FirewallRule => {
            Box::new(FormController::<CreateFirewallRuleRequest>::create())
        }
        RecordKind::Interface | RecordKind::SwitchPort | RecordKind::DeviceLimit => {
            return Err(CoreError::Validation {
                field: format!("{kind:?}"),
                reason: "records of this kind can only be edited".to_owned(),
            });
        }
    };
    Ok(session)
}

fn edit(
    kind: RecordKind,
    id: RecordId,
    console: &RouterConsole,
) -> Result<Box<dyn FormSession>, CoreError> {
    let session: Box<dyn FormSession> = match kind {
        RecordKind::Interface => Box::new(FormController::<InterfaceForm>::edit(
            &console.interfaces().interfaces,
            id,
        )?),
        RecordKind::Reservation => Box::new(FormController::<CreateReservationRequest>::edit(
            &console.dhcp().reservations,
            id,
        )?),
        RecordKind::StaticRoute => Box::new(FormController::<CreateStaticRouteRequest>::edit(
            &console.routing().static_routes,
            id,
        )?),
        RecordKind::OspfArea => Box::new(FormController::<CreateOspfAreaRequest>::edit(
            &console.routing().ospf_areas,
            id,
        )?),
        RecordKind::BgpNeighbor => Box::new(FormController::<CreateBgpNeighborRequest>::edit(
            &console.routing().bgp_neighbors,
            id,
        )?),
        RecordKind::Vlan => Box::new(FormController::<CreateVlanRequest>::edit(
            &console.vlans().vlans,
            id,
        )?),
        RecordKind::SwitchPort => Box::new(FormController::<SwitchPortForm>::edit(
            &console.vlans().ports,
            id,
        )?),
        RecordKind::Vrf => Box::new(FormController::<CreateVrfRequest>::edit(
            &console.vrfs().vrfs,
            id,
        )?),
        RecordKind::FirewallRule => Box::new(FormController::<CreateFirewallRuleRequest>::edit(
            &console.security().firewall,
            id,
        )?),
        RecordKind::DeviceLimit => Box::new(FormController::<DeviceLimitForm>::edit(
            &console.qos().limits,
            id,
        )?),
    };
    Ok(session)
}

fn dhcp_settings(console: &RouterConsole) -> CommandForm {
    let current = &console.dhcp().settings;
    CommandForm::new("DHCP server", DHCP_FIELDS, |v| {
        Ok(Command::UpdateDhcpSettings(UpdateDhcpSettingsRequest {
            enabled: v.flag("enabled")?,
            pool_start: v.text("pool_start"),
            pool_end: v.text("pool_end"),
            lease_hours: v.number("lease_hours")?,
            gateway: v.text("gateway"),
            dns_primary: v.text("dns_primary"),
            dns_secondary: v.text("dns_secondary"),
        }))
    })
    .prefill("enabled", yes_no(current.enabled))
    .prefill("pool_start", &current.pool_start)
    .prefill("pool_end", &current.pool_end)
    .prefill("lease_hours", current.lease_hours)
    .prefill("gateway", &current.gateway)
    .prefill("dns_primary", &current.dns_primary)
    .prefill("dns_secondary", &current.dns_secondary)
}

fn vpn_settings(console: &RouterConsole) -> CommandForm {
    let current = &console.security().vpn;
    CommandForm::new("VPN server", VPN_FIELDS, |v| {
        Ok(Command::UpdateVpnSettings(UpdateVpnSettingsRequest {
            enabled: v.flag("enabled")?,
            protocol: v.choice("protocol")?,
            port: v.number("port")?,
            encryption: v.choice("encryption")?,
            authentication: v.choice("authentication")?,
        }))
    })
    .prefill("enabled", yes_no(current.enabled))
    .prefill("protocol", current.protocol)
    .prefill("port", current.port)
    .prefill("encryption", current.encryption)
    .prefill("authentication", current.authentication)
}

fn qos_settings(console: &RouterConsole) -> CommandForm {
    let current = &console.qos().settings;
    CommandForm::new("QoS", QOS_FIELDS, |v| {
        Ok(Command::UpdateQosSettings(UpdateQosSettingsRequest {
            enabled: v.flag("enabled")?,
            total_bandwidth_mbps: v.number("total_bandwidth_mbps")?,
        }))
    })
    .prefill("enabled", yes_no(current.enabled))
    .prefill("total_bandwidth_mbps", current.total_bandwidth_mbps)
}

fn protocol_settings(console: &RouterConsole, protocol: RoutingProtocol) -> CommandForm {
    let current = &console.routing().protocols;
    let title = format!("{} process", protocol.to_string().to_uppercase());
    let enabled = yes_no(current.is_enabled(protocol));

    match protocol {
        RoutingProtocol::Ospf => CommandForm::new(title, OSPF_FIELDS, |v| {
            let mut update = UpdateProtocolRequest::new(RoutingProtocol::Ospf);
            update.enabled = v.flag("enabled")?;
            update.process_id = v.number("process_id")?;
            update.router_id = Some(v.get("router_id").trim().to_owned());
            Ok(Command::UpdateProtocol(update))
        })
        .prefill("enabled", enabled)
        .prefill("process_id", current.ospf.process_id)
        .prefill("router_id", &current.ospf.router_id),
        RoutingProtocol::Eigrp => CommandForm::new(title, EIGRP_FIELDS, |v| {
            let mut update = UpdateProtocolRequest::new(RoutingProtocol::Eigrp);
            update.enabled = v.flag("enabled")?;
            update.asn = v.number("asn")?;
            Ok(Command::UpdateProtocol(update))
        })
        .prefill("enabled", enabled)
        .prefill("asn", current.eigrp.asn),
        RoutingProtocol::Bgp => CommandForm::new(title, BGP_FIELDS, |v| {
            let mut update = UpdateProtocolRequest::new(RoutingProtocol::Bgp);
            update.enabled = v.flag("enabled")?;
            update.asn = v.number("asn")?;
            update.router_id = Some(v.get("router_id").trim().to_owned());
            Ok(Command::UpdateProtocol(update))
        })
        .prefill("enabled", enabled)
        .prefill("asn", current.bgp.asn)
        .prefill("router_id", &current.bgp.router_id),
        RoutingProtocol::Rip => CommandForm::new(title, RIP_FIELDS, |v| {
            let mut update = UpdateProtocolRequest::new(RoutingProtocol::Rip);
            update.enabled = v.flag("enabled")?;
            update.version = v.number("version")?;
            Ok(Command::UpdateProtocol(update))
        })
        .prefill("enabled", enabled)
        .prefill("version", current.rip.version),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use routerdesk_core::ConsoleConfig;
    use tokio::sync::mpsc;

    use super::*;
    use crate::console_bridge;

    fn console() -> RouterConsole {
        let (tx, _rx) = mpsc::unbounded_channel();
        console_bridge::connect(ConsoleConfig::default(), tx)
    }

    #[test]
    fn vlan_dialog_commits_through_the_console() {
        let mut console = console();
        let before = console.vlans().vlans.len();

        let mut form = open(FormRequest::Create(RecordKind::Vlan), &console).unwrap();
        assert_eq!(form.title(), "New VLAN");
        form.set_field("vlan_id", "50").unwrap();
        form.set_field("name", "Lab").unwrap();
        form.set_field("subnet", "10.50.0.0/24").unwrap();
        form.submit(&mut console).unwrap();

        assert_eq!(console.vlans().vlans.len(), before + 1);
        assert!(console.vlans().vlans.iter().any(|v| v.vlan_id == 50));
    }

    #[test]
    fn missing_required_field_leaves_store_untouched() {
        let mut console = console();
        let before = console.vlans().vlans.len();

        let mut form = open(FormRequest::Create(RecordKind::Vlan), &console).unwrap();
        form.set_field("name", "Lab").unwrap();
        let err = form.submit(&mut console).unwrap_err();

        assert_eq!(err.field(), Some("vlan_id"));
        assert_eq!(console.vlans().vlans.len(), before);
        assert_eq!(form.value("name"), "Lab");
    }

    #[test]
    fn edit_only_kinds_refuse_create() {
        assert!(open(FormRequest::Create(RecordKind::Interface), &console()).is_err());
    }

    #[test]
    fn dhcp_dialog_is_prefilled_and_parses_numbers() {
        let mut console = console();
        let mut form = open(FormRequest::DhcpSettings, &console).unwrap();
        assert_eq!(form.value("pool_start"), "192.168.1.100");
        assert_eq!(form.value("enabled"), "yes");

        form.set_field("lease_hours", "twelve").unwrap();
        let err = form.submit(&mut console).unwrap_err();
        assert_eq!(err.field(), Some("lease_hours"));

        form.set_field("lease_hours", "12").unwrap();
        form.submit(&mut console).unwrap();
        assert_eq!(console.dhcp().settings.lease_hours, 12);
    }

    #[test]
    fn choice_fields_reject_unknown_values() {
        let console = console();
        let mut form = open(FormRequest::Protocol(RoutingProtocol::Rip), &console).unwrap();
        assert!(form.set_field("enabled", "maybe").is_err());
        assert!(form.set_field("enabled", "YES").is_ok());
        assert!(form.set_field("colour", "red").is_err());
    }

    #[test]
    fn protocol_dialog_enables_bgp() {
        let mut console = console();
        let mut form = open(FormRequest::Protocol(RoutingProtocol::Bgp), &console).unwrap();
        assert_eq!(form.value("asn"), "65001");
        form.set_field("enabled", "yes").unwrap();
        form.submit(&mut console).unwrap();
        assert!(console.routing().protocols.bgp.enabled);
    }

    #[test]
    fn bandwidth_dialog_rejects_over_hundred() {
        let mut console = console();
        let mut form = open(FormRequest::Bandwidth(RecordId::new(1)), &console).unwrap();
        assert_eq!(form.value("bandwidth_percent"), "40");
        form.set_field("bandwidth_percent", "150").unwrap();
        assert!(form.submit(&mut console).is_err());
        assert_eq!(console.qos().classes.iter().next().unwrap().bandwidth_percent, 40);
    }

    #[test]
    fn vpn_dialog_parses_display_names() {
        let mut console = console();
        let mut form = open(FormRequest::VpnSettings, &console).unwrap();
        assert_eq!(form.value("protocol"), "OpenVPN");
        assert_eq!(form.value("port"), "1194");

        form.set_field("enabled", "yes").unwrap();
        form.set_field("protocol", "l2tp/ipsec").unwrap();
        form.set_field("port", "1701").unwrap();
        form.submit(&mut console).unwrap();

        let vpn = &console.security().vpn;
        assert!(vpn.enabled);
        assert_eq!(vpn.protocol, routerdesk_core::VpnProtocol::L2tpIpsec);
        assert_eq!(vpn.port, 1701);
    }

    #[test]
    fn vpn_dialog_keeps_settings_on_bad_port() {
        let mut console = console();
        let mut form = open(FormRequest::VpnSettings, &console).unwrap();
        form.set_field("port", "0").unwrap();
        let err = form.submit(&mut console).unwrap_err();
        assert_eq!(err.field(), Some("port"));
        assert_eq!(console.security().vpn.port, 1194);
    }

    #[test]
    fn qos_dialog_switches_off() {
        let mut console = console();
        let mut form = open(FormRequest::QosSettings, &console).unwrap();
        assert_eq!(form.value("enabled"), "yes");
        form.set_field("enabled", "no").unwrap();
        form.submit(&mut console).unwrap();
        assert!(!console.qos().settings.enabled);
        assert_eq!(console.qos().settings.usage.medium, 45);
    }
}
