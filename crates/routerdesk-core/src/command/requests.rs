// ── Typed update requests ──
//
// Field-wise patches: a `None` field is left untouched. Each request
// implements `Patch` for the record it updates, so `RecordStore::update`
// can apply it directly.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{
    DeviceLimit, DhcpReservation, DhcpServerSettings, Duplex, FirewallAction, FirewallProtocol,
    FirewallRule, LinkStatus, LogLevel, NetworkInterface, PortMode, Priority, QosSettings,
    RoutingProtocol, RoutingProtocols, StaticRoute, SwitchPort, Vlan, VpnAuthentication,
    VpnEncryption, VpnProtocol, VpnSettings, Vrf,
};
use crate::store::Patch;

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

// ── Interfaces ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInterfaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LinkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<Duplex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
}

impl Patch<NetworkInterface> for UpdateInterfaceRequest {
    fn apply_to(self, iface: &mut NetworkInterface) {
        set(&mut iface.ip, self.ip);
        set(&mut iface.mask, self.mask);
        set(&mut iface.description, self.description);
        set(&mut iface.status, self.status);
        set(&mut iface.duplex, self.duplex);
        set(&mut iface.speed, self.speed);
    }
}

// ── DHCP ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDhcpSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_secondary: Option<String>,
}

impl Patch<DhcpServerSettings> for UpdateDhcpSettingsRequest {
    fn apply_to(self, s: &mut DhcpServerSettings) {
        set(&mut s.enabled, self.enabled);
        set(&mut s.pool_start, self.pool_start);
        set(&mut s.pool_end, self.pool_end);
        set(&mut s.lease_hours, self.lease_hours);
        set(&mut s.gateway, self.gateway);
        set(&mut s.dns_primary, self.dns_primary);
        set(&mut s.dns_secondary, self.dns_secondary);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Patch<DhcpReservation> for UpdateReservationRequest {
    fn apply_to(self, r: &mut DhcpReservation) {
        set(&mut r.hostname, self.hostname);
        set(&mut r.mac, self.mac);
        set(&mut r.ip, self.ip);
        set(&mut r.description, self.description);
    }
}

// ── Routing ────────────────────────────────────────────────────────

/// Settings change for one routing protocol.
///
/// Only fields the protocol actually has may be set: `process_id` is
/// OSPF-only, `version` RIP-only, `router_id` OSPF/BGP, `asn` EIGRP/BGP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProtocolRequest {
    pub protocol: RoutingProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
}

impl UpdateProtocolRequest {
    pub fn new(protocol: RoutingProtocol) -> Self {
        Self {
            protocol,
            enabled: None,
            process_id: None,
            router_id: None,
            asn: None,
            version: None,
        }
    }

    /// Apply to `protocols`, rejecting fields the protocol does not have.
    pub fn apply(self, protocols: &mut RoutingProtocols) -> Result<(), CoreError> {
        let entity = self.protocol.to_string().to_uppercase();
        let reject = |field: &str| Err(CoreError::unknown_field(entity.clone(), field));

        match self.protocol {
            RoutingProtocol::Ospf => {
                if self.asn.is_some() {
                    return reject("asn");
                }
                if self.version.is_some() {
                    return reject("version");
                }
                set(&mut protocols.ospf.enabled, self.enabled);
                set(&mut protocols.ospf.process_id, self.process_id);
                set(&mut protocols.ospf.router_id, self.router_id);
            }
            RoutingProtocol::Eigrp => {
                if self.process_id.is_some() {
                    return reject("process_id");
                }
                if self.router_id.is_some() {
                    return reject("router_id");
                }
                if self.version.is_some() {
                    return reject("version");
                }
                set(&mut protocols.eigrp.enabled, self.enabled);
                set(&mut protocols.eigrp.asn, self.asn);
            }
            RoutingProtocol::Bgp => {
                if self.process_id.is_some() {
                    return reject("process_id");
                }
                if self.version.is_some() {
                    return reject("version");
                }
                set(&mut protocols.bgp.enabled, self.enabled);
                set(&mut protocols.bgp.asn, self.asn);
                set(&mut protocols.bgp.router_id, self.router_id);
            }
            RoutingProtocol::Rip => {
                if self.process_id.is_some() {
                    return reject("process_id");
                }
                if self.router_id.is_some() {
                    return reject("router_id");
                }
                if self.asn.is_some() {
                    return reject("asn");
                }
                set(&mut protocols.rip.enabled, self.enabled);
                set(&mut protocols.rip.version, self.version);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStaticRouteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Patch<StaticRoute> for UpdateStaticRouteRequest {
    fn apply_to(self, route: &mut StaticRoute) {
        set(&mut route.network, self.network);
        set(&mut route.mask, self.mask);
        set(&mut route.gateway, self.gateway);
        set(&mut route.interface, self.interface);
        set(&mut route.distance, self.distance);
        set(&mut route.description, self.description);
    }
}

// ── VLANs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
}

impl Patch<Vlan> for UpdateVlanRequest {
    fn apply_to(self, v: &mut Vlan) {
        set(&mut v.vlan_id, self.vlan_id);
        set(&mut v.name, self.name);
        set(&mut v.description, self.description);
        set(&mut v.subnet, self.subnet);
        set(&mut v.ports, self.ports);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSwitchPortRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<PortMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlans: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Patch<SwitchPort> for UpdateSwitchPortRequest {
    fn apply_to(self, p: &mut SwitchPort) {
        set(&mut p.mode, self.mode);
        set(&mut p.vlans, self.vlans);
        set(&mut p.description, self.description);
    }
}

// ── VRFs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVrfRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rt_import: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rt_export: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Patch<Vrf> for UpdateVrfRequest {
    fn apply_to(self, vrf: &mut Vrf) {
        set(&mut vrf.name, self.name);
        set(&mut vrf.rd, self.rd);
        set(&mut vrf.rt_import, self.rt_import);
        set(&mut vrf.rt_export, self.rt_export);
        set(&mut vrf.description, self.description);
    }
}

// ── Security ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFirewallRuleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<FirewallProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FirewallAction>,
}

impl Patch<FirewallRule> for UpdateFirewallRuleRequest {
    fn apply_to(self, rule: &mut FirewallRule) {
        set(&mut rule.name, self.name);
        set(&mut rule.source, self.source);
        set(&mut rule.destination, self.destination);
        set(&mut rule.port, self.port);
        set(&mut rule.protocol, self.protocol);
        set(&mut rule.action, self.action);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVpnSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<VpnProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<VpnEncryption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<VpnAuthentication>,
}

impl Patch<VpnSettings> for UpdateVpnSettingsRequest {
    fn apply_to(self, s: &mut VpnSettings) {
        set(&mut s.enabled, self.enabled);
        set(&mut s.protocol, self.protocol);
        set(&mut s.port, self.port);
        set(&mut s.encryption, self.encryption);
        set(&mut s.authentication, self.authentication);
    }
}

// ── QoS ────────────────────────────────────────────────────────────

/// Measured usage is read-only; only the switch and uplink size change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQosSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bandwidth_mbps: Option<u32>,
}

impl Patch<QosSettings> for UpdateQosSettingsRequest {
    fn apply_to(self, s: &mut QosSettings) {
        set(&mut s.enabled, self.enabled);
        set(&mut s.total_bandwidth_mbps, self.total_bandwidth_mbps);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDeviceLimitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_mbps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_mbps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Patch<DeviceLimit> for UpdateDeviceLimitRequest {
    fn apply_to(self, d: &mut DeviceLimit) {
        set(&mut d.upload_mbps, self.upload_mbps);
        set(&mut d.download_mbps, self.download_mbps);
        set(&mut d.priority, self.priority);
    }
}

// ── Logs ───────────────────────────────────────────────────────────

/// A new system log line. The console stamps the time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendLogRequest {
    pub level: LogLevel,
    pub category: String,
    pub source: String,
    pub message: String,
    pub details: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn protocol_update_rejects_foreign_fields() {
        let mut protocols = RoutingProtocols::default();
        let mut req = UpdateProtocolRequest::new(RoutingProtocol::Rip);
        req.asn = Some(100);
        let err = req.apply(&mut protocols).unwrap_err();
        assert_eq!(err.field(), Some("asn"));
        assert_eq!(protocols, RoutingProtocols::default());
    }

    #[test]
    fn protocol_update_touches_only_its_protocol() {
        let mut protocols = RoutingProtocols::default();
        let mut req = UpdateProtocolRequest::new(RoutingProtocol::Bgp);
        req.enabled = Some(true);
        req.asn = Some(65010);
        req.apply(&mut protocols).unwrap();
        assert!(protocols.bgp.enabled);
        assert_eq!(protocols.bgp.asn, 65010);
        assert_eq!(protocols.eigrp, RoutingProtocols::default().eigrp);
    }

    #[test]
    fn update_request_skips_none_when_serialized() {
        let req = UpdateVlanRequest {
            name: Some("Guests".into()),
            ..UpdateVlanRequest::default()
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"name":"Guests"}"#);
    }
}
