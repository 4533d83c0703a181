// ── Routing domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

/// Dynamic routing protocols the console can switch on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoutingProtocol {
    Ospf,
    Eigrp,
    Bgp,
    Rip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfSettings {
    pub enabled: bool,
    pub process_id: u16,
    pub router_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EigrpSettings {
    pub enabled: bool,
    pub asn: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpSettings {
    pub enabled: bool,
    pub asn: u32,
    pub router_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RipSettings {
    pub enabled: bool,
    pub version: u8,
}

/// Per-protocol process settings. One per console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingProtocols {
    pub ospf: OspfSettings,
    pub eigrp: EigrpSettings,
    pub bgp: BgpSettings,
    pub rip: RipSettings,
}

impl Default for RoutingProtocols {
    fn default() -> Self {
        Self {
            ospf: OspfSettings {
                enabled: false,
                process_id: 1,
                router_id: String::new(),
            },
            eigrp: EigrpSettings {
                enabled: false,
                asn: 100,
            },
            bgp: BgpSettings {
                enabled: false,
                asn: 65001,
                router_id: String::new(),
            },
            rip: RipSettings {
                enabled: false,
                version: 2,
            },
        }
    }
}

impl RoutingProtocols {
    pub fn is_enabled(&self, protocol: RoutingProtocol) -> bool {
        match protocol {
            RoutingProtocol::Ospf => self.ospf.enabled,
            RoutingProtocol::Eigrp => self.eigrp.enabled,
            RoutingProtocol::Bgp => self.bgp.enabled,
            RoutingProtocol::Rip => self.rip.enabled,
        }
    }

    pub fn enabled_mut(&mut self, protocol: RoutingProtocol) -> &mut bool {
        match protocol {
            RoutingProtocol::Ospf => &mut self.ospf.enabled,
            RoutingProtocol::Eigrp => &mut self.eigrp.enabled,
            RoutingProtocol::Bgp => &mut self.bgp.enabled,
            RoutingProtocol::Rip => &mut self.rip.enabled,
        }
    }

    pub fn validate(&self, strict: bool) -> Result<(), CoreError> {
        if !matches!(self.rip.version, 1 | 2) {
            return Err(CoreError::validation("rip.version", "must be 1 or 2"));
        }
        if self.ospf.process_id == 0 {
            return Err(CoreError::validation("ospf.process_id", "must be at least 1"));
        }
        if strict {
            validate::ipv4("ospf.router_id", &self.ospf.router_id)?;
            validate::ipv4("bgp.router_id", &self.bgp.router_id)?;
        }
        Ok(())
    }
}

// ── Static routes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub id: RecordId,
    pub network: String,
    pub mask: String,
    pub gateway: String,
    pub interface: String,
    /// Administrative distance.
    pub distance: u8,
    pub description: String,
}

impl Default for StaticRoute {
    fn default() -> Self {
        Self {
            id: RecordId::default(),
            network: String::new(),
            mask: String::new(),
            gateway: String::new(),
            interface: String::new(),
            distance: 1,
            description: String::new(),
        }
    }
}

impl StaticRoute {
    /// Gateway if set, otherwise the exit interface.
    pub fn next_hop(&self) -> &str {
        if self.gateway.trim().is_empty() {
            &self.interface
        } else {
            &self.gateway
        }
    }

    pub fn is_default_route(&self) -> bool {
        self.network == "0.0.0.0" && self.mask == "0.0.0.0"
    }
}

impl Record for StaticRoute {
    const KIND: &'static str = "Static route";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("{} {}", self.network, self.mask)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("network", format!("{} {}", self.network, self.mask))]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("network", &self.network)?;
        validate::require("mask", &self.mask)?;
        if self.gateway.trim().is_empty() && self.interface.trim().is_empty() {
            return Err(CoreError::validation(
                "gateway",
                "a gateway or an exit interface is required",
            ));
        }
        if strict {
            validate::ipv4("network", &self.network)?;
            validate::ipv4("mask", &self.mask)?;
            validate::ipv4("gateway", &self.gateway)?;
        }
        Ok(())
    }
}

impl Filterable for StaticRoute {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.network.as_str(),
            self.gateway.as_str(),
            self.interface.as_str(),
            self.description.as_str(),
        ]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "interface" => Some(self.interface.clone()),
            _ => None,
        }
    }
}

// ── OSPF areas ──────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum OspfAreaKind {
    #[default]
    Standard,
    Stub,
    #[serde(rename = "NSSA")]
    #[strum(serialize = "NSSA")]
    Nssa,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OspfArea {
    pub id: RecordId,
    pub area_id: String,
    pub kind: OspfAreaKind,
    /// `network wildcard` pairs, e.g. "192.168.1.0 0.0.0.255".
    pub networks: Vec<String>,
}

impl Record for OspfArea {
    const KIND: &'static str = "OSPF area";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("area {}", self.area_id)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("area_id", self.area_id.clone())]
    }

    fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        validate::require("area_id", &self.area_id)
    }
}

impl Filterable for OspfArea {
    const CATEGORY_FIELD: Option<&'static str> = Some("kind");

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.area_id.as_str()];
        fields.extend(self.networks.iter().map(String::as_str));
        fields
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "kind" => Some(self.kind.to_string()),
            _ => None,
        }
    }
}

// ── BGP neighbors ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BgpNeighbor {
    pub id: RecordId,
    pub ip: String,
    pub remote_as: u32,
    pub description: String,
}

impl Record for BgpNeighbor {
    const KIND: &'static str = "BGP neighbor";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("{} (AS {})", self.ip, self.remote_as)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("ip", self.ip.clone())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("ip", &self.ip)?;
        if self.remote_as == 0 {
            return Err(CoreError::validation("remote_as", "must be a non-zero AS number"));
        }
        if strict {
            validate::ipv4("ip", &self.ip)?;
        }
        Ok(())
    }
}

impl Filterable for BgpNeighbor {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.ip.as_str(), self.description.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "remote_as" => Some(self.remote_as.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn route(gateway: &str, interface: &str) -> StaticRoute {
        StaticRoute {
            network: "172.16.0.0".into(),
            mask: "255.255.0.0".into(),
            gateway: gateway.into(),
            interface: interface.into(),
            ..StaticRoute::default()
        }
    }

    #[test]
    fn route_needs_gateway_or_interface() {
        assert!(route("10.0.0.254", "").validate(false).is_ok());
        assert!(route("", "Serial0/1/0").validate(false).is_ok());
        assert_eq!(
            route("", " ").validate(false).unwrap_err().field(),
            Some("gateway")
        );
    }

    #[test]
    fn next_hop_prefers_gateway() {
        assert_eq!(route("10.0.0.254", "Gi0/0/2").next_hop(), "10.0.0.254");
        assert_eq!(route("", "Gi0/0/2").next_hop(), "Gi0/0/2");
    }

    #[test]
    fn default_distance_is_one() {
        assert_eq!(StaticRoute::default().distance, 1);
    }

    #[test]
    fn protocol_enable_flags() {
        let mut protocols = RoutingProtocols::default();
        assert!(!protocols.is_enabled(RoutingProtocol::Bgp));
        *protocols.enabled_mut(RoutingProtocol::Bgp) = true;
        assert!(protocols.bgp.enabled);
        assert!(!protocols.ospf.enabled);
    }

    #[test]
    fn rip_version_is_checked() {
        let mut protocols = RoutingProtocols::default();
        protocols.rip.version = 3;
        assert_eq!(
            protocols.validate(false).unwrap_err().field(),
            Some("rip.version")
        );
    }

    #[test]
    fn area_kind_nssa_spelling() {
        assert_eq!(OspfAreaKind::Nssa.to_string(), "NSSA");
        assert_eq!("nssa".parse::<OspfAreaKind>().unwrap(), OspfAreaKind::Nssa);
    }
}
