// ── Security domain types ──
//
// Firewall rules are displayed and rendered in insertion order; there is
// no precedence or match evaluation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::common::{ActivityStatus, TwoState};
use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

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
pub enum FirewallProtocol {
    #[default]
    #[serde(rename = "TCP")]
    #[strum(serialize = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    #[strum(serialize = "UDP")]
    Udp,
    #[serde(rename = "ICMP")]
    #[strum(serialize = "ICMP")]
    Icmp,
    Any,
}

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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum FirewallAction {
    #[default]
    Allow,
    Deny,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: RecordId,
    pub name: String,
    /// Address, prefix or "Any".
    pub source: String,
    pub destination: String,
    /// Single port, range ("6881-6889"), list ("80,443") or "Any".
    pub port: String,
    pub protocol: FirewallProtocol,
    pub action: FirewallAction,
    pub status: ActivityStatus,
}

impl FirewallRule {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl Record for FirewallRule {
    const KIND: &'static str = "Firewall rule";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        validate::require("name", &self.name)?;
        validate::require("source", &self.source)?;
        validate::require("destination", &self.destination)
    }
}

impl Filterable for FirewallRule {
    const CATEGORY_FIELD: Option<&'static str> = Some("action");

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.source.as_str(),
            self.destination.as_str(),
            self.port.as_str(),
        ]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "action" => Some(self.action.to_string()),
            "protocol" => Some(self.protocol.to_string()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}

// ── Device access control ───────────────────────────────────────────

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AccessState {
    #[default]
    Allowed,
    Restricted,
    Blocked,
}

/// Toggling a restricted device grants full access.
impl TwoState for AccessState {
    const STATES: [Self; 2] = [Self::Allowed, Self::Blocked];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessControlEntry {
    pub id: RecordId,
    pub device: String,
    pub mac: String,
    /// "Always" or a window like "08:00-20:00".
    pub time_restriction: String,
    pub access: AccessState,
    pub parental_control: bool,
}

impl Record for AccessControlEntry {
    const KIND: &'static str = "Access control entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.device.clone()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("mac", self.mac.clone())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("device", &self.device)?;
        if strict {
            validate::mac("mac", &self.mac)?;
        }
        Ok(())
    }
}

impl Filterable for AccessControlEntry {
    const CATEGORY_FIELD: Option<&'static str> = Some("access");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.device.as_str(), self.mac.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "access" => Some(self.access.to_string()),
            _ => None,
        }
    }
}

// ── Remote-access VPN ─────────────────────────────────────────────

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
pub enum VpnProtocol {
    #[default]
    #[serde(rename = "OpenVPN")]
    #[strum(serialize = "OpenVPN")]
    OpenVpn,
    WireGuard,
    #[serde(rename = "L2TP/IPSec")]
    #[strum(to_string = "L2TP/IPSec", serialize = "l2tp")]
    L2tpIpsec,
    #[serde(rename = "PPTP")]
    #[strum(serialize = "PPTP")]
    Pptp,
}

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
pub enum VpnEncryption {
    #[default]
    #[serde(rename = "AES-256")]
    #[strum(to_string = "AES-256", serialize = "aes256")]
    Aes256,
    #[serde(rename = "AES-128")]
    #[strum(to_string = "AES-128", serialize = "aes128")]
    Aes128,
    ChaCha20,
}

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
pub enum VpnAuthentication {
    #[default]
    #[serde(rename = "SHA-256")]
    #[strum(to_string = "SHA-256", serialize = "sha256")]
    Sha256,
    #[serde(rename = "SHA-1")]
    #[strum(to_string = "SHA-1", serialize = "sha1")]
    Sha1,
    #[serde(rename = "MD5")]
    #[strum(serialize = "MD5")]
    Md5,
}

/// Remote-access VPN server. One per console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnSettings {
    pub enabled: bool,
    pub protocol: VpnProtocol,
    pub port: u16,
    pub encryption: VpnEncryption,
    pub authentication: VpnAuthentication,
}

impl Default for VpnSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            protocol: VpnProtocol::OpenVpn,
            port: 1194,
            encryption: VpnEncryption::Aes256,
            authentication: VpnAuthentication::Sha256,
        }
    }
}

impl VpnSettings {
    /// Strict mode also refuses MD5 authentication.
    pub fn validate(&self, strict: bool) -> Result<(), CoreError> {
        if self.port == 0 {
            return Err(CoreError::validation("port", "must be between 1 and 65535"));
        }
        if strict && self.authentication == VpnAuthentication::Md5 {
            return Err(CoreError::validation(
                "authentication",
                "MD5 is not accepted in strict mode",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn restricted_toggles_to_allowed() {
        assert_eq!(AccessState::Restricted.toggled(), AccessState::Allowed);
        assert_eq!(AccessState::Allowed.toggled(), AccessState::Blocked);
        assert_eq!(AccessState::Blocked.toggled(), AccessState::Allowed);
    }

    #[test]
    fn rule_requires_name_source_destination() {
        let rule = FirewallRule {
            name: "Allow SSH".into(),
            source: "192.168.1.0/24".into(),
            ..FirewallRule::default()
        };
        assert_eq!(rule.validate(false).unwrap_err().field(), Some("destination"));
    }

    #[test]
    fn protocol_and_action_text() {
        assert_eq!(FirewallProtocol::Icmp.to_string(), "ICMP");
        assert_eq!("tcp".parse::<FirewallProtocol>().unwrap(), FirewallProtocol::Tcp);
        assert_eq!(FirewallAction::Drop.to_string(), "DROP");
        assert_eq!("deny".parse::<FirewallAction>().unwrap(), FirewallAction::Deny);
    }

    #[test]
    fn vpn_names_parse_loosely() {
        assert_eq!("openvpn".parse::<VpnProtocol>().unwrap(), VpnProtocol::OpenVpn);
        assert_eq!("l2tp".parse::<VpnProtocol>().unwrap(), VpnProtocol::L2tpIpsec);
        assert_eq!(VpnProtocol::L2tpIpsec.to_string(), "L2TP/IPSec");
        assert_eq!("aes128".parse::<VpnEncryption>().unwrap(), VpnEncryption::Aes128);
        assert_eq!("SHA-1".parse::<VpnAuthentication>().unwrap(), VpnAuthentication::Sha1);
    }

    #[test]
    fn vpn_port_zero_is_rejected() {
        let settings = VpnSettings {
            port: 0,
            ..VpnSettings::default()
        };
        assert_eq!(settings.validate(false).unwrap_err().field(), Some("port"));
    }

    #[test]
    fn strict_vpn_refuses_md5() {
        let settings = VpnSettings {
            authentication: VpnAuthentication::Md5,
            ..VpnSettings::default()
        };
        assert!(settings.validate(false).is_ok());
        assert_eq!(
            settings.validate(true).unwrap_err().field(),
            Some("authentication")
        );
    }
}
