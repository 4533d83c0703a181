// ── DHCP domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

/// DHCP server pool configuration. One per console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpServerSettings {
    pub enabled: bool,
    pub pool_start: String,
    pub pool_end: String,
    pub lease_hours: u32,
    pub gateway: String,
    pub dns_primary: String,
    pub dns_secondary: String,
}

impl Default for DhcpServerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            pool_start: String::new(),
            pool_end: String::new(),
            lease_hours: 24,
            gateway: String::new(),
            dns_primary: String::new(),
            dns_secondary: String::new(),
        }
    }
}

impl DhcpServerSettings {
    pub fn validate(&self, strict: bool) -> Result<(), CoreError> {
        if self.lease_hours == 0 {
            return Err(CoreError::validation("lease_hours", "must be at least 1"));
        }
        if strict {
            validate::ipv4("pool_start", &self.pool_start)?;
            validate::ipv4("pool_end", &self.pool_end)?;
            validate::ipv4("gateway", &self.gateway)?;
            validate::ipv4("dns_primary", &self.dns_primary)?;
            validate::ipv4("dns_secondary", &self.dns_secondary)?;
        }
        Ok(())
    }
}

/// A fixed MAC → IP binding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DhcpReservation {
    pub id: RecordId,
    pub hostname: String,
    pub mac: String,
    pub ip: String,
    #[serde(default)]
    pub description: String,
}

impl Record for DhcpReservation {
    const KIND: &'static str = "DHCP reservation";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.hostname.clone()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("mac", self.mac.clone()), ("ip", self.ip.clone())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("hostname", &self.hostname)?;
        validate::require("mac", &self.mac)?;
        validate::require("ip", &self.ip)?;
        if strict {
            validate::mac("mac", &self.mac)?;
            validate::ipv4("ip", &self.ip)?;
        }
        Ok(())
    }
}

impl Filterable for DhcpReservation {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.hostname.as_str(),
            self.mac.as_str(),
            self.ip.as_str(),
            self.description.as_str(),
        ]
    }

    fn facet(&self, _field: &str) -> Option<String> {
        None
    }
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
pub enum LeaseKind {
    #[default]
    #[strum(to_string = "Dynamic", serialize = "Dinámica")]
    Dynamic,
    #[strum(to_string = "Reserved", serialize = "Reservada")]
    Reserved,
}

/// An address currently handed out by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DhcpLease {
    pub id: RecordId,
    pub hostname: String,
    pub mac: String,
    pub ip: String,
    /// Remaining time as display text ("12h 30m", "Permanent").
    pub lease: String,
    pub kind: LeaseKind,
}

impl Record for DhcpLease {
    const KIND: &'static str = "DHCP lease";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("{} ({})", self.ip, self.hostname)
    }
}

impl Filterable for DhcpLease {
    const CATEGORY_FIELD: Option<&'static str> = Some("kind");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.hostname.as_str(), self.mac.as_str(), self.ip.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "kind" => Some(self.kind.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reservation_requires_hostname_mac_ip() {
        let mut r = DhcpReservation {
            hostname: "Printer".into(),
            mac: "AA:BB:CC:DD:EE:FF".into(),
            ip: "192.168.1.50".into(),
            ..DhcpReservation::default()
        };
        assert!(r.validate(true).is_ok());
        r.mac.clear();
        assert_eq!(r.validate(false).unwrap_err().field(), Some("mac"));
    }

    #[test]
    fn reservation_description_defaults_when_absent() {
        let r: DhcpReservation = serde_json::from_str(
            r#"{"id":1,"hostname":"h","mac":"AA:BB:CC:DD:EE:FF","ip":"10.0.0.2"}"#,
        )
        .unwrap();
        assert_eq!(r.description, "");
    }

    #[test]
    fn lease_kind_accepts_localized_names() {
        assert_eq!("Reservada".parse::<LeaseKind>().unwrap(), LeaseKind::Reserved);
        assert_eq!("dynamic".parse::<LeaseKind>().unwrap(), LeaseKind::Dynamic);
        assert_eq!(LeaseKind::Reserved.to_string(), "Reserved");
    }

    #[test]
    fn settings_reject_zero_lease() {
        let s = DhcpServerSettings {
            lease_hours: 0,
            ..DhcpServerSettings::default()
        };
        assert_eq!(s.validate(false).unwrap_err().field(), Some("lease_hours"));
    }
}
