// ── Interface domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::common::TwoState;
use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

/// Physical/logical interface family.
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
pub enum InterfaceKind {
    #[default]
    Ethernet,
    Serial,
    Loopback,
}

/// Administrative link state.
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
pub enum LinkStatus {
    Up,
    #[default]
    Down,
}

impl TwoState for LinkStatus {
    const STATES: [Self; 2] = [Self::Up, Self::Down];
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Duplex {
    #[default]
    Auto,
    Full,
    Half,
    #[serde(rename = "n/a")]
    #[strum(to_string = "n/a", serialize = "na")]
    NotApplicable,
}

/// A router interface. Interfaces are seeded and edited, rarely created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub id: RecordId,
    pub name: String,
    pub kind: InterfaceKind,
    pub ip: String,
    pub mask: String,
    pub status: LinkStatus,
    pub description: String,
    pub duplex: Duplex,
    /// Free text: "1000", "1544", "auto", "N/A".
    pub speed: String,
}

impl NetworkInterface {
    pub fn has_address(&self) -> bool {
        !self.ip.trim().is_empty()
    }

    pub fn is_up(&self) -> bool {
        self.status == LinkStatus::Up
    }

    /// Included in the generated configuration.
    pub fn is_configured(&self) -> bool {
        self.has_address() && self.is_up()
    }
}

impl Record for NetworkInterface {
    const KIND: &'static str = "Interface";

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

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("name", &self.name)?;
        if strict {
            validate::ipv4("ip", &self.ip)?;
            validate::ipv4("mask", &self.mask)?;
        }
        Ok(())
    }
}

impl Filterable for NetworkInterface {
    const CATEGORY_FIELD: Option<&'static str> = Some("kind");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.ip.as_str(), self.description.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "kind" => Some(self.kind.to_string()),
            "status" => Some(self.status.to_string()),
            "duplex" => Some(self.duplex.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn configured_needs_address_and_up() {
        let mut iface = NetworkInterface {
            name: "Gi0/0/1".into(),
            ip: "192.168.1.1".into(),
            status: LinkStatus::Up,
            ..NetworkInterface::default()
        };
        assert!(iface.is_configured());
        iface.status = LinkStatus::Down;
        assert!(!iface.is_configured());
        iface.status = LinkStatus::Up;
        iface.ip.clear();
        assert!(!iface.is_configured());
    }

    #[test]
    fn duplex_text_forms() {
        assert_eq!(Duplex::NotApplicable.to_string(), "n/a");
        assert_eq!("N/A".parse::<Duplex>().unwrap(), Duplex::NotApplicable);
        assert_eq!(
            serde_json::to_string(&Duplex::NotApplicable).unwrap(),
            "\"n/a\""
        );
    }

    #[test]
    fn strict_validation_checks_addresses() {
        let iface = NetworkInterface {
            name: "Gi0/0/1".into(),
            ip: "300.1.1.1".into(),
            ..NetworkInterface::default()
        };
        assert!(iface.validate(false).is_ok());
        assert_eq!(iface.validate(true).unwrap_err().field(), Some("ip"));
    }
}
