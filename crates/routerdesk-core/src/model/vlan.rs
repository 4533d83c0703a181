// ── VLAN domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vlan {
    pub id: RecordId,
    /// 802.1Q tag, 1-4094 when strict validation is on.
    pub vlan_id: u16,
    pub name: String,
    pub description: String,
    /// CIDR text, e.g. "192.168.10.0/24".
    pub subnet: String,
    pub ports: Vec<String>,
}

impl Record for Vlan {
    const KIND: &'static str = "VLAN";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("VLAN {} ({})", self.vlan_id, self.name)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("vlan_id", self.vlan_id.to_string())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        if self.vlan_id == 0 && !strict {
            return Err(CoreError::required("vlan_id"));
        }
        validate::require("name", &self.name)?;
        validate::require("subnet", &self.subnet)?;
        if strict {
            validate::vlan_id("vlan_id", self.vlan_id)?;
            validate::cidr("subnet", &self.subnet)?;
        }
        Ok(())
    }
}

impl Filterable for Vlan {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.subnet.as_str(),
        ]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "vlan_id" => Some(self.vlan_id.to_string()),
            _ => None,
        }
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PortMode {
    #[default]
    Access,
    Trunk,
}

/// Switchport membership for one front-panel port.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwitchPort {
    pub id: RecordId,
    pub port: String,
    pub mode: PortMode,
    /// Access VLAN, or the allowed list for trunks ("1,10,20").
    pub vlans: String,
    pub description: String,
}

impl Record for SwitchPort {
    const KIND: &'static str = "Switch port";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("port {}", self.port)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("port", self.port.clone())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("port", &self.port)?;
        if strict {
            for vlan in validate::split_list(&self.vlans) {
                let id = validate::number::<u16>("vlans", &vlan)?;
                validate::vlan_id("vlans", id)?;
            }
        }
        Ok(())
    }
}

impl Filterable for SwitchPort {
    const CATEGORY_FIELD: Option<&'static str> = Some("mode");

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.port.as_str(),
            self.vlans.as_str(),
            self.description.as_str(),
        ]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "mode" => Some(self.mode.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vlan(vlan_id: u16) -> Vlan {
        Vlan {
            vlan_id,
            name: "Guests".into(),
            subnet: "192.168.20.0/24".into(),
            ..Vlan::default()
        }
    }

    #[test]
    fn vlan_range_only_checked_when_strict() {
        assert!(vlan(5000).validate(false).is_ok());
        assert_eq!(vlan(5000).validate(true).unwrap_err().field(), Some("vlan_id"));
        assert!(vlan(20).validate(true).is_ok());
    }

    #[test]
    fn vlan_requires_name_and_subnet() {
        let mut v = vlan(20);
        v.subnet.clear();
        assert_eq!(v.validate(false).unwrap_err().field(), Some("subnet"));
        assert_eq!(vlan(0).validate(false).unwrap_err().field(), Some("vlan_id"));
    }

    #[test]
    fn trunk_vlan_list_checked_when_strict() {
        let port = SwitchPort {
            port: "4".into(),
            mode: PortMode::Trunk,
            vlans: "1,10,x".into(),
            ..SwitchPort::default()
        };
        assert!(port.validate(false).is_ok());
        assert!(port.validate(true).is_err());
    }
}
