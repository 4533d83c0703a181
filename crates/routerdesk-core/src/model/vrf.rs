// ── VRF domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::common::ActivityStatus;
use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

/// Where a VRF route was learned from.
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
pub enum RouteSource {
    #[default]
    Connected,
    Static,
    Ospf,
    Bgp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VrfRoute {
    pub network: String,
    pub next_hop: String,
    pub source: RouteSource,
}

/// A virtual routing and forwarding instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vrf {
    pub id: RecordId,
    pub name: String,
    /// Route distinguisher, "ASN:index".
    pub rd: String,
    pub rt_import: Vec<String>,
    pub rt_export: Vec<String>,
    pub description: String,
    pub interfaces: Vec<String>,
    pub status: ActivityStatus,
    pub routes: Vec<VrfRoute>,
}

impl Vrf {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl Record for Vrf {
    const KIND: &'static str = "VRF";

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
        vec![("name", self.name.clone()), ("rd", self.rd.clone())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("name", &self.name)?;
        validate::require("rd", &self.rd)?;
        if strict {
            validate::asn_index("rd", &self.rd)?;
            for rt in &self.rt_import {
                validate::asn_index("rt_import", rt)?;
            }
            for rt in &self.rt_export {
                validate::asn_index("rt_export", rt)?;
            }
        }
        Ok(())
    }
}

impl Filterable for Vrf {
    const CATEGORY_FIELD: Option<&'static str> = Some("status");

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.rd.as_str(),
            self.description.as_str(),
        ];
        fields.extend(self.interfaces.iter().map(String::as_str));
        fields
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn strict_checks_rd_and_route_targets() {
        let mut vrf = Vrf {
            name: "CUSTOMER_C".into(),
            rd: "65001:400".into(),
            rt_import: vec!["65001:400".into(), "bogus".into()],
            ..Vrf::default()
        };
        assert!(vrf.validate(false).is_ok());
        assert_eq!(vrf.validate(true).unwrap_err().field(), Some("rt_import"));
        vrf.rt_import.pop();
        assert!(vrf.validate(true).is_ok());
    }

    #[test]
    fn new_vrf_starts_inactive() {
        assert!(!Vrf::default().is_active());
    }
}
