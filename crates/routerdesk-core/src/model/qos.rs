// ── QoS domain types ──

use serde::{Deserialize, Serialize};

use super::common::{ActivityStatus, Priority};
use super::entity_id::RecordId;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::store::Record;
use crate::validate;

/// A traffic-shaping class with a share of the uplink.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrafficClass {
    pub id: RecordId,
    pub name: String,
    pub priority: Priority,
    pub bandwidth_percent: u8,
    /// Traffic this class is meant for ("VoIP/Gaming").
    pub protocol: String,
}

impl Record for TrafficClass {
    const KIND: &'static str = "Traffic class";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        validate::require("name", &self.name)?;
        if self.bandwidth_percent > 100 {
            return Err(CoreError::validation(
                "bandwidth_percent",
                format!("{}% exceeds 100%", self.bandwidth_percent),
            ));
        }
        Ok(())
    }
}

impl Filterable for TrafficClass {
    const CATEGORY_FIELD: Option<&'static str> = Some("priority");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.protocol.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "priority" => Some(self.priority.to_string()),
            _ => None,
        }
    }
}

/// Per-application shaping rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationRule {
    pub id: RecordId,
    pub name: String,
    /// Application family ("Video Streaming", "P2P").
    pub kind: String,
    pub priority: Priority,
    /// Display text, e.g. "50 Mbps".
    pub bandwidth: String,
    pub status: ActivityStatus,
}

impl Record for ApplicationRule {
    const KIND: &'static str = "Application rule";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        validate::require("name", &self.name)
    }
}

impl Filterable for ApplicationRule {
    const CATEGORY_FIELD: Option<&'static str> = Some("kind");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.kind.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "kind" => Some(self.kind.clone()),
            "priority" => Some(self.priority.to_string()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}

/// Bandwidth cap for one client device, in Mbps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceLimit {
    pub id: RecordId,
    pub device: String,
    pub ip: String,
    pub upload_mbps: u32,
    pub download_mbps: u32,
    pub priority: Priority,
}

impl Record for DeviceLimit {
    const KIND: &'static str = "Device limit";

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
        vec![("ip", self.ip.clone())]
    }

    fn validate(&self, strict: bool) -> Result<(), CoreError> {
        validate::require("device", &self.device)?;
        if strict {
            validate::ipv4("ip", &self.ip)?;
        }
        Ok(())
    }
}

impl Filterable for DeviceLimit {
    const CATEGORY_FIELD: Option<&'static str> = Some("priority");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.device.as_str(), self.ip.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "priority" => Some(self.priority.to_string()),
            _ => None,
        }
    }
}

/// Measured load per priority, percent of the total bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QosUsage {
    pub high: u8,
    pub medium: u8,
    pub low: u8,
}

impl QosUsage {
    pub fn get(&self, priority: Priority) -> u8 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Global QoS switch and uplink size. One per console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosSettings {
    pub enabled: bool,
    pub total_bandwidth_mbps: u32,
    pub usage: QosUsage,
}

impl Default for QosSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            total_bandwidth_mbps: 1000,
            usage: QosUsage::default(),
        }
    }
}

impl QosSettings {
    pub fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        if self.total_bandwidth_mbps == 0 {
            return Err(CoreError::validation(
                "total_bandwidth_mbps",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// `percent` of the total bandwidth, in Mbps, rounded down.
    pub fn share_mbps(&self, percent: u8) -> u64 {
        u64::from(self.total_bandwidth_mbps) * u64::from(percent) / 100
    }

    /// Current load of one priority, in Mbps.
    pub fn used_mbps(&self, priority: Priority) -> u64 {
        self.share_mbps(self.usage.get(priority))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_share_capped_at_100() {
        let class = TrafficClass {
            name: "High".into(),
            bandwidth_percent: 101,
            ..TrafficClass::default()
        };
        assert_eq!(
            class.validate(false).unwrap_err().field(),
            Some("bandwidth_percent")
        );
    }

    #[test]
    fn usage_converts_to_mbps() {
        let settings = QosSettings {
            enabled: true,
            total_bandwidth_mbps: 1000,
            usage: QosUsage {
                high: 25,
                medium: 45,
                low: 15,
            },
        };
        assert_eq!(settings.used_mbps(Priority::High), 250);
        assert_eq!(settings.used_mbps(Priority::Low), 150);
        assert_eq!(settings.share_mbps(40), 400);
    }

    #[test]
    fn zero_bandwidth_is_rejected() {
        let settings = QosSettings {
            total_bandwidth_mbps: 0,
            ..QosSettings::default()
        };
        assert_eq!(
            settings.validate(false).unwrap_err().field(),
            Some("total_bandwidth_mbps")
        );
    }
}
