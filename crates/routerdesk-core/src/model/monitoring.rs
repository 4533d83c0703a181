// ── Monitoring domain types ──
//
// Read-only counters and resource gauges. Nothing here is sampled from a
// real device; a refresh only restamps the snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity_id::RecordId;
use super::interface::LinkStatus;
use crate::filter::Filterable;
use crate::store::Record;

/// A share in tenths of a percent: `Permille(756)` prints as `75.6%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permille(pub u16);

impl Permille {
    /// `part / whole`, rounded to the nearest tenth. Zero when `whole` is zero.
    pub fn of(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self(0);
        }
        let value = (part.saturating_mul(1000) + whole / 2) / whole;
        Self(u16::try_from(value).unwrap_or(u16::MAX))
    }

    /// Whole percent, truncated.
    pub fn percent(self) -> u16 {
        self.0 / 10
    }

    /// Gauge ratio clamped to `0.0..=1.0`.
    pub fn ratio(self) -> f64 {
        (f64::from(self.0) / 1000.0).min(1.0)
    }
}

impl fmt::Display for Permille {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

/// Used versus total, in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capacity {
    pub used_kb: u64,
    pub total_kb: u64,
}

impl Capacity {
    pub fn kb(used_kb: u64, total_kb: u64) -> Self {
        Self { used_kb, total_kb }
    }

    pub fn mb(used_mb: u64, total_mb: u64) -> Self {
        Self::kb(used_mb * 1024, total_mb * 1024)
    }

    pub fn free_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.used_kb)
    }

    /// Can exceed 100% when a pool is oversubscribed.
    pub fn usage(&self) -> Permille {
        Permille::of(self.used_kb, self.total_kb)
    }
}

/// `142 KB`, `89 MB`: megabytes once the value is a whole number of them.
pub fn format_kb(kb: u64) -> String {
    if kb >= 1024 && kb % 1024 == 0 {
        format!("{} MB", kb / 1024)
    } else {
        format!("{kb} KB")
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}",
            format_kb(self.used_kb),
            format_kb(self.total_kb)
        )
    }
}

/// Traffic and error counters for one interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceStats {
    pub id: RecordId,
    pub interface: String,
    pub status: LinkStatus,
    pub in_octets: u64,
    pub out_octets: u64,
    pub in_packets: u64,
    pub out_packets: u64,
    pub in_errors: u64,
    pub out_errors: u64,
    pub crc_errors: u64,
    pub collisions: u64,
    /// Current load, percent of `bandwidth`.
    pub utilization: u8,
    /// Line rate as display text ("1000 Mbps", "1544 Kbps").
    pub bandwidth: String,
}

impl InterfaceStats {
    pub fn total_errors(&self) -> u64 {
        self.in_errors + self.out_errors + self.crc_errors + self.collisions
    }
}

impl Record for InterfaceStats {
    const KIND: &'static str = "Interface statistics";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.interface.clone()
    }
}

impl Filterable for InterfaceStats {
    const CATEGORY_FIELD: Option<&'static str> = Some("interface");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.interface.as_str(), self.bandwidth.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "interface" => Some(self.interface.clone()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessUsage {
    pub name: String,
    pub cpu: Permille,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryPool {
    pub name: String,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CpuUsage {
    pub usage: Permille,
    /// Busiest processes, highest first.
    pub processes: Vec<ProcessUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total: Capacity,
    pub pools: Vec<MemoryPool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageUsage {
    pub flash: Capacity,
    pub nvram: Capacity,
}

/// CPU, memory and storage snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemResources {
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    pub storage: StorageUsage,
    /// When the snapshot was last refreshed (local time text).
    pub sampled_at: String,
}

impl SystemResources {
    /// Pools using more than they were given.
    pub fn oversubscribed_pools(&self) -> impl Iterator<Item = &MemoryPool> {
        self.memory
            .pools
            .iter()
            .filter(|p| p.capacity.used_kb > p.capacity.total_kb)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn permille_rounds_to_the_nearest_tenth() {
        assert_eq!(Permille::of(387, 512).to_string(), "75.6%");
        assert_eq!(Permille::of(142, 512).to_string(), "27.7%");
        assert_eq!(Permille::of(1, 0), Permille(0));
        assert_eq!(Permille::of(153, 128).percent(), 119);
    }

    #[test]
    fn gauge_ratio_is_clamped() {
        assert!(Permille(1195).ratio() <= 1.0);
        assert!(Permille(0).ratio() < f64::EPSILON);
    }

    #[test]
    fn capacity_prints_in_the_largest_whole_unit() {
        assert_eq!(Capacity::mb(89, 256).to_string(), "89 MB / 256 MB");
        assert_eq!(Capacity::kb(142, 512).to_string(), "142 KB / 512 KB");
        assert_eq!(Capacity::mb(387, 512).free_kb(), 125 * 1024);
    }

    #[test]
    fn stats_facet_on_interface_name() {
        let stats = InterfaceStats {
            interface: "Serial0/1/0".into(),
            ..InterfaceStats::default()
        };
        assert_eq!(stats.facet("interface").as_deref(), Some("Serial0/1/0"));
        assert_eq!(stats.facet("status").as_deref(), Some("down"));
        assert!(stats.facet("speed").is_none());
    }
}
