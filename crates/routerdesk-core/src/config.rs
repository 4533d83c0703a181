// ── Runtime console configuration ──
//
// These types describe how a `Console` validates input and where its
// notifications go. The CLI/TUI builds a `ConsoleConfig` (usually from the
// config crate) and hands it in; core never reads config files.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What a store does when a record's unique key collides with another one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DuplicatePolicy {
    /// Accept duplicates silently.
    #[default]
    Allow,
    /// Fail with `CoreError::Conflict`.
    Reject,
}

/// Validation applied to every create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Check address, MAC, VLAN range and RD/RT formats on top of the
    /// required-field checks.
    pub strict: bool,
    pub duplicates: DuplicatePolicy,
}

/// Configuration for one console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub validation: ValidationPolicy,
    /// Prompt name used by the simulated terminal (`Router#`).
    pub hostname: String,
    /// How many notifications a `MemorySink` keeps before dropping the oldest.
    pub notification_capacity: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            hostname: "Router".into(),
            notification_capacity: 50,
        }
    }
}
