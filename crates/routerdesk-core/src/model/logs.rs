// ── System log types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
    Debug,
}

/// One line of the system log. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: RecordId,
    /// "YYYY-MM-DD HH:MM:SS", local time.
    pub timestamp: String,
    pub level: LogLevel,
    /// Subsystem: system, network, security, wifi, qos, vlan...
    pub category: String,
    pub source: String,
    pub message: String,
    pub details: String,
}

impl Record for LogEntry {
    const KIND: &'static str = "Log entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("[{}] {}", self.level, self.message)
    }

    fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        validate::require("category", &self.category)?;
        validate::require("message", &self.message)
    }
}

impl Filterable for LogEntry {
    const CATEGORY_FIELD: Option<&'static str> = Some("category");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.message.as_str(), self.source.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "category" => Some(self.category.clone()),
            "level" => Some(self.level.to_string()),
            "source" => Some(self.source.clone()),
            _ => None,
        }
    }
}
