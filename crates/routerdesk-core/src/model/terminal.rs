// ── Command reference & terminal history ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::RecordId;
use crate::filter::Filterable;
use crate::store::Record;

/// One entry of the built-in IOS command catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandReference {
    pub id: RecordId,
    pub category: String,
    pub command: String,
    pub description: String,
    pub usage: String,
    pub example: String,
}

impl Record for CommandReference {
    const KIND: &'static str = "Command reference";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.command.clone()
    }
}

impl Filterable for CommandReference {
    const CATEGORY_FIELD: Option<&'static str> = Some("category");

    fn search_fields(&self) -> Vec<&str> {
        vec![self.command.as_str(), self.description.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "category" => Some(self.category.clone()),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommandStatus {
    #[default]
    Success,
    Error,
}

/// A command typed into the simulated terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandHistoryEntry {
    pub id: RecordId,
    pub command: String,
    /// "HH:MM:SS", local time.
    pub timestamp: String,
    pub status: CommandStatus,
}

impl Record for CommandHistoryEntry {
    const KIND: &'static str = "History entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.command.clone()
    }
}

impl Filterable for CommandHistoryEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.command.as_str()]
    }

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}
