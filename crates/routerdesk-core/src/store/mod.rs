// ── Generic record storage ──
//
// Every panel keeps its rows in a `RecordStore<T>`. The traits here are the
// seams a record type implements to live in a store.

mod record_store;

pub use record_store::RecordStore;

use std::fmt;

use crate::error::CoreError;
use crate::model::RecordId;

/// A row that can live in a [`RecordStore`].
pub trait Record: Clone + fmt::Debug {
    /// Human-readable entity name used in errors and notifications.
    const KIND: &'static str;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);

    /// Short name shown in notifications ("VLAN 10", "Printer", ...).
    fn label(&self) -> String;

    /// Semantically unique keys, checked when duplicates are rejected.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Required-field checks, plus format checks when `strict`.
    fn validate(&self, _strict: bool) -> Result<(), CoreError> {
        Ok(())
    }
}

/// A field-wise update: only the fields the patch carries are written.
pub trait Patch<T> {
    fn apply_to(self, record: &mut T);
}
