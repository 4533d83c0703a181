// ── Generic ordered record store ──
//
// Insertion-ordered storage keyed by `RecordId`. Ids come from a monotonic
// counter that never goes backwards, and every mutation bumps a version
// counter so views can cheaply detect staleness.

use indexmap::IndexMap;
use tracing::debug;

use super::{Patch, Record};
use crate::config::{DuplicatePolicy, ValidationPolicy};
use crate::error::CoreError;
use crate::model::{RecordId, TwoState};

/// An ordered, in-memory collection for a single record type.
///
/// Every write goes through the same gate: the candidate record is built
/// off to the side, validated against the store's [`ValidationPolicy`],
/// and only then swapped in. A failed write leaves the store untouched.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    records: IndexMap<RecordId, T>,
    /// Highest id ever handed out (or seeded).
    last_id: RecordId,
    policy: ValidationPolicy,
    version: u64,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::with_policy(ValidationPolicy::default())
    }

    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            records: IndexMap::new(),
            last_id: RecordId::default(),
            policy,
            version: 0,
        }
    }

    /// Build a store from seed rows, keeping their ids.
    ///
    /// The id counter resumes after the highest seeded id. Seeds bypass
    /// validation.
    pub fn seeded(policy: ValidationPolicy, rows: impl IntoIterator<Item = T>) -> Self {
        let mut store = Self::with_policy(policy);
        for row in rows {
            store.last_id = store.last_id.max(row.id());
            store.records.insert(row.id(), row);
        }
        store
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ValidationPolicy) {
        self.policy = policy;
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a record under the next id.
    pub fn add(&mut self, mut record: T) -> Result<&T, CoreError> {
        let id = self.last_id.next();
        record.set_id(id);
        self.check(&record, None)?;

        self.last_id = id;
        self.records.insert(id, record);
        self.bump();
        debug!(kind = T::KIND, %id, "record added");
        self.require(id)
    }

    /// Merge a field-wise patch into an existing record.
    pub fn update<P: Patch<T>>(&mut self, id: RecordId, patch: P) -> Result<&T, CoreError> {
        self.update_with(id, |record| {
            patch.apply_to(record);
            Ok(())
        })
    }

    /// Edit a copy of the record and store it if the edit succeeds.
    pub fn update_with<F>(&mut self, id: RecordId, edit: F) -> Result<&T, CoreError>
    where
        F: FnOnce(&mut T) -> Result<(), CoreError>,
    {
        let mut candidate = self.require(id)?.clone();
        edit(&mut candidate)?;
        candidate.set_id(id);
        self.check(&candidate, Some(id))?;

        if let Some(slot) = self.records.get_mut(&id) {
            *slot = candidate;
        }
        self.bump();
        debug!(kind = T::KIND, %id, "record updated");
        self.require(id)
    }

    /// Flip a two-state field.
    pub fn toggle<S, F>(&mut self, id: RecordId, field: F) -> Result<&T, CoreError>
    where
        S: TwoState,
        F: FnOnce(&mut T) -> &mut S,
    {
        self.update_with(id, |record| {
            let state = field(record);
            *state = state.toggled();
            Ok(())
        })
    }

    /// Remove a record, preserving the order of the rest.
    pub fn remove(&mut self, id: RecordId) -> Result<T, CoreError> {
        let removed = self
            .records
            .shift_remove(&id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;
        self.bump();
        debug!(kind = T::KIND, %id, "record removed");
        Ok(removed)
    }

    /// Remove every record matching `pred`, returning them in order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let ids: Vec<RecordId> = self
            .records
            .iter()
            .filter(|(_, r)| pred(r))
            .map(|(id, _)| *id)
            .collect();
        let removed: Vec<T> = ids
            .iter()
            .filter_map(|id| self.records.shift_remove(id))
            .collect();
        if !removed.is_empty() {
            self.bump();
            debug!(kind = T::KIND, count = removed.len(), "records removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            self.records.clear();
            self.bump();
            debug!(kind = T::KIND, "store cleared");
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.get(&id)
    }

    /// Like [`get`](Self::get), but an unknown id is a `NotFound` error.
    pub fn require(&self, id: RecordId) -> Result<&T, CoreError> {
        self.records
            .get(&id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.records.values().find(|r| pred(r))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.keys().copied()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn check(&self, candidate: &T, replacing: Option<RecordId>) -> Result<(), CoreError> {
        candidate.validate(self.policy.strict)?;
        if self.policy.duplicates == DuplicatePolicy::Reject {
            self.check_unique(candidate, replacing)?;
        }
        Ok(())
    }

    fn check_unique(&self, candidate: &T, replacing: Option<RecordId>) -> Result<(), CoreError> {
        let keys = candidate.unique_keys();
        for other in self.records.values() {
            if Some(other.id()) == replacing {
                continue;
            }
            let other_keys = other.unique_keys();
            for (field, value) in &keys {
                let clash = other_keys
                    .iter()
                    .any(|(f, v)| f == field && v.eq_ignore_ascii_case(value));
                if clash {
                    return Err(CoreError::Conflict {
                        entity_type: T::KIND.into(),
                        field: (*field).into(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validate;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Note {
        id: RecordId,
        title: String,
        body: String,
        pinned: bool,
    }

    impl Record for Note {
        const KIND: &'static str = "Note";

        fn id(&self) -> RecordId {
            self.id
        }
        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }
        fn label(&self) -> String {
            self.title.clone()
        }
        fn unique_keys(&self) -> Vec<(&'static str, String)> {
            vec![("title", self.title.clone())]
        }
        fn validate(&self, _strict: bool) -> Result<(), CoreError> {
            validate::require("title", &self.title)
        }
    }

    #[derive(Default)]
    struct NotePatch {
        body: Option<String>,
    }

    impl Patch<Note> for NotePatch {
        fn apply_to(self, note: &mut Note) {
            if let Some(body) = self.body {
                note.body = body;
            }
        }
    }

    fn note(title: &str) -> Note {
        Note {
            title: title.into(),
            ..Note::default()
        }
    }

    fn titles(store: &RecordStore<Note>) -> Vec<String> {
        store.iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn add_appends_with_fresh_ids() {
        let mut store = RecordStore::new();
        let a = store.add(note("a")).unwrap().id();
        let b = store.add(note("b")).unwrap().id();
        assert!(b > a);
        assert_eq!(titles(&store), ["a", "b"]);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn add_then_remove_restores_contents() {
        let mut store = RecordStore::new();
        store.add(note("a")).unwrap();
        let before = store.to_vec();
        let id = store.add(note("b")).unwrap().id();
        store.remove(id).unwrap();
        assert_eq!(store.to_vec(), before);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = RecordStore::new();
        let first = store.add(note("a")).unwrap().id();
        store.remove(first).unwrap();
        let second = store.add(note("b")).unwrap().id();
        assert_ne!(first, second);
    }

    #[test]
    fn seeded_store_continues_after_highest_id() {
        let rows = [3, 7].map(|n| Note {
            id: RecordId::new(n),
            title: format!("n{n}"),
            ..Note::default()
        });
        let mut store = RecordStore::seeded(ValidationPolicy::default(), rows);
        assert_eq!(store.add(note("x")).unwrap().id(), RecordId::new(8));
    }

    #[test]
    fn update_changes_only_patched_fields() {
        let mut store = RecordStore::new();
        let id = store.add(note("a")).unwrap().id();
        let updated = store
            .update(
                id,
                NotePatch {
                    body: Some("hello".into()),
                },
            )
            .unwrap()
            .clone();
        assert_eq!(updated.title, "a");
        assert_eq!(updated.body, "hello");

        let untouched = store.update(id, NotePatch::default()).unwrap().clone();
        assert_eq!(untouched, updated);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store: RecordStore<Note> = RecordStore::new();
        let missing = RecordId::new(99);
        assert!(store.remove(missing).unwrap_err().is_not_found());
        assert!(
            store
                .update(missing, NotePatch::default())
                .unwrap_err()
                .is_not_found()
        );
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn failed_update_leaves_record_untouched() {
        let mut store = RecordStore::new();
        let id = store.add(note("a")).unwrap().id();
        let err = store
            .update_with(id, |n| {
                n.title.clear();
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("title"));
        assert_eq!(store.get(id).unwrap().title, "a");
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut store = RecordStore::new();
        let id = store.add(note("a")).unwrap().id();
        assert!(store.toggle(id, |n| &mut n.pinned).unwrap().pinned);
        assert!(!store.toggle(id, |n| &mut n.pinned).unwrap().pinned);
    }

    #[test]
    fn remove_where_keeps_order_of_survivors() {
        let mut store = RecordStore::new();
        for t in ["a", "b", "c", "d"] {
            store.add(note(t)).unwrap();
        }
        let gone = store.remove_where(|n| n.title == "b" || n.title == "d");
        assert_eq!(gone.len(), 2);
        assert_eq!(titles(&store), ["a", "c"]);
    }

    #[test]
    fn duplicate_policy() {
        let mut allow = RecordStore::new();
        allow.add(note("a")).unwrap();
        assert!(allow.add(note("a")).is_ok());

        let mut reject = RecordStore::with_policy(ValidationPolicy {
            strict: false,
            duplicates: DuplicatePolicy::Reject,
        });
        let id = reject.add(note("a")).unwrap().id();
        let err = reject.add(note("A")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict { .. }));
        assert_eq!(reject.len(), 1);

        // A record never conflicts with itself.
        assert!(
            reject
                .update(
                    id,
                    NotePatch {
                        body: Some("x".into())
                    }
                )
                .is_ok()
        );
    }
}
