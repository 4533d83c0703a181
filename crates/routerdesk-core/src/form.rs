// ── Create/edit dialog state ──
//
// A `FormController` buffers string edits for one dialog. Nothing touches
// the store until `commit`, and a failed commit keeps the draft so the
// user can fix the offending field.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::CoreError;
use crate::model::RecordId;
use crate::store::{Record, RecordStore};
use crate::validate;

/// Describes one input of a dialog so UIs can render forms generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Allowed values for enum-like fields; empty for free text.
    pub choices: &'static [&'static str],
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
            choices: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }
}

/// The editable buffer behind a dialog.
///
/// Drafts hold every field as text, the way it was typed. Typed fields are
/// checked as they are set and converted for real in `build`/`merge_into`.
pub trait Draft: Clone + Default + fmt::Debug {
    type Record: Record;

    const FIELDS: &'static [FieldSpec];

    /// Edit-only drafts (interfaces, switch ports) refuse to create.
    const CREATABLE: bool = true;

    fn field(&self, name: &str) -> Option<&str>;

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError>;

    /// Seed a draft from an existing record for editing.
    fn from_record(record: &Self::Record) -> Self;

    /// Turn the draft into a new record. The store assigns the id.
    fn build(&self) -> Result<Self::Record, CoreError>;

    /// Write every draft field over `record` (a full-object merge).
    fn merge_into(&self, record: &mut Self::Record) -> Result<(), CoreError>;

    fn check_required(&self) -> Result<(), CoreError> {
        for spec in Self::FIELDS.iter().filter(|s| s.required) {
            validate::require(spec.name, self.field(spec.name).unwrap_or_default())?;
        }
        Ok(())
    }
}

/// Keep `value` if it is blank or parses as `N`.
pub(crate) fn typed<N: FromStr>(field: &str, value: &str) -> Result<String, CoreError> {
    if !value.trim().is_empty() {
        validate::number::<N>(field, value)?;
    }
    Ok(value.trim().to_owned())
}

/// Keep `value` if it is blank or names one of an enum's variants.
pub(crate) fn typed_choice<E: FromStr>(
    field: &str,
    value: &str,
    expected: &str,
) -> Result<String, CoreError> {
    if !value.trim().is_empty() {
        validate::choice::<E>(field, value, expected)?;
    }
    Ok(value.trim().to_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// Drives one create or edit dialog for records of `D::Record`.
#[derive(Debug, Clone)]
pub struct FormController<D: Draft> {
    mode: FormMode,
    draft: D,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self::create()
    }
}

impl<D: Draft> FormController<D> {
    /// Blank create dialog.
    pub fn create() -> Self {
        Self::with_draft(D::default())
    }

    /// Create dialog pre-filled with `draft`.
    pub fn with_draft(draft: D) -> Self {
        Self {
            mode: FormMode::Create,
            draft,
        }
    }

    /// Edit dialog seeded from a copy of the stored record.
    pub fn edit(store: &RecordStore<D::Record>, id: RecordId) -> Result<Self, CoreError> {
        let record = store.require(id)?;
        Ok(Self {
            mode: FormMode::Edit(id),
            draft: D::from_record(record),
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        D::FIELDS
    }

    pub fn value(&self, name: &str) -> &str {
        self.draft.field(name).unwrap_or_default()
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        self.draft.set_field(name, value)
    }

    /// Validate the draft and write it to `store`.
    ///
    /// On success the dialog resets to a blank create form. On failure the
    /// draft is kept and the store is unchanged.
    pub fn commit(&mut self, store: &mut RecordStore<D::Record>) -> Result<D::Record, CoreError> {
        self.draft.check_required()?;
        let saved = match self.mode {
            FormMode::Create => {
                if !D::CREATABLE {
                    return Err(CoreError::validation(
                        D::Record::KIND,
                        "records of this kind can only be edited",
                    ));
                }
                let record = self.draft.build()?;
                store.add(record)?.clone()
            }
            FormMode::Edit(id) => {
                let draft = &self.draft;
                store.update_with(id, |record| draft.merge_into(record))?.clone()
            }
        };
        debug!(kind = D::Record::KIND, id = %saved.id(), "form committed");
        self.cancel();
        Ok(saved)
    }

    /// Discard the draft and return to a blank create form.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Create;
        self.draft = D::default();
    }
}
