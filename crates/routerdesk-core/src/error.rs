// ── Core error types ──
//
// Every failure a console operation can produce. Nothing in the core
// panics or silently ignores a bad request: validation problems, unknown
// ids and duplicate keys all come back as typed variants so a UI can
// render them inline.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{entity_type} has no field named '{field}'")]
    UnknownField { entity_type: String, field: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("{entity_type} with {field} '{value}' already exists")]
    Conflict {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl CoreError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn required(field: impl Into<String>) -> Self {
        Self::validation(field, "a value is required")
    }

    pub(crate) fn not_found(entity_type: impl Into<String>, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.to_string(),
        }
    }

    pub(crate) fn unknown_field(entity_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity_type: entity_type.into(),
            field: field.into(),
        }
    }

    /// The offending field, for validation-style errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. }
            | Self::UnknownField { field, .. }
            | Self::Conflict { field, .. } => Some(field),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CoreError::required("hostname").to_string(),
            "Invalid value for hostname: a value is required"
        );
        assert_eq!(
            CoreError::not_found("VRF", 9).to_string(),
            "VRF not found: 9"
        );
    }

    #[test]
    fn field_accessor() {
        assert_eq!(CoreError::required("rd").field(), Some("rd"));
        assert_eq!(CoreError::not_found("VLAN", 1).field(), None);
        assert!(CoreError::not_found("VLAN", 1).is_not_found());
    }
}
