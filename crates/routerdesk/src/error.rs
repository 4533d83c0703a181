//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use routerdesk_config::ConfigError;
use routerdesk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Records ──────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(routerdesk::not_found),
        help("Run: routerdesk {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} with {field} '{value}' already exists")]
    #[diagnostic(
        code(routerdesk::conflict),
        help("Pick another {field}, or allow duplicates with --duplicates allow")
    )]
    Conflict {
        resource_type: String,
        field: String,
        value: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(routerdesk::validation))]
    Validation { field: String, reason: String },

    #[error("{resource_type} has no field named '{field}'")]
    #[diagnostic(code(routerdesk::unknown_field))]
    UnknownField { resource_type: String, field: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(routerdesk::config),
        help("Inspect the file with: routerdesk config show\nLocate it with: routerdesk config path")
    )]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(routerdesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("'{command}' is not available inside the shell")]
    #[diagnostic(code(routerdesk::shell))]
    NotInShell { command: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(routerdesk::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(routerdesk::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::UnknownField { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NotInShell { .. } => exit_code::USAGE,
            Self::Config(err)
                if matches!(
                    **err,
                    ConfigError::Validation { .. } | ConfigError::UnknownKey(_)
                ) =>
            {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::UnknownField { entity_type, field } => CliError::UnknownField {
                resource_type: entity_type,
                field,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Conflict {
                entity_type,
                field,
                value,
            } => CliError::Conflict {
                resource_type: entity_type,
                field,
                value,
            },
        }
    }
}

/// The listing that shows records of this kind.
fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "Interface" => "interfaces list",
        "DHCP reservation" => "dhcp reservations list",
        "DHCP lease" => "dhcp leases list",
        "Static route" => "routing routes list",
        "OSPF area" => "routing ospf-areas list",
        "BGP neighbor" => "routing bgp-neighbors list",
        "VLAN" => "vlans list",
        "Switch port" => "vlans ports",
        "VRF" | "VRF interface" => "vrfs list",
        "Firewall rule" => "firewall list",
        "Access control entry" => "firewall access",
        "Traffic class" => "qos classes",
        "Application rule" => "qos apps",
        "Device limit" => "qos limits",
        "Log entry" => "logs list",
        "Interface statistics" => "monitoring interfaces",
        _ => "dashboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_exit_codes() {
        let not_found: CliError = CoreError::NotFound {
            entity_type: "VLAN".into(),
            identifier: "9".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(
            not_found,
            CliError::NotFound { ref list_command, .. } if list_command == "vlans list"
        ));

        let conflict: CliError = CoreError::Conflict {
            entity_type: "VRF".into(),
            field: "name".into(),
            value: "MGMT".into(),
        }
        .into();
        assert_eq!(conflict.exit_code(), exit_code::CONFLICT);

        let invalid: CliError = CoreError::Validation {
            field: "mac".into(),
            reason: "a value is required".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn bad_config_key_is_a_usage_error() {
        let err: CliError = ConfigError::UnknownKey("nope".into()).into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(
            CliError::from(std::io::Error::other("disk")).exit_code(),
            exit_code::GENERAL
        );
    }
}
