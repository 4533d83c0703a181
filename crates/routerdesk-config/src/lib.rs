//! Shared configuration for the routerdesk CLI and TUI.
//!
//! One TOML file plus `ROUTERDESK_*` environment overrides, translated into
//! `routerdesk_core::ConsoleConfig`. Both binaries depend on this crate; the
//! CLI layers its global flags on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use routerdesk_core::{ConsoleConfig, DuplicatePolicy, ValidationPolicy};

/// Values accepted by `defaults.output`.
pub const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];
/// Values accepted by `defaults.color`.
pub const COLOR_MODES: &[&str] = &["auto", "always", "never"];

/// Every key `Config::set` understands.
pub const KEYS: &[&str] = &[
    "defaults.output",
    "defaults.color",
    "validation.strict",
    "validation.duplicates",
    "console.hostname",
    "console.notification_capacity",
    "tui.tick_ms",
    "tui.toast_secs",
    "tui.log_file",
    "tui.export_file",
];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub validation: Validation,

    #[serde(default)]
    pub console: ConsoleSection,

    #[serde(default)]
    pub tui: TuiSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

/// Record validation applied on every create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Validation {
    /// Address, MAC, VLAN range and RD/RT format checks.
    #[serde(default)]
    pub strict: bool,

    /// `allow` or `reject` records whose unique key is already taken.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConsoleSection {
    /// Name shown in the terminal prompt and `show running-config`.
    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            notification_capacity: default_notification_capacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TuiSection {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// How long a toast stays on screen.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Where the Logs screen writes its JSON export.
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,
}

impl Default for TuiSection {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            toast_secs: default_toast_secs(),
            log_file: default_log_file(),
            export_file: default_export_file(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_hostname() -> String {
    "Router".into()
}
fn default_notification_capacity() -> usize {
    50
}
fn default_tick_ms() -> u64 {
    250
}
fn default_toast_secs() -> u64 {
    4
}
fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("routerdesk-tui.log")
}
fn default_export_file() -> PathBuf {
    std::env::temp_dir().join("routerdesk-logs.json")
}

impl Config {
    /// Translate into the core's per-session configuration.
    pub fn to_console_config(&self) -> ConsoleConfig {
        ConsoleConfig {
            validation: ValidationPolicy {
                strict: self.validation.strict,
                duplicates: self.validation.duplicates,
            },
            hostname: self.console.hostname.clone(),
            notification_capacity: self.console.notification_capacity,
        }
    }

    /// Set one dotted key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "defaults.output" => {
                self.defaults.output = one_of(key, value, OUTPUT_FORMATS)?;
            }
            "defaults.color" => {
                self.defaults.color = one_of(key, value, COLOR_MODES)?;
            }
            "validation.strict" => self.validation.strict = parse(key, value)?,
            "validation.duplicates" => self.validation.duplicates = parse(key, value)?,
            "console.hostname" => {
                if value.is_empty() || value.contains(char::is_whitespace) {
                    return Err(ConfigError::invalid(key, "must be a single word"));
                }
                self.console.hostname = value.into();
            }
            "console.notification_capacity" => {
                let capacity: usize = parse(key, value)?;
                if capacity == 0 {
                    return Err(ConfigError::invalid(key, "must be at least 1"));
                }
                self.console.notification_capacity = capacity;
            }
            "tui.tick_ms" => self.tui.tick_ms = parse(key, value)?,
            "tui.toast_secs" => self.tui.toast_secs = parse(key, value)?,
            "tui.log_file" => self.tui.log_file = PathBuf::from(value),
            "tui.export_file" => self.tui.export_file = PathBuf::from(value),
            other => return Err(ConfigError::UnknownKey(other.into())),
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{value}'")))
}

fn one_of(key: &str, value: &str, allowed: &[&str]) -> Result<String, ConfigError> {
    let lower = value.to_ascii_lowercase();
    if allowed.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(ConfigError::invalid(
            key,
            format!("expected one of {}, got '{value}'", allowed.join(", ")),
        ))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "routerdesk", "routerdesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("routerdesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ROUTERDESK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to the defaults on any error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.console.hostname, "Router");
        assert_eq!(cfg.validation.duplicates, DuplicatePolicy::Allow);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set("validation.duplicates", "reject").unwrap();
        cfg.set("validation.strict", "true").unwrap();
        cfg.set("console.hostname", "edge-01").unwrap();
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.validation, cfg.validation);
        assert_eq!(loaded.console.hostname, "edge-01");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[validation]\nstrict = true\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert!(cfg.validation.strict);
        assert_eq!(cfg.tui.tick_ms, 250);
        assert!(cfg.tui.export_file.ends_with("routerdesk-logs.json"));
        assert_eq!(cfg.console.notification_capacity, 50);
    }

    #[test]
    fn console_config_carries_policy() {
        let mut cfg = Config::default();
        cfg.set("validation.duplicates", "REJECT").unwrap();
        let console = cfg.to_console_config();
        assert_eq!(console.validation.duplicates, DuplicatePolicy::Reject);
        assert!(!console.validation.strict);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("defaults.output", "xml"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            cfg.set("console.notification_capacity", "0"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            cfg.set("nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        cfg.set("defaults.output", "YAML").unwrap();
        assert_eq!(cfg.defaults.output, "yaml");
    }
}
