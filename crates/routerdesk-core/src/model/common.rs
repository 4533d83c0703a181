// ── Common types shared across the domain model ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A field that flips between two states.
///
/// `toggled` maps the first state to the second and *anything else* back to
/// the first, so a three-valued enum (e.g. access with a "restricted"
/// middle ground) still toggles predictably.
pub trait TwoState: Copy + PartialEq {
    const STATES: [Self; 2];

    fn toggled(self) -> Self {
        let [first, second] = Self::STATES;
        if self == first { second } else { first }
    }
}

impl TwoState for bool {
    const STATES: [Self; 2] = [true, false];
}

/// Generic active/inactive status (VRFs, firewall rules, application rules).
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
pub enum ActivityStatus {
    Active,
    #[default]
    Inactive,
}

impl ActivityStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl TwoState for ActivityStatus {
    const STATES: [Self; 2] = [Self::Active, Self::Inactive];
}

/// Traffic priority used by QoS classes, application rules and device limits.
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
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        let s = ActivityStatus::Active;
        assert_eq!(s.toggled(), ActivityStatus::Inactive);
        assert_eq!(s.toggled().toggled(), s);
        assert!(!true.toggled());
        assert!(!false.toggled().toggled());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ACTIVE".parse::<ActivityStatus>(), Ok(ActivityStatus::Active));
        assert_eq!("Low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!(Priority::High.to_string(), "high");
    }
}
