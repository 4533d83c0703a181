// ── Record identity ──
//
// Every record in a store is addressed by a `RecordId`. Ids come from a
// per-store monotonic counter, so a deleted id is never handed out again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a record inside a [`RecordStore`](crate::store::RecordStore).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_hash_prefixed() {
        assert_eq!("7".parse::<RecordId>().unwrap(), RecordId::new(7));
        assert_eq!(" #12 ".parse::<RecordId>().unwrap(), RecordId::new(12));
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&RecordId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn next_increments() {
        assert_eq!(RecordId::new(4).next(), RecordId::new(5));
    }
}
