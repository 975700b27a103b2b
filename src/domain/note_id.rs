//! ULID-based note identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// A unique identifier for notes based on ULID.
///
/// Rendered as a 26-character Crockford Base32 string. The first ten
/// characters encode the creation millisecond and double as a short handle
/// in CLI output.
///
/// # Examples
///
/// ```
/// use notegraph::domain::NoteId;
///
/// let id: NoteId = "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap();
/// assert_eq!(id.prefix(), "01HQ3K5M7N");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(Ulid);

/// Error returned when parsing an invalid note identifier.
#[derive(Debug, Clone, Error)]
#[error("invalid note id '{value}': {reason}")]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl NoteId {
    /// Creates a new NoteId stamped with the current time.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Creates a NoteId from a millisecond timestamp with zero randomness.
    ///
    /// Deterministic; meant for fixtures and benchmarks.
    pub fn from_timestamp_ms(ms: u64) -> Self {
        Self(Ulid::from_parts(ms, 0))
    }

    /// Returns the 10-character short handle.
    pub fn prefix(&self) -> String {
        self.0.to_string()[..10].to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim())
            .map(NoteId)
            .map_err(|e| ParseNoteIdError {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn new_ids_are_unique() {
        let ids: HashSet<NoteId> = (0..100).map(|_| NoteId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let id = NoteId::new();
        let parsed: NoteId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_accepts_surrounding_whitespace() {
        let id: NoteId = "  01HQ3K5M7NXJK4QZPW8V2R6T9Y\n".parse().unwrap();
        assert_eq!(id.to_string(), "01HQ3K5M7NXJK4QZPW8V2R6T9Y");
    }

    #[test]
    fn parse_rejects_short_input() {
        let err = "01HQ3K5M".parse::<NoteId>().unwrap_err();
        assert!(err.to_string().contains("01HQ3K5M"));
    }

    #[test]
    fn parse_rejects_invalid_characters() {
        assert!("01HQ3K5M7NXJK4QZPW8V2R6T9!".parse::<NoteId>().is_err());
    }

    #[test]
    fn from_timestamp_ms_is_deterministic_and_ordered() {
        let a = NoteId::from_timestamp_ms(1_704_067_200_000);
        let b = NoteId::from_timestamp_ms(1_704_067_200_000);
        let c = NoteId::from_timestamp_ms(1_704_067_201_000);
        assert_eq!(a, b);
        assert!(a < c);
    }

    #[test]
    fn serde_uses_plain_string() {
        let id: NoteId = "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"01HQ3K5M7NXJK4QZPW8V2R6T9Y\"");
        let back: NoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
