//! Conversions between stored column values and domain types.

use crate::domain::{AuthorId, NoteId, Visibility};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 with microseconds, so text order equals time order.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid timestamp '{s}': {e}")))
}

pub(crate) fn parse_note_id(s: &str) -> StoreResult<NoteId> {
    s.parse()
        .map_err(|e| StoreError::Corrupt(format!("invalid note id in database: {e}")))
}

pub(crate) fn parse_visibility(s: &str) -> StoreResult<Visibility> {
    s.parse()
        .map_err(|e| StoreError::Corrupt(format!("invalid visibility in database: {e}")))
}

pub(crate) fn parse_author(s: &str) -> StoreResult<AuthorId> {
    AuthorId::new(s).map_err(|e| StoreError::Corrupt(format!("invalid author in database: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamps_round_trip_with_microseconds() {
        let ts = Utc.timestamp_opt(1_705_314_600, 123_456_000).unwrap();
        let text = format_timestamp(ts);
        assert_eq!(text, "2024-01-15T10:30:00.123456Z");
        assert_eq!(parse_timestamp(&text).unwrap(), ts);
    }

    #[test]
    fn timestamp_text_sorts_chronologically() {
        let earlier = format_timestamp(Utc.timestamp_opt(1_705_314_600, 900_000_000).unwrap());
        let later = format_timestamp(Utc.timestamp_opt(1_705_314_601, 0).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn bad_values_are_reported_as_corrupt() {
        assert!(matches!(parse_timestamp("yesterday"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_note_id("nope"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_visibility("secret"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_author(""), Err(StoreError::Corrupt(_))));
    }
}
