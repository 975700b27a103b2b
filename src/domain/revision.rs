//! Content revisions.

use crate::domain::{AuthorId, NoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of revisions kept per note.
pub const MAX_REVISIONS_PER_NOTE: usize = 5;

/// Storage identifier of a revision. Increases with insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(pub i64);

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RevisionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RevisionId)
    }
}

/// Snapshot of a note's content as it was *before* an edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Revision {
    pub id: RevisionId,
    pub note_id: NoteId,
    pub author: AuthorId,
    pub content_snapshot: String,
    pub created_at: DateTime<Utc>,
}
