//! Bounded content history.

use super::Transaction;
use super::rows::{format_timestamp, parse_author, parse_note_id, parse_timestamp};
use crate::domain::{AuthorId, MAX_REVISIONS_PER_NOTE, NoteId, Revision, RevisionId};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};

const REVISION_COLUMNS: &str = "id, note_id, author, content_snapshot, created_at";

struct RevisionRow {
    id: i64,
    note_id: String,
    author: String,
    content_snapshot: String,
    created_at: String,
}

impl RevisionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            note_id: row.get(1)?,
            author: row.get(2)?,
            content_snapshot: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn decode(self) -> StoreResult<Revision> {
        Ok(Revision {
            id: RevisionId(self.id),
            note_id: parse_note_id(&self.note_id)?,
            author: parse_author(&self.author)?,
            content_snapshot: self.content_snapshot,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl Transaction<'_> {
    /// Snapshots the note's current content if `new_content` differs from it.
    ///
    /// Returns `None` without writing when the content is unchanged.
    /// Otherwise records the old content and prunes the note's history to
    /// the newest [`MAX_REVISIONS_PER_NOTE`], never dropping the snapshot
    /// just written.
    pub fn record_if_changed(
        &self,
        note: &NoteId,
        new_content: &str,
        author: &AuthorId,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<RevisionId>> {
        let note_key = note.to_string();
        let current: Option<String> = self
            .conn()
            .query_row("SELECT content FROM notes WHERE id = ?1", [&note_key], |row| {
                row.get(0)
            })
            .optional()?;
        let current = current.ok_or_else(|| StoreError::note_not_found(note))?;

        if current == new_content {
            return Ok(None);
        }

        self.conn().execute(
            "INSERT INTO revisions (note_id, author, content_snapshot, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![note_key, author.as_str(), current, format_timestamp(now)],
        )?;
        let id = self.conn().last_insert_rowid();

        // Ties on created_at fall back to insertion order.
        self.conn().execute(
            "DELETE FROM revisions
             WHERE note_id = ?1 AND id != ?2 AND id NOT IN (
                 SELECT id FROM revisions
                 WHERE note_id = ?1 AND id != ?2
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?3
             )",
            params![note_key, id, (MAX_REVISIONS_PER_NOTE - 1) as i64],
        )?;

        Ok(Some(RevisionId(id)))
    }

    /// Revisions of `note`, newest first.
    pub fn list_revisions(&self, note: &NoteId) -> StoreResult<Vec<Revision>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {REVISION_COLUMNS} FROM revisions
             WHERE note_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([note.to_string()], RevisionRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RevisionRow::decode).collect()
    }

    pub fn get_revision(&self, id: RevisionId) -> StoreResult<Option<Revision>> {
        let row = self
            .conn()
            .query_row(
                &format!("SELECT {REVISION_COLUMNS} FROM revisions WHERE id = ?1"),
                [id.0],
                RevisionRow::from_row,
            )
            .optional()?;
        row.map(RevisionRow::decode).transpose()
    }

    /// Deletes a single revision, failing with `RevisionNotFound` when it
    /// does not exist.
    pub fn delete_revision(&self, id: RevisionId) -> StoreResult<()> {
        let rows = self
            .conn()
            .execute("DELETE FROM revisions WHERE id = ?1", [id.0])?;
        if rows == 0 {
            return Err(StoreError::RevisionNotFound { id: id.to_string() });
        }
        Ok(())
    }

    /// Deletes the whole history of `note`.
    pub fn delete_revisions_for(&self, note: &NoteId) -> StoreResult<usize> {
        Ok(self
            .conn()
            .execute("DELETE FROM revisions WHERE note_id = ?1", [note.to_string()])?)
    }
}
