//! Incoming links with context snippets.

use super::Transaction;
use super::rows::parse_note_id;
use crate::domain::{Backlink, NoteId, extract_snippet};
use crate::store::{StoreError, StoreResult};
use rusqlite::OptionalExtension;

impl Transaction<'_> {
    /// Notes linking to `target`, ordered by source title then id.
    ///
    /// Each snippet is cut from the source's current content around the
    /// target's current title, so it is empty when the source text names
    /// the target by an older title.
    pub fn backlinks(&self, target: &NoteId) -> StoreResult<Vec<Backlink>> {
        let title: Option<String> = self
            .conn()
            .query_row(
                "SELECT title FROM notes WHERE id = ?1",
                [target.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let title = title.ok_or_else(|| StoreError::note_not_found(target))?;

        let mut stmt = self.conn().prepare(
            "SELECT n.id, n.title, n.content FROM links l
             JOIN notes n ON n.id = l.source_id
             WHERE l.target_id = ?1
             ORDER BY n.title, n.id",
        )?;
        let rows = stmt
            .query_map([target.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, source_title, content)| {
                Ok(Backlink {
                    source_id: parse_note_id(&id)?,
                    source_title,
                    snippet: extract_snippet(&content, &title),
                })
            })
            .collect()
    }
}
