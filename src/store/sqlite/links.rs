//! Link edges between notes.

use super::Transaction;
use super::rows::parse_note_id;
use crate::domain::NoteId;
use crate::infra::slugify;
use crate::store::StoreResult;
use rusqlite::params;
use std::collections::BTreeSet;
use tracing::trace;

impl Transaction<'_> {
    /// Replaces every outgoing edge of `source` with edges to the notes
    /// named by `titles`.
    ///
    /// Each title resolves through its slug. Titles that name no existing
    /// note are skipped. Returns the number of edges now stored.
    pub fn reconcile_links(&self, source: &NoteId, titles: &BTreeSet<String>) -> StoreResult<usize> {
        let source_key = source.to_string();
        self.conn()
            .execute("DELETE FROM links WHERE source_id = ?1", [&source_key])?;

        let mut stmt = self
            .conn()
            .prepare_cached("INSERT OR IGNORE INTO links (source_id, target_id) VALUES (?1, ?2)")?;
        let mut stored = 0;
        for title in titles {
            let slug = slugify(title);
            match self.find_note_id_by_slug(&slug)? {
                Some(target) => {
                    stored += stmt.execute(params![source_key, target.to_string()])?;
                }
                None => trace!(%source, title = %title, "unresolved wikilink"),
            }
        }
        Ok(stored)
    }

    /// Returns the targets `source` links to, ordered by id.
    pub fn outgoing_links(&self, source: &NoteId) -> StoreResult<Vec<NoteId>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT target_id FROM links WHERE source_id = ?1 ORDER BY target_id")?;
        let ids = stmt
            .query_map([source.to_string()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids.iter().map(|id| parse_note_id(id)).collect()
    }

    /// Returns every edge as `(source, target)`, ordered by source then target.
    pub fn all_links(&self) -> StoreResult<Vec<(NoteId, NoteId)>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT source_id, target_id FROM links ORDER BY source_id, target_id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.iter()
            .map(|(s, t)| Ok((parse_note_id(s)?, parse_note_id(t)?)))
            .collect()
    }

    /// Deletes every edge where `id` is the source or the target.
    pub fn delete_links_touching(&self, id: &NoteId) -> StoreResult<usize> {
        Ok(self.conn().execute(
            "DELETE FROM links WHERE source_id = ?1 OR target_id = ?1",
            [id.to_string()],
        )?)
    }
}
