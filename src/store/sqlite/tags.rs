//! Tag catalog and note memberships.

use super::Transaction;
use super::rows::parse_note_id;
use crate::domain::{NoteId, Tag, TagId, TagWithCount};
use crate::store::StoreResult;
use rusqlite::params;
use std::collections::BTreeSet;

impl Transaction<'_> {
    /// Returns the tag named `name`, creating it if needed.
    ///
    /// Safe under concurrent creation: the unique name constraint makes the
    /// insert a no-op for the loser, which then reads the winner's row.
    pub fn ensure_tag(&self, name: &str) -> StoreResult<Tag> {
        self.conn()
            .execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [name])?;
        let id: i64 = self
            .conn()
            .query_row("SELECT id FROM tags WHERE name = ?1", [name], |row| row.get(0))?;
        Ok(Tag::new(TagId(id), name))
    }

    /// Makes `note` a member of exactly the tags named in `names`.
    ///
    /// Unknown names become new tags. Tags that lose their last member stay
    /// in the catalog. Returns the number of memberships now stored.
    pub fn reconcile_tags(&self, note: &NoteId, names: &BTreeSet<String>) -> StoreResult<usize> {
        let tags = names
            .iter()
            .map(|name| self.ensure_tag(name))
            .collect::<StoreResult<Vec<_>>>()?;

        let note_key = note.to_string();
        self.conn()
            .execute("DELETE FROM note_tags WHERE note_id = ?1", [&note_key])?;

        let mut stmt = self
            .conn()
            .prepare_cached("INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?1, ?2)")?;
        let mut stored = 0;
        for tag in &tags {
            stored += stmt.execute(params![note_key, tag.id.0])?;
        }
        Ok(stored)
    }

    /// Tags carried by `note`, ordered by name.
    pub fn tags_for_note(&self, note: &NoteId) -> StoreResult<Vec<Tag>> {
        let mut stmt = self.conn().prepare_cached(
            "SELECT t.id, t.name FROM tags t
             JOIN note_tags nt ON nt.tag_id = t.id
             WHERE nt.note_id = ?1
             ORDER BY t.name",
        )?;
        let tags = stmt
            .query_map([note.to_string()], |row| {
                Ok(Tag::new(TagId(row.get(0)?), row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// Every tag in the catalog, ordered by name.
    pub fn all_tags(&self) -> StoreResult<Vec<Tag>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name FROM tags ORDER BY name")?;
        let tags = stmt
            .query_map([], |row| Ok(Tag::new(TagId(row.get(0)?), row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// Every tag with its member count, including tags with none.
    pub fn tag_counts(&self) -> StoreResult<Vec<TagWithCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT t.id, t.name, COUNT(nt.note_id) FROM tags t
             LEFT JOIN note_tags nt ON nt.tag_id = t.id
             GROUP BY t.id, t.name
             ORDER BY t.name",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok(TagWithCount {
                    tag: Tag::new(TagId(row.get(0)?), row.get::<_, String>(1)?),
                    count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    /// Every membership as `(note, tag)`, ordered by note then tag id.
    pub fn all_memberships(&self) -> StoreResult<Vec<(NoteId, TagId)>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT note_id, tag_id FROM note_tags ORDER BY note_id, tag_id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(note, tag)| Ok((parse_note_id(&note)?, TagId(tag))))
            .collect()
    }

    /// Removes every membership of `note`.
    pub fn delete_memberships(&self, note: &NoteId) -> StoreResult<usize> {
        Ok(self
            .conn()
            .execute("DELETE FROM note_tags WHERE note_id = ?1", [note.to_string()])?)
    }
}
