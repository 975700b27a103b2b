//! Note rows: creation with slug uniqueness, lookups, field updates.

use super::Transaction;
use super::rows::{format_timestamp, parse_author, parse_note_id, parse_timestamp, parse_visibility};
use crate::domain::{Note, NoteId, Visibility};
use crate::store::{NoteQuery, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};

const NOTE_COLUMNS: &str =
    "n.id, n.title, n.slug, n.content, n.visibility, n.is_favorite, n.owner, n.created_at, n.updated_at";

/// Undecoded note row, read inside the rusqlite row callback.
struct NoteRow {
    id: String,
    title: String,
    slug: String,
    content: String,
    visibility: String,
    is_favorite: bool,
    owner: String,
    created_at: String,
    updated_at: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            slug: row.get(2)?,
            content: row.get(3)?,
            visibility: row.get(4)?,
            is_favorite: row.get(5)?,
            owner: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

impl Transaction<'_> {
    // ===========================================
    // Creation
    // ===========================================

    /// Inserts a new note row.
    ///
    /// Fails with `SlugConflict` before writing anything when another note
    /// already owns the slug. Tags on `note` are ignored; memberships are
    /// written by `reconcile_tags`.
    pub fn insert_note(&self, note: &Note) -> StoreResult<()> {
        if self.find_note_id_by_slug(note.slug())?.is_some() {
            return Err(StoreError::SlugConflict {
                slug: note.slug().to_string(),
            });
        }

        let result = self.conn().execute(
            "INSERT INTO notes (id, title, slug, content, visibility, is_favorite, owner, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                note.id().to_string(),
                note.title(),
                note.slug(),
                note.content(),
                note.visibility().as_str(),
                note.is_favorite(),
                note.owner().as_str(),
                format_timestamp(note.created_at()),
                format_timestamp(note.updated_at()),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            // Only the slug column carries a UNIQUE constraint; primary key and
            // NOT NULL failures report their own extended codes.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StoreError::SlugConflict {
                    slug: note.slug().to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    // ===========================================
    // Lookups
    // ===========================================

    /// Retrieves a note with its tags.
    pub fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let row = self
            .conn()
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes n WHERE n.id = ?1"),
                [id.to_string()],
                NoteRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(self.decode_note(row)?)),
            None => Ok(None),
        }
    }

    /// Retrieves a note, failing with `NoteNotFound` when it is missing.
    pub fn require_note(&self, id: &NoteId) -> StoreResult<Note> {
        self.get_note(id)?
            .ok_or_else(|| StoreError::note_not_found(id))
    }

    /// Returns whether a note with this id exists.
    pub fn note_exists(&self, id: &NoteId) -> StoreResult<bool> {
        let found = self
            .conn()
            .query_row("SELECT 1 FROM notes WHERE id = ?1", [id.to_string()], |_| {
                Ok(())
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Looks up the id of the note owning `slug`.
    pub fn find_note_id_by_slug(&self, slug: &str) -> StoreResult<Option<NoteId>> {
        let id: Option<String> = self
            .conn()
            .query_row("SELECT id FROM notes WHERE slug = ?1", [slug], |row| {
                row.get(0)
            })
            .optional()?;
        id.as_deref().map(parse_note_id).transpose()
    }

    /// Retrieves the note owning `slug`.
    pub fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        match self.find_note_id_by_slug(slug)? {
            Some(id) => self.get_note(&id),
            None => Ok(None),
        }
    }

    /// Finds notes whose id starts with `prefix` (case-insensitive).
    ///
    /// An empty or non-alphanumeric prefix matches nothing.
    pub fn find_notes_by_id_prefix(&self, prefix: &str) -> StoreResult<Vec<Note>> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(Vec::new());
        }
        let pattern = format!("{}%", prefix.to_ascii_uppercase());
        self.query_notes(
            &format!("SELECT {NOTE_COLUMNS} FROM notes n WHERE n.id LIKE ?1 ORDER BY n.id"),
            vec![Value::Text(pattern)],
        )
    }

    /// Lists notes matching `query`, most recently updated first.
    pub fn list_notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>> {
        let mut sql = format!("SELECT {NOTE_COLUMNS} FROM notes n");
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            if let Some(tag_name) = search.strip_prefix('#') {
                sql.push_str(
                    " JOIN note_tags nt ON nt.note_id = n.id JOIN tags t ON t.id = nt.tag_id",
                );
                conditions.push("t.name = ?");
                values.push(Value::Text(tag_name.to_string()));
            } else {
                conditions.push("n.title LIKE ? ESCAPE '\\'");
                values.push(Value::Text(format!("%{}%", escape_like(search))));
            }
        }

        if let Some(favorite) = query.favorite {
            conditions.push("n.is_favorite = ?");
            values.push(Value::Integer(i64::from(favorite)));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY n.updated_at DESC, n.rowid DESC LIMIT ?");
        values.push(Value::Integer(query.limit.try_into().unwrap_or(i64::MAX)));

        self.query_notes(&sql, values)
    }

    /// Returns every note id with its content, in creation order.
    pub fn all_note_contents(&self) -> StoreResult<Vec<(NoteId, String)>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, content FROM notes ORDER BY created_at, rowid")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(id, content)| Ok((parse_note_id(&id)?, content)))
            .collect()
    }

    // ===========================================
    // Field Updates
    // ===========================================

    /// Replaces a note's content. Callers record the superseded content
    /// first via `record_if_changed`.
    pub fn update_note_content(
        &self,
        id: &NoteId,
        content: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.update_note_field(id, "content", Value::Text(content.to_string()), now)
    }

    /// Replaces a note's title. The slug is left unchanged.
    pub fn update_note_title(&self, id: &NoteId, title: &str, now: DateTime<Utc>) -> StoreResult<()> {
        self.update_note_field(id, "title", Value::Text(title.to_string()), now)
    }

    pub fn update_note_visibility(
        &self,
        id: &NoteId,
        visibility: Visibility,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.update_note_field(
            id,
            "visibility",
            Value::Text(visibility.as_str().to_string()),
            now,
        )
    }

    pub fn update_note_favorite(
        &self,
        id: &NoteId,
        is_favorite: bool,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.update_note_field(id, "is_favorite", Value::Integer(i64::from(is_favorite)), now)
    }

    fn update_note_field(
        &self,
        id: &NoteId,
        column: &'static str,
        value: Value,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let rows = self.conn().execute(
            &format!("UPDATE notes SET {column} = ?1, updated_at = ?2 WHERE id = ?3"),
            params![value, format_timestamp(now), id.to_string()],
        )?;
        if rows == 0 {
            return Err(StoreError::note_not_found(id));
        }
        Ok(())
    }

    // ===========================================
    // Deletion
    // ===========================================

    /// Deletes the note row. Returns `false` when there was none.
    pub fn delete_note_row(&self, id: &NoteId) -> StoreResult<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ===========================================
    // Decoding
    // ===========================================

    fn query_notes(&self, sql: &str, values: Vec<Value>) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt
            .query_map(params_from_iter(values), NoteRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(|row| self.decode_note(row)).collect()
    }

    fn decode_note(&self, row: NoteRow) -> StoreResult<Note> {
        let id = parse_note_id(&row.id)?;
        let tags = self.tags_for_note(&id)?;
        Ok(Note::builder(
            id,
            row.title,
            row.slug,
            parse_author(&row.owner)?,
            parse_timestamp(&row.created_at)?,
        )
        .content(row.content)
        .visibility(parse_visibility(&row.visibility)?)
        .favorite(row.is_favorite)
        .updated_at(parse_timestamp(&row.updated_at)?)
        .tags(tags)
        .build())
    }
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
