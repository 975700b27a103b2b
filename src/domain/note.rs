//! Note records and mutation requests.

use crate::domain::{AuthorId, NoteId, Tag, Visibility};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored note as read back from the database.
///
/// The slug is fixed when the note is created; later title edits keep it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    slug: String,
    content: String,
    visibility: Visibility,
    is_favorite: bool,
    owner: AuthorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: Vec<Tag>,
}

impl Note {
    /// Creates a builder with the fields every note has.
    pub fn builder(
        id: NoteId,
        title: impl Into<String>,
        slug: impl Into<String>,
        owner: AuthorId,
        created_at: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder {
            id,
            title: title.into(),
            slug: slug.into(),
            content: String::new(),
            visibility: Visibility::default(),
            is_favorite: false,
            owner,
            created_at,
            updated_at: created_at,
            tags: Vec::new(),
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn owner(&self) -> &AuthorId {
        &self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Tags the note currently carries, ordered by name.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Builder for constructing a Note.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    slug: String,
    content: String,
    visibility: Visibility,
    is_favorite: bool,
    owner: AuthorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: Vec<Tag>,
}

impl NoteBuilder {
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn build(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            visibility: self.visibility,
            is_favorite: self.is_favorite,
            owner: self.owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags: self.tags,
        }
    }
}

/// Request to create a note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub visibility: Visibility,
}

impl NewNote {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Partial update of a note. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub content: Option<String>,
    pub title: Option<String>,
    pub visibility: Option<Visibility>,
    pub favorite: Option<bool>,
}

impl NoteChanges {
    /// Changes only the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.title.is_none()
            && self.visibility.is_none()
            && self.favorite.is_none()
    }
}
