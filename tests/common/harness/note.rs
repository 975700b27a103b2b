//! Builder for test notes with sensible defaults.

use notegraph::domain::{NewNote, Visibility};

/// Builder for notes seeded directly through the library.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    content: String,
    visibility: Visibility,
    favorite: bool,
}

impl TestNote {
    /// Creates a new test note with the given title and no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            visibility: Visibility::default(),
            favorite: false,
        }
    }

    /// Sets the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the note as a favorite.
    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    /// Converts to the creation request.
    pub fn to_new_note(&self) -> NewNote {
        NewNote::new(&self.title)
            .content(&self.content)
            .visibility(self.visibility)
    }
}
