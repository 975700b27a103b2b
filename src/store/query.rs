//! Note listing filters.

/// Default cap on listed notes.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Filter for listing notes, newest update first.
#[derive(Debug, Clone)]
pub struct NoteQuery {
    /// `#name` filters by exact tag name; anything else is a
    /// case-insensitive title substring.
    pub search: Option<String>,
    pub favorite: Option<bool>,
    pub limit: usize,
}

impl Default for NoteQuery {
    fn default() -> Self {
        Self {
            search: None,
            favorite: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl NoteQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
