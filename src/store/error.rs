//! Error type for store and graph operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or mutating the note graph.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note does not exist.
    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    /// The requested revision does not exist.
    #[error("revision not found: {id}")]
    RevisionNotFound { id: String },

    /// Another note already owns the slug derived from the requested title.
    #[error("a note with slug '{slug}' already exists")]
    SlugConflict { slug: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn note_not_found(id: impl ToString) -> Self {
        StoreError::NoteNotFound { id: id.to_string() }
    }

    /// True for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NoteNotFound { .. } | StoreError::RevisionNotFound { .. }
        )
    }

    /// True when the operation was rejected because of a slug collision.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::SlugConflict { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
