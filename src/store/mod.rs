//! SQLite persistence for notes, links, tags and revisions.
//!
//! Every concern is an `impl Transaction` block, so a caller can compose
//! several of them inside one transaction and commit once.

mod error;
mod query;
mod schema;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use query::{DEFAULT_LIST_LIMIT, NoteQuery};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction, TransactionMode};

use std::time::Duration;

/// Default wait for a competing writer before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}
