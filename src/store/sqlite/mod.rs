//! SQLite-backed note graph storage.
//!
//! Every read and write goes through a [`Transaction`]; the concern-specific
//! methods (notes, links, tags, revisions, backlinks, export) live in the
//! submodules as `impl Transaction` blocks so that any combination of them
//! composes into one atomic unit.

mod backlinks;
mod connection;
mod export;
mod links;
mod notes;
mod revisions;
mod rows;
mod tags;
mod transaction;


use rusqlite::Connection;

pub use transaction::{Transaction, TransactionMode};

/// SQLite-backed note graph store.
///
/// Owns one database connection. Not `Sync`; concurrent callers open one
/// store each (see `NoteGraphService`).
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
