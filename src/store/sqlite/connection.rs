//! Connection management for SqliteStore.

use super::SqliteStore;
use super::transaction::{Transaction, TransactionMode};
use crate::store::{StoreError, StoreOptions, StoreResult, create_schema};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens a private in-memory database with the schema applied.
    ///
    /// Useful for tests; the data disappears with the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates the database at `path` and applies the schema.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open(path: &Path, options: &StoreOptions) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self::connect(path, options)?;
        create_schema(&store.conn)?;
        Ok(store)
    }

    /// Opens a connection to an existing database without touching the
    /// schema.
    pub fn connect(path: &Path, options: &StoreOptions) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(options.busy_timeout)?;
        // WAL lets snapshot readers run alongside the single writer.
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ===========================================
    // Transaction Support
    // ===========================================

    /// Begins a write transaction, taking the database write lock up front.
    ///
    /// The transaction rolls back on drop unless `commit()` is called.
    pub fn write_transaction(&mut self) -> StoreResult<Transaction<'_>> {
        Transaction::begin(&self.conn, TransactionMode::Immediate)
    }

    /// Begins a read transaction giving a consistent snapshot.
    pub fn read_transaction(&self) -> StoreResult<Transaction<'_>> {
        Transaction::begin(&self.conn, TransactionMode::Deferred)
    }
}
