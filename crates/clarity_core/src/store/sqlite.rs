//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - One row per key in `kv_entries`; writes are upserts.
//! - `updated_at` is refreshed on every successful write.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::store::backend::{KvBackend, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable backend persisting raw values in a migrated SQLite database.
pub struct SqliteKvBackend {
    conn: Connection,
}

impl SqliteKvBackend {
    /// Wraps a connection that already went through `db::open_db`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KvBackend for SqliteKvBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
