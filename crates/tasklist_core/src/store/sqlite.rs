//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Entries live in `kv_entries`; one row per key.
//! - `updated_at` holds Unix epoch milliseconds of the last write.
//! - `set` is a single upsert statement, so readers never observe a
//!   partially written snapshot.

use super::{KvStore, StoreError, StoreResult};
use crate::db::{schema_version, SCHEMA_VERSION};
use crate::model::todo::now_epoch_ms;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over a migrated SQLite connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps `conn` after checking its schema version.
    ///
    /// # Errors
    /// - `StoreError::SchemaMismatch` when `conn` was not opened through
    ///   `open_db`/`open_db_in_memory` (or is on another schema version).
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let found = schema_version(conn)?;
        if found != SCHEMA_VERSION {
            return Err(StoreError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value, now_epoch_ms()],
        )?;
        Ok(())
    }
}
