//! SQLite connections backing [`SqliteKvStore`](crate::store::SqliteKvStore).
//!
//! # Invariants
//! - Returned connections carry the current `kv_entries` schema.
//! - A database written by a newer build is refused, never downgraded.

mod schema;

pub use schema::{schema_version, SCHEMA_VERSION};

use crate::store::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the store database at `path`.
///
/// # Errors
/// - `StoreError::Sqlite` when the file cannot be opened or the schema
///   cannot be written.
/// - `StoreError::SchemaMismatch` when the file carries a newer schema.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory store database.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    let result: StoreResult<Connection> = open().map_err(StoreError::from).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        schema::ensure_schema(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}
