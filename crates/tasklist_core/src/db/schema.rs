//! `kv_entries` schema, versioned through `PRAGMA user_version`.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// Statements that bring the schema from version `n` to `n + 1`,
/// indexed by `n`.
const UPGRADES: &[&str] = &["CREATE TABLE kv_entries (
        key TEXT PRIMARY KEY NOT NULL,
        value BLOB NOT NULL,
        updated_at INTEGER NOT NULL
            DEFAULT (CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER))
    );"];

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = UPGRADES.len() as u32;

/// Reads the schema version recorded on `conn`.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Applies the missing upgrades in one transaction.
pub(crate) fn ensure_schema(conn: &mut Connection) -> StoreResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::SchemaMismatch {
            found,
            expected: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for upgrade in &UPGRADES[found as usize..] {
        tx.execute_batch(upgrade)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!("event=db_schema module=db status=ok from_version={found} to_version={SCHEMA_VERSION}");
    Ok(())
}
