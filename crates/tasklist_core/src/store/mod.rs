//! Key-value store capability and implementations.
//!
//! # Responsibility
//! - Define the `get`/`set` contract persistence adapters depend on.
//! - Provide in-memory, SQLite-backed and unavailable implementations.
//!
//! # Invariants
//! - `set` overwrites the whole value stored at `key` in one step.
//! - Stores never interpret the bytes they hold.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;
mod unavailable;

pub use memory::MemoryStore;
pub use sqlite::SqliteKvStore;
pub use unavailable::UnavailableStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by key-value store implementations and snapshot encoding.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Encode(serde_json::Error),
    /// The database schema is not the one this build reads and writes.
    SchemaMismatch { found: u32, expected: u32 },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite store failure: {err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::SchemaMismatch { found, expected } => write!(
                f,
                "store schema version {found} does not match supported {expected}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Byte-oriented key-value store scoped by fixed string keys.
pub trait KvStore {
    /// Returns the bytes stored at `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the bytes stored at `key`.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Returns whether the store can be written in the current context.
    ///
    /// Adapters skip writes entirely when this is `false`.
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
