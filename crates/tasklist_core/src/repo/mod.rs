//! Persistence adapters over the key-value store.
//!
//! # Responsibility
//! - Translate todo snapshots and preferences to and from stored bytes.
//! - Keep decoding fail-soft so bad stored data never reaches callers.
//!
//! # Invariants
//! - Todo writes always carry the full list; there are no partial updates.
//! - Reads never return errors; unreadable data degrades to defaults.

pub mod prefs_repo;
pub mod todo_repo;
