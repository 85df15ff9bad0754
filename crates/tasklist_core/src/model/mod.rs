//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical todo record and its pure transformations.
//! - Keep ordering, normalization and filter rules free of I/O.
//!
//! # Invariants
//! - Every todo is identified by an `id` unique within one list.
//! - Core functions never read the wall clock; callers pass `now`.

pub mod id;
pub mod prefs;
pub mod todo;
