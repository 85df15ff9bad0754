//! Core domain logic for a local, single-user task list.
//! This crate is the single source of truth for todo invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::StorageKeys;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::{IdGenerator, SequenceIdGenerator, TimeRandomIdGenerator};
pub use model::prefs::{Locale, Theme};
pub use model::todo::{
    derive_stats, derive_view, normalize_title, now_epoch_ms, sort_todos, Todo, TodoFilter,
    TodoId, TodoStats, MAX_TITLE_CHARS,
};
pub use repo::prefs_repo::{load_locale, load_theme, save_locale, save_theme};
pub use repo::todo_repo::{load_todos, save_todos};
pub use service::todo_service::{EditSession, TodoService};
pub use store::{KvStore, MemoryStore, SqliteKvStore, StoreError, StoreResult, UnavailableStore};
