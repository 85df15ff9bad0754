//! Todo list service.
//!
//! # Responsibility
//! - Own the authoritative todo list for one store key.
//! - Apply add/toggle/edit/remove/clear intents and persist the result.
//! - Derive the visible list and aggregate counts for the active filter.
//!
//! # Invariants
//! - The in-memory list is always in `sort_todos` order.
//! - Every mutation persists a full snapshot; no-ops write nothing.
//! - Edit sessions are transient and never persisted.
//! - No operation surfaces an error; persistence failures are logged.

use crate::model::id::IdGenerator;
use crate::model::todo::{
    derive_stats, derive_view, normalize_title, sort_todos, Todo, TodoFilter, TodoId, TodoStats,
};
use crate::repo::todo_repo::{load_todos, save_todos};
use crate::store::KvStore;
use log::{info, warn};

/// In-progress title edit for one todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TodoId,
    pub draft: String,
}

/// Use-case service owning one todo list.
pub struct TodoService<S: KvStore, G: IdGenerator> {
    store: S,
    ids: G,
    storage_key: String,
    todos: Vec<Todo>,
    filter: TodoFilter,
    editing: Option<EditSession>,
}

impl<S: KvStore, G: IdGenerator> TodoService<S, G> {
    /// Creates a service with an empty list. Nothing is read from `store`.
    pub fn new(store: S, ids: G, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            ids,
            storage_key: storage_key.into(),
            todos: Vec::new(),
            filter: TodoFilter::All,
            editing: None,
        }
    }

    /// Creates a service seeded from the snapshot stored at `storage_key`.
    ///
    /// `now` fills timestamps missing from stored records.
    pub fn open(store: S, ids: G, storage_key: impl Into<String>, now: i64) -> Self {
        let mut service = Self::new(store, ids, storage_key);
        let loaded = load_todos(&service.store, &service.storage_key, now);
        service.todos = sort_todos(&loaded);
        service
    }

    /// Adds a todo from a raw draft title.
    ///
    /// # Contract
    /// - Returns `None` without side effects when the title normalizes to
    ///   an empty string.
    /// - Otherwise returns the new todo id; the list is re-sorted and saved.
    pub fn add(&mut self, draft_title: &str, now: i64) -> Option<TodoId> {
        let title = normalize_title(draft_title);
        if title.is_empty() {
            return None;
        }

        let id = self.ids.next_id();
        self.todos.insert(0, Todo::new(id.clone(), title, now));
        self.todos = sort_todos(&self.todos);
        info!(
            "event=todo_add module=service status=ok id={id} total={}",
            self.todos.len()
        );
        self.persist();
        Some(id)
    }

    /// Flips completion of the todo with `id`.
    ///
    /// Returns `false` (and does nothing) when no todo has `id`.
    pub fn toggle(&mut self, id: &str, now: i64) -> bool {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return false;
        };

        todo.toggle(now);
        info!(
            "event=todo_toggle module=service status=ok id={id} completed={}",
            todo.completed
        );
        self.todos = sort_todos(&self.todos);
        self.persist();
        true
    }

    /// Deletes the todo with `id`. Returns `false` when it does not exist.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() == before {
            return false;
        }

        if self.editing.as_ref().is_some_and(|session| session.id == id) {
            self.editing = None;
        }
        info!(
            "event=todo_remove module=service status=ok id={id} total={}",
            self.todos.len()
        );
        self.persist();
        true
    }

    /// Opens an edit session seeded with the current title of `id`.
    ///
    /// Returns `false` when no todo has `id`; any previous session is kept.
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(todo) = self.todos.iter().find(|todo| todo.id == id) else {
            return false;
        };

        self.editing = Some(EditSession {
            id: todo.id.clone(),
            draft: todo.title.clone(),
        });
        true
    }

    /// Replaces the draft of the open edit session, if any.
    pub fn set_edit_draft(&mut self, draft: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.draft = draft.into();
        }
    }

    /// Drops the open edit session without touching the list.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Commits `raw_title` as the new title of `id` and closes the session.
    ///
    /// # Contract
    /// - A title that normalizes to empty deletes the todo, exactly like
    ///   [`TodoService::remove`].
    /// - Returns `false` when no todo has `id`.
    pub fn commit_edit(&mut self, id: &str, raw_title: &str, now: i64) -> bool {
        self.editing = None;

        let title = normalize_title(raw_title);
        if title.is_empty() {
            return self.remove(id);
        }

        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return false;
        };

        todo.rename(title, now);
        info!("event=todo_edit module=service status=ok id={id}");
        self.todos = sort_todos(&self.todos);
        self.persist();
        true
    }

    /// Commits the draft of the open edit session.
    ///
    /// Returns `false` when no session is open.
    pub fn commit_current_edit(&mut self, now: i64) -> bool {
        match self.editing.take() {
            Some(EditSession { id, draft }) => self.commit_edit(&id, &draft, now),
            None => false,
        }
    }

    /// Removes every completed todo and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|todo| !todo.completed);
        let removed = before - self.todos.len();
        if removed == 0 {
            return 0;
        }

        if let Some(session) = &self.editing {
            if !self.todos.iter().any(|todo| todo.id == session.id) {
                self.editing = None;
            }
        }
        info!(
            "event=todo_clear_completed module=service status=ok removed={removed} total={}",
            self.todos.len()
        );
        self.persist();
        removed
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Returns the sorted list restricted to the active filter.
    pub fn visible(&self) -> Vec<Todo> {
        derive_view(&self.todos, self.filter)
    }

    pub fn stats(&self) -> TodoStats {
        derive_stats(&self.todos)
    }

    /// Returns the full list in display order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn persist(&self) {
        if let Err(err) = save_todos(&self.store, &self.storage_key, &self.todos) {
            warn!(
                "event=todos_save module=service status=error key={} count={} error={}",
                self.storage_key,
                self.todos.len(),
                err
            );
        }
    }
}
