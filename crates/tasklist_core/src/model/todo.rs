//! Todo domain model.
//!
//! # Responsibility
//! - Define the record shape persisted in list snapshots.
//! - Provide title normalization, sort order, filters and aggregate counts.
//!
//! # Invariants
//! - `title` is normalized and non-empty for records created or edited
//!   through the list service.
//! - `updated_at >= created_at`; `touch` never moves `updated_at` backwards
//!   past `created_at`.
//! - `sort_todos` and `derive_*` helpers never mutate their input.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum title length in characters after normalization.
pub const MAX_TITLE_CHARS: usize = 200;

/// Identifier of a todo inside one list.
pub type TodoId = String;

/// One task list entry.
///
/// Serialized with camelCase field names so snapshots stay readable by
/// other clients of the same store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Always >= `created_at`.
    pub updated_at: i64,
}

impl Todo {
    /// Creates an incomplete todo with both timestamps set to `now`.
    ///
    /// The caller is responsible for passing an already normalized title.
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>, now: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks this todo as modified at `now`.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.created_at);
    }

    /// Flips completion state and bumps `updated_at`.
    pub fn toggle(&mut self, now: i64) {
        self.completed = !self.completed;
        self.touch(now);
    }

    /// Replaces the title and bumps `updated_at`.
    pub fn rename(&mut self, title: impl Into<String>, now: i64) {
        self.title = title.into();
        self.touch(now);
    }
}

/// View predicate over a todo list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    /// Returns whether `todo` is visible under this filter.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Aggregate counts over a todo list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Normalizes a user-supplied title.
///
/// Collapses every whitespace run into one space, trims both ends and caps
/// the result at [`MAX_TITLE_CHARS`] characters. An empty return value means
/// the input carried no visible text.
pub fn normalize_title(input: &str) -> String {
    let collapsed = input
        .split(is_title_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if collapsed.chars().count() <= MAX_TITLE_CHARS {
        return collapsed;
    }

    let truncated = collapsed.chars().take(MAX_TITLE_CHARS).collect::<String>();
    // The cut can land right after a separator.
    truncated.trim_end().to_string()
}

/// Unicode whitespace plus U+FEFF, which editors and pasted text leave
/// behind as an invisible byte order mark.
fn is_title_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Returns a new list ordered for display.
///
/// Incomplete todos come first; each group is ordered by `updated_at`
/// descending. Ties keep their relative input order.
pub fn sort_todos(todos: &[Todo]) -> Vec<Todo> {
    let mut sorted = todos.to_vec();
    sorted.sort_by_key(|todo| (todo.completed, Reverse(todo.updated_at)));
    sorted
}

/// Returns the sorted list restricted to `filter`.
pub fn derive_view(todos: &[Todo], filter: TodoFilter) -> Vec<Todo> {
    sort_todos(todos)
        .into_iter()
        .filter(|todo| filter.matches(todo))
        .collect()
}

/// Counts total, active and completed todos.
pub fn derive_stats(todos: &[Todo]) -> TodoStats {
    let total = todos.len();
    let completed = todos.iter().filter(|todo| todo.completed).count();
    TodoStats {
        total,
        active: total - completed,
        completed,
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` when the system clock reports a time before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, sort_todos, Todo, MAX_TITLE_CHARS};

    #[test]
    fn normalize_trims_cut_that_lands_on_separator() {
        let input = format!("{} tail", "a".repeat(MAX_TITLE_CHARS - 1));
        let normalized = normalize_title(&input);
        assert_eq!(normalized.chars().count(), MAX_TITLE_CHARS - 1);
        assert!(!normalized.ends_with(' '));
    }

    #[test]
    fn normalize_counts_characters_not_bytes() {
        let input = "任".repeat(MAX_TITLE_CHARS + 10);
        assert_eq!(normalize_title(&input).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn normalize_treats_byte_order_mark_as_space() {
        assert_eq!(normalize_title("\u{feff}"), "");
        assert_eq!(normalize_title("\u{feff} \u{feff}"), "");
        assert_eq!(normalize_title("\u{feff}Buy\u{feff}\u{feff}milk"), "Buy milk");
    }

    #[test]
    fn touch_never_precedes_creation() {
        let mut todo = Todo::new("t_1", "clock skew", 1_000);
        todo.touch(500);
        assert_eq!(todo.updated_at, 1_000);
    }

    #[test]
    fn sort_leaves_input_untouched() {
        let input = vec![
            Todo::new("a", "older", 1),
            Todo::new("b", "newer", 2),
        ];
        let sorted = sort_todos(&input);
        assert_eq!(input[0].id, "a");
        assert_eq!(sorted[0].id, "b");
    }
}
