//! Todo snapshot load/save.
//!
//! # Responsibility
//! - Serialize the whole todo list as one JSON array under a store key.
//! - Decode stored snapshots leniently, salvaging every usable record.
//!
//! # Invariants
//! - `save_todos` followed by `load_todos` returns an equal list for any
//!   list satisfying the model invariants.
//! - Returned lists never contain two records with the same `id`.
//! - Timestamps filled in for a record never put `updated_at` before
//!   `created_at`; stored pairs are kept as-is.
//! - Titles are never written to logs.

use crate::model::todo::Todo;
use crate::store::{KvStore, StoreResult};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Loads the todo snapshot stored at `key`.
///
/// Missing or unreadable data yields an empty list. Individual elements
/// without a string `id` or string `title` are dropped; missing timestamps
/// default to `now` and a missing `completed` flag defaults to `false`.
pub fn load_todos<S: KvStore + ?Sized>(store: &S, key: &str, now: i64) -> Vec<Todo> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=todos_load module=repo status=empty reason=missing_key key={key}");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=todos_load module=repo status=degraded reason=store_read_failed key={key} error={err}"
            );
            return Vec::new();
        }
    };

    let elements = match serde_json::from_slice::<Value>(&raw) {
        Ok(Value::Array(elements)) => elements,
        Ok(_) => {
            warn!("event=todos_load module=repo status=degraded reason=not_an_array key={key}");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=todos_load module=repo status=degraded reason=invalid_json key={key} error_line={} error_column={}",
                err.line(),
                err.column()
            );
            return Vec::new();
        }
    };

    let element_count = elements.len();
    let mut seen_ids = HashSet::with_capacity(element_count);
    let mut defaulted = 0usize;
    let mut todos = Vec::with_capacity(element_count);

    for element in &elements {
        let Some((todo, used_defaults)) = decode_todo(element, now) else {
            continue;
        };
        if !seen_ids.insert(todo.id.clone()) {
            continue;
        }
        if used_defaults {
            defaulted += 1;
        }
        todos.push(todo);
    }

    let dropped = element_count - todos.len();
    if dropped > 0 || defaulted > 0 {
        warn!(
            "event=todos_load module=repo status=degraded key={key} loaded={} dropped={dropped} defaulted={defaulted}",
            todos.len()
        );
    } else {
        info!(
            "event=todos_load module=repo status=ok key={key} loaded={}",
            todos.len()
        );
    }

    todos
}

/// Writes the full todo list to `key`, replacing any previous snapshot.
///
/// Does nothing when the store reports itself unavailable.
///
/// # Errors
/// - Returns `StoreError::Encode` when the snapshot cannot be serialized.
/// - Propagates store write failures.
pub fn save_todos<S: KvStore + ?Sized>(store: &S, key: &str, todos: &[Todo]) -> StoreResult<()> {
    if !store.is_available() {
        debug!("event=todos_save module=repo status=skipped reason=store_unavailable key={key}");
        return Ok(());
    }

    let payload = serde_json::to_vec(todos)?;
    store.set(key, &payload)?;
    debug!(
        "event=todos_save module=repo status=ok key={key} count={} bytes={}",
        todos.len(),
        payload.len()
    );
    Ok(())
}

/// Decodes one snapshot element. The flag reports whether any field fell
/// back to a default.
fn decode_todo(element: &Value, now: i64) -> Option<(Todo, bool)> {
    let object = element.as_object()?;
    let id = object.get("id")?.as_str()?;
    let title = object.get("title")?.as_str()?;

    let stored_created = read_timestamp(object, "createdAt");
    let stored_updated = read_timestamp(object, "updatedAt");
    let mut used_defaults = stored_created.is_none() || stored_updated.is_none();
    // A defaulted stamp must not break `updated_at >= created_at`.
    let (created_at, updated_at) = match (stored_created, stored_updated) {
        (Some(created), Some(updated)) => (created, updated),
        (Some(created), None) => (created, now.max(created)),
        (None, Some(updated)) => (now.min(updated), updated),
        (None, None) => (now, now),
    };

    let completed = match object.get("completed") {
        Some(value) => is_truthy(value),
        None => {
            used_defaults = true;
            false
        }
    };

    Some((
        Todo {
            id: id.to_string(),
            title: title.to_string(),
            completed,
            created_at,
            updated_at,
        },
        used_defaults,
    ))
}

fn read_timestamp(object: &Map<String, Value>, field: &str) -> Option<i64> {
    let value = object.get(field)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|millis| millis.is_finite())
            .map(|millis| millis.trunc() as i64)
    })
}

/// Loose truthiness for the `completed` flag, so snapshots written by
/// dynamically typed clients keep their meaning.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_todo, is_truthy};
    use serde_json::json;

    #[test]
    fn truthiness_follows_loose_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn fractional_timestamps_are_truncated() {
        let element = json!({
            "id": "t_1",
            "title": "fractional",
            "completed": false,
            "createdAt": 1_700_000_000_000.75,
            "updatedAt": 1_700_000_000_001.25
        });
        let (todo, used_defaults) = decode_todo(&element, 0).unwrap();
        assert_eq!(todo.created_at, 1_700_000_000_000);
        assert_eq!(todo.updated_at, 1_700_000_000_001);
        assert!(!used_defaults);
    }

    #[test]
    fn string_timestamps_fall_back_to_now() {
        let element = json!({
            "id": "t_1",
            "title": "bad stamps",
            "completed": true,
            "createdAt": "yesterday",
        });
        let (todo, used_defaults) = decode_todo(&element, 42).unwrap();
        assert_eq!(todo.created_at, 42);
        assert_eq!(todo.updated_at, 42);
        assert!(used_defaults);
    }

    #[test]
    fn missing_created_at_never_exceeds_stored_updated_at() {
        let element = json!({ "id": "a", "title": "x", "updatedAt": 5 });
        let (todo, used_defaults) = decode_todo(&element, 1_000).unwrap();
        assert_eq!(todo.created_at, 5);
        assert_eq!(todo.updated_at, 5);
        assert!(used_defaults);
    }

    #[test]
    fn missing_updated_at_never_precedes_stored_created_at() {
        let element = json!({ "id": "a", "title": "x", "createdAt": 2_000 });
        let (todo, _) = decode_todo(&element, 1_000).unwrap();
        assert_eq!(todo.created_at, 2_000);
        assert_eq!(todo.updated_at, 2_000);

        let (todo, _) = decode_todo(&element, 3_000).unwrap();
        assert_eq!(todo.updated_at, 3_000);
    }

    #[test]
    fn numeric_ids_are_rejected() {
        let element = json!({ "id": 7, "title": "numeric id" });
        assert!(decode_todo(&element, 0).is_none());
    }
}
