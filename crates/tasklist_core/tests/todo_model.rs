use proptest::prelude::*;
use tasklist_core::{
    derive_stats, derive_view, normalize_title, sort_todos, Todo, TodoFilter, TodoStats,
    MAX_TITLE_CHARS,
};

fn todo(id: &str, completed: bool, updated_at: i64) -> Todo {
    Todo {
        id: id.to_string(),
        title: format!("title {id}"),
        completed,
        created_at: 0,
        updated_at,
    }
}

fn ids(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|todo| todo.id.as_str()).collect()
}

#[test]
fn normalize_collapses_and_trims_whitespace() {
    assert_eq!(normalize_title("  Buy milk  "), "Buy milk");
    assert_eq!(normalize_title("a \t\n  b\r\nc"), "a b c");
    assert_eq!(normalize_title("   \t\n "), "");
    assert_eq!(normalize_title(""), "");
}

#[test]
fn normalize_caps_length() {
    let long = "x".repeat(MAX_TITLE_CHARS * 2);
    assert_eq!(normalize_title(&long).len(), MAX_TITLE_CHARS);
}

#[test]
fn sort_puts_active_first_then_most_recent() {
    let input = vec![
        todo("done-old", true, 1),
        todo("active-old", false, 2),
        todo("done-new", true, 5),
        todo("active-new", false, 4),
    ];

    let sorted = sort_todos(&input);
    assert_eq!(
        ids(&sorted),
        vec!["active-new", "active-old", "done-new", "done-old"]
    );
}

#[test]
fn sort_keeps_input_order_for_ties() {
    let input = vec![
        todo("first", false, 10),
        todo("second", false, 10),
        todo("third", false, 10),
    ];

    assert_eq!(ids(&sort_todos(&input)), vec!["first", "second", "third"]);
}

#[test]
fn derive_view_filters_sorted_list() {
    let input = vec![
        todo("a", true, 3),
        todo("b", false, 1),
        todo("c", false, 2),
    ];

    assert_eq!(ids(&derive_view(&input, TodoFilter::All)), vec!["c", "b", "a"]);
    assert_eq!(ids(&derive_view(&input, TodoFilter::Active)), vec!["c", "b"]);
    assert_eq!(ids(&derive_view(&input, TodoFilter::Completed)), vec!["a"]);
    assert_eq!(ids(&input), vec!["a", "b", "c"]);
}

#[test]
fn derive_stats_counts_active_as_remainder() {
    let input = vec![
        todo("a", true, 1),
        todo("b", false, 1),
        todo("c", false, 1),
    ];

    assert_eq!(
        derive_stats(&input),
        TodoStats {
            total: 3,
            active: 2,
            completed: 1,
        }
    );
    assert_eq!(derive_stats(&[]), TodoStats::default());
}

#[test]
fn filter_string_forms_round_trip() {
    for filter in [TodoFilter::All, TodoFilter::Active, TodoFilter::Completed] {
        assert_eq!(TodoFilter::parse(filter.as_str()), Some(filter));
    }
    assert_eq!(TodoFilter::parse("done"), None);
}

#[test]
fn todo_serializes_with_camel_case_fields() {
    let value = serde_json::to_value(todo("t_1", true, 9)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": "t_1",
            "title": "title t_1",
            "completed": true,
            "createdAt": 0,
            "updatedAt": 9
        })
    );
}

fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
    prop::collection::vec((any::<bool>(), 0i64..20), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (completed, updated_at))| {
                todo(&format!("t_{index}"), completed, updated_at)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_normalize_output_is_clean(input in any::<String>()) {
        let normalized = normalize_title(&input);
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
        prop_assert!(normalized.chars().count() <= MAX_TITLE_CHARS);
        prop_assert!(normalized.chars().all(|c| c == ' ' || !(c.is_whitespace() || c == '\u{feff}')), "normalized text contains non-space whitespace or BOM");
    }

    #[test]
    fn prop_normalize_is_idempotent(input in "[ a-z\t\n\u{feff}]{0,450}") {
        let once = normalize_title(&input);
        prop_assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn prop_sort_orders_groups_and_recency(todos in arb_todos()) {
        let sorted = sort_todos(&todos);
        prop_assert_eq!(sorted.len(), todos.len());

        let first_completed = sorted.iter().position(|todo| todo.completed).unwrap_or(sorted.len());
        prop_assert!(sorted[first_completed..].iter().all(|todo| todo.completed));

        for pair in sorted.windows(2) {
            if pair[0].completed == pair[1].completed {
                prop_assert!(pair[0].updated_at >= pair[1].updated_at);
            }
        }
    }

    #[test]
    fn prop_sort_is_idempotent(todos in arb_todos()) {
        let sorted = sort_todos(&todos);
        prop_assert_eq!(sort_todos(&sorted), sorted);
    }
}
