//! Property-based tests for the checklist state machine and renderer.
//!
//! Uses proptest to verify:
//! 1. Toggling a valid index twice restores the list.
//! 2. Out-of-range toggles and edits leave the list structurally equal.
//! 3. `add_task` appends exactly one open task at the end.
//! 4. The rendered body has one line per task, or the placeholder.
//! 5. Per-task controls never exceed the row ceiling.

use proptest::prelude::*;
use todobot::list::{Task, TodoList};
use todobot::render::{EMPTY_BODY, MAX_TASK_ROWS, render};

/// Strategy for task text, including empty strings and non-ASCII.
fn arb_text() -> impl Strategy<Value = String> {
    "[^\n\r]{0,24}"
}

/// Strategy for a list with arbitrary tasks and completion states.
fn arb_list() -> impl Strategy<Value = TodoList> {
    prop::collection::vec((arb_text(), any::<bool>()), 0..40).prop_map(|tasks| {
        let mut list = TodoList::new();
        for (i, (text, completed)) in tasks.into_iter().enumerate() {
            list.add_task(text);
            if completed {
                list.toggle_task(i);
            }
        }
        list
    })
}

proptest! {
    #[test]
    fn toggle_is_an_involution(list in arb_list(), seed in any::<usize>()) {
        prop_assume!(!list.is_empty());
        let index = seed % list.len();
        let mut toggled = list.clone();
        prop_assert!(toggled.toggle_task(index));
        prop_assert_ne!(&toggled, &list);
        prop_assert!(toggled.toggle_task(index));
        prop_assert_eq!(toggled, list);
    }

    #[test]
    fn out_of_range_is_noop(list in arb_list(), offset in 0usize..1000, text in arb_text()) {
        let index = list.len() + offset;
        let mut changed = list.clone();
        prop_assert!(!changed.toggle_task(index));
        prop_assert!(!changed.edit_task_text(index, text));
        prop_assert_eq!(changed, list);
    }

    #[test]
    fn add_appends_open_task(list in arb_list(), text in arb_text()) {
        let mut grown = list.clone();
        let index = grown.add_task(text.clone());
        prop_assert_eq!(index, list.len());
        prop_assert_eq!(grown.len(), list.len() + 1);
        prop_assert_eq!(grown.tasks().last(), Some(&Task { text, completed: false }));
        prop_assert_eq!(&grown.tasks()[..list.len()], list.tasks());
    }

    #[test]
    fn edit_keeps_position_and_completion(list in arb_list(), seed in any::<usize>(), text in arb_text()) {
        prop_assume!(!list.is_empty());
        let index = seed % list.len();
        let mut edited = list.clone();
        prop_assert!(edited.edit_task_text(index, text.clone()));
        prop_assert_eq!(&edited.tasks()[index].text, &text);
        prop_assert_eq!(edited.tasks()[index].completed, list.tasks()[index].completed);
        prop_assert_eq!(edited.len(), list.len());
    }

    #[test]
    fn rename_stores_verbatim(list in arb_list(), title in arb_text()) {
        let mut renamed = list;
        renamed.rename_list(title.clone());
        prop_assert_eq!(renamed.title(), title.as_str());
    }

    #[test]
    fn body_has_one_line_per_task(list in arb_list()) {
        let payload = render(&list);
        if list.is_empty() {
            prop_assert_eq!(payload.body, EMPTY_BODY);
        } else {
            prop_assert_eq!(payload.body.split('\n').count(), list.len());
            let first_line_prefix = format!("1. {} ", list.tasks()[0].glyph());
            prop_assert!(payload.body.starts_with(&first_line_prefix));
        }
    }

    #[test]
    fn controls_respect_row_ceiling(list in arb_list()) {
        let payload = render(&list);
        let task_rows = list.len().min(MAX_TASK_ROWS);
        prop_assert_eq!(payload.rows.len(), task_rows + 1);
        prop_assert_eq!(payload.control_ids().count(), task_rows * 2 + 2);
    }
}
