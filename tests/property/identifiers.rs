//! Property-based tests for custom identifiers and gateway frames.
//!
//! Uses proptest to verify:
//! 1. Formatted button/form ids always parse back to the same index.
//! 2. Parsing arbitrary strings never panics.
//! 3. Random bytes never cause a panic in `gateway::decode`.

use proptest::prelude::*;
use todobot_proto::gateway;
use todobot_proto::ids::{
    ActionKind, FormKind, TaskSlot, edit_id, modal_edit_id, parse_action_id, parse_form_id,
    toggle_id,
};

proptest! {
    #[test]
    fn toggle_ids_parse_back(index in any::<usize>()) {
        match parse_action_id(&toggle_id(index)) {
            ActionKind::ToggleTask(slot) => prop_assert_eq!(slot.index(), Some(index)),
            other => prop_assert!(false, "expected ToggleTask, got {:?}", other),
        }
    }

    #[test]
    fn edit_ids_parse_back(index in any::<usize>()) {
        match parse_action_id(&edit_id(index)) {
            ActionKind::EditTask(slot) => prop_assert_eq!(slot.index(), Some(index)),
            other => prop_assert!(false, "expected EditTask, got {:?}", other),
        }
    }

    #[test]
    fn modal_edit_ids_keep_raw_suffix(raw in "[a-z0-9_-]{0,12}") {
        let slot = TaskSlot::from_raw(raw.clone());
        prop_assert_eq!(
            parse_form_id(&modal_edit_id(&slot)),
            FormKind::EditTask(TaskSlot::from_raw(raw))
        );
    }

    #[test]
    fn parse_never_panics(id in ".*") {
        let _ = parse_action_id(&id);
        let _ = parse_form_id(&id);
    }

    #[test]
    fn decode_random_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = gateway::decode(&bytes);
    }
}
