//! Follow-up forms opened by the checklist buttons.

use todobot_proto::display::{FormField, FormRequest, TextInputStyle};
use todobot_proto::ids::{self, TaskSlot};

use crate::list::TodoList;

fn short_field(field_id: &str, label: &str, default_value: Option<String>) -> FormField {
    FormField {
        field_id: field_id.to_string(),
        label: label.to_string(),
        style: TextInputStyle::Short,
        default_value,
    }
}

/// Form asking for the text of a new task.
#[must_use]
pub fn add_task_form() -> FormRequest {
    FormRequest {
        form_id: ids::MODAL_ADD.to_string(),
        title: "Add New Task".to_string(),
        fields: vec![short_field(ids::TASK_INPUT, "Task", None)],
    }
}

/// Form asking for a new list title, pre-filled with the shown title.
#[must_use]
pub fn rename_form(list: &TodoList) -> FormRequest {
    FormRequest {
        form_id: ids::MODAL_TITLE.to_string(),
        title: "Rename Todo List".to_string(),
        fields: vec![short_field(
            ids::TITLE_INPUT,
            "New Title",
            Some(list.display_title().to_string()),
        )],
    }
}

/// Form asking for new text for the task in `slot`.
///
/// Pre-filled with the task's current text, or empty if the slot no longer
/// names a task.
#[must_use]
pub fn edit_task_form(list: &TodoList, slot: &TaskSlot) -> FormRequest {
    let index = slot.index();
    let current = index
        .and_then(|i| list.task(i))
        .map(|task| task.text.clone())
        .unwrap_or_default();
    let title = index.map_or_else(
        || "Edit Task".to_string(),
        |i| format!("Edit Task {}", i.saturating_add(1)),
    );

    FormRequest {
        form_id: ids::modal_edit_id(slot),
        title,
        fields: vec![short_field(ids::EDIT_INPUT, "Edit Task Text", Some(current))],
    }
}
