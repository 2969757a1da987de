//! Custom identifiers embedded in rendered buttons and forms.
//!
//! A rendered checklist carries opaque string ids on every control. The
//! platform hands them back verbatim when a user presses a button or submits
//! a form, so the formats here are fixed: messages already posted in a
//! channel keep working only as long as these strings do not change.
//!
//! Parsing produces closed enums ([`ActionKind`], [`FormKind`]) so callers
//! match exhaustively instead of testing string prefixes.

use serde::{Deserialize, Serialize};

/// Button id that opens the "add task" form.
pub const ADD_TASK: &str = "add_task";
/// Button id that opens the "rename list" form.
pub const EDIT_TITLE: &str = "edit_title";
/// Form id submitted by the "add task" form.
pub const MODAL_ADD: &str = "modal_add";
/// Form id submitted by the "rename list" form.
pub const MODAL_TITLE: &str = "modal_title";

/// Field id of the task text input in the "add task" form.
pub const TASK_INPUT: &str = "task_input";
/// Field id of the title input in the "rename list" form.
pub const TITLE_INPUT: &str = "title_input";
/// Field id of the text input in the "edit task" form.
pub const EDIT_INPUT: &str = "edit_input";

const TOGGLE_PREFIX: &str = "toggle_";
const EDIT_PREFIX: &str = "edit_";
const MODAL_EDIT_PREFIX: &str = "modal_edit_";

/// Positional task reference carried in an identifier suffix.
///
/// The suffix is kept as received. A suffix that is not an unsigned integer
/// still round-trips into follow-up form ids, but never resolves to a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskSlot(String);

impl TaskSlot {
    /// Creates a slot pointing at the task at `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(index.to_string())
    }

    /// Wraps a raw identifier suffix without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the task index, or `None` if the suffix is not a valid index.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.0.parse().ok()
    }

    /// Returns the suffix as it appears in identifiers.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intent decoded from a button's custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// `add_task`: ask for the text of a new task.
    AddTask,
    /// `edit_title`: ask for a new list title.
    EditTitle,
    /// `toggle_{i}`: flip completion of task `i`.
    ToggleTask(TaskSlot),
    /// `edit_{i}`: ask for new text for task `i`.
    EditTask(TaskSlot),
    /// Anything else. Ignored by the router.
    Unknown,
}

/// Intent decoded from a submitted form's custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    /// `modal_add`: append a task.
    AddTask,
    /// `modal_title`: rename the list.
    RenameList,
    /// `modal_edit_{i}`: replace the text of task `i`.
    EditTask(TaskSlot),
    /// Anything else. Ignored by the router.
    Unknown,
}

/// Decodes a button custom id.
///
/// Exact ids are checked before prefixes, so `edit_title` is never read as
/// an edit of a task named `title`.
#[must_use]
pub fn parse_action_id(id: &str) -> ActionKind {
    match id {
        ADD_TASK => ActionKind::AddTask,
        EDIT_TITLE => ActionKind::EditTitle,
        _ => {
            if let Some(rest) = id.strip_prefix(TOGGLE_PREFIX) {
                ActionKind::ToggleTask(TaskSlot::from_raw(rest))
            } else if let Some(rest) = id.strip_prefix(EDIT_PREFIX) {
                ActionKind::EditTask(TaskSlot::from_raw(rest))
            } else {
                ActionKind::Unknown
            }
        }
    }
}

/// Decodes a form custom id.
#[must_use]
pub fn parse_form_id(id: &str) -> FormKind {
    match id {
        MODAL_ADD => FormKind::AddTask,
        MODAL_TITLE => FormKind::RenameList,
        _ => id
            .strip_prefix(MODAL_EDIT_PREFIX)
            .map_or(FormKind::Unknown, |rest| {
                FormKind::EditTask(TaskSlot::from_raw(rest))
            }),
    }
}

/// Button id that toggles the task at `index`.
#[must_use]
pub fn toggle_id(index: usize) -> String {
    format!("{TOGGLE_PREFIX}{index}")
}

/// Button id that opens the edit form for the task at `index`.
#[must_use]
pub fn edit_id(index: usize) -> String {
    format!("{EDIT_PREFIX}{index}")
}

/// Form id of the edit form opened for `slot`.
#[must_use]
pub fn modal_edit_id(slot: &TaskSlot) -> String {
    format!("{MODAL_EDIT_PREFIX}{slot}")
}
