//! Maps a [`TodoList`] to the message shown in the channel.

use todobot_proto::display::{Button, ButtonStyle, ControlRow, DisplayPayload};
use todobot_proto::ids;

use crate::list::{Task, TodoList};

/// Maximum number of tasks that get their own row of controls. Tasks past
/// this point are listed in the body only.
pub const MAX_TASK_ROWS: usize = 25;

/// Accent colour of the checklist message.
pub const ACCENT_COLOR: u32 = 0x58_65F2;

/// Body text of a list without tasks.
pub const EMPTY_BODY: &str = "No tasks yet!";

/// Renders the checklist message for `list`.
#[must_use]
pub fn render(list: &TodoList) -> DisplayPayload {
    DisplayPayload {
        title: format!("📋 {}", list.display_title()),
        body: render_body(list),
        color: ACCENT_COLOR,
        rows: render_rows(list),
    }
}

fn render_body(list: &TodoList) -> String {
    if list.is_empty() {
        return EMPTY_BODY.to_string();
    }
    list.tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}. {} {}", i + 1, task.glyph(), task.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rows(list: &TodoList) -> Vec<ControlRow> {
    let mut rows: Vec<ControlRow> = list
        .tasks()
        .iter()
        .take(MAX_TASK_ROWS)
        .enumerate()
        .map(|(i, task)| task_row(i, task))
        .collect();

    rows.push(ControlRow {
        buttons: vec![
            Button::new(ids::ADD_TASK, "➕ Add Task", ButtonStyle::Success),
            Button::new(ids::EDIT_TITLE, "📝 Edit List Name", ButtonStyle::Secondary),
        ],
    });
    rows
}

fn task_row(index: usize, task: &Task) -> ControlRow {
    ControlRow {
        buttons: vec![
            Button::new(
                ids::toggle_id(index),
                format!("{} {}", task.glyph(), task.text),
                ButtonStyle::Secondary,
            ),
            Button::new(ids::edit_id(index), "✏️ Edit", ButtonStyle::Primary),
        ],
    }
}
