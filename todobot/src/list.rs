//! The per-channel checklist and its transitions.
//!
//! Transitions never fail. An index that does not name a task (stale button,
//! garbled id) leaves the list untouched; rendered messages encode indices at
//! render time, so a press can legitimately arrive after the list changed.

/// Title given to every new list.
pub const DEFAULT_TITLE: &str = "Todo List";

const DONE_GLYPH: &str = "✅";
const OPEN_GLYPH: &str = "☐";

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Free-form text; empty text is allowed.
    pub text: String,
    /// Whether the task is checked off.
    pub completed: bool,
}

impl Task {
    /// Creates an open task.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }

    /// Checkbox glyph for the task's completion state.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        if self.completed { DONE_GLYPH } else { OPEN_GLYPH }
    }
}

/// A channel's checklist. Task order is insertion order and is the index
/// space used by every task-targeting action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    title: String,
    tasks: Vec<Task>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoList {
    /// Creates an empty list titled [`DEFAULT_TITLE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tasks: Vec::new(),
        }
    }

    /// The stored title, exactly as last set.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The title to show: the stored title, or [`DEFAULT_TITLE`] when it is
    /// empty.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The task at `index`, if any.
    #[must_use]
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends an open task and returns its index.
    pub fn add_task(&mut self, text: impl Into<String>) -> usize {
        self.tasks.push(Task::new(text));
        self.tasks.len() - 1
    }

    /// Flips completion of the task at `index`. Returns `false` (and changes
    /// nothing) if there is no such task.
    pub fn toggle_task(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        task.completed = !task.completed;
        true
    }

    /// Replaces the text of the task at `index`. Returns `false` (and changes
    /// nothing) if there is no such task.
    pub fn edit_task_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        task.text = text.into();
        true
    }

    /// Replaces the title verbatim. An empty title is stored as empty.
    pub fn rename_list(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}
