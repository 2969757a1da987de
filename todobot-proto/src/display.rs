//! Platform-neutral description of what the bot shows.
//!
//! The core renders a [`DisplayPayload`] for the checklist message and a
//! [`FormRequest`] for modal data entry. Adapters translate these into the
//! platform's own message, button and modal builders.

use serde::{Deserialize, Serialize};

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonStyle {
    /// Highlighted action.
    Primary,
    /// Neutral action.
    Secondary,
    /// Positive/constructive action.
    Success,
}

/// A single clickable control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Identifier returned by the platform when the button is pressed.
    pub custom_id: String,
    /// Visible label.
    pub label: String,
    /// Visual style.
    pub style: ButtonStyle,
}

impl Button {
    /// Creates a button.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }
}

/// A horizontal group of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRow {
    /// Buttons in display order.
    pub buttons: Vec<Button>,
}

/// A rendered checklist message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    /// Heading line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Accent colour as `0xRRGGBB`.
    pub color: u32,
    /// Control rows in display order.
    pub rows: Vec<ControlRow>,
}

impl DisplayPayload {
    /// Iterates over every button id in display order.
    pub fn control_ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|row| row.buttons.iter())
            .map(|button| button.custom_id.as_str())
    }
}

/// Size of a text input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextInputStyle {
    /// Single line.
    Short,
    /// Multi-line.
    Paragraph,
}

/// A text input inside a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Key under which the submitted value is returned.
    pub field_id: String,
    /// Visible label.
    pub label: String,
    /// Input box size.
    pub style: TextInputStyle,
    /// Pre-filled value, if any.
    pub default_value: Option<String>,
}

/// A modal data-entry form the platform should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRequest {
    /// Identifier returned with the submission.
    pub form_id: String,
    /// Modal heading.
    pub title: String,
    /// Inputs in display order.
    pub fields: Vec<FormField>,
}
