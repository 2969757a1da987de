//! Inbound events delivered by a platform adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifies a chat channel; the unit of isolation for one checklist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Creates a channel identifier from the platform's representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this channel ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for replying to a button press or form submission.
///
/// Replies made through this context edit the message the interaction came
/// from, or open a form on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionContext {
    /// Platform-assigned interaction identifier.
    pub interaction_id: String,
    /// Channel the interaction happened in.
    pub channel_id: ChannelId,
}

impl InteractionContext {
    /// Creates an interaction context.
    pub fn new(interaction_id: impl Into<String>, channel_id: ChannelId) -> Self {
        Self {
            interaction_id: interaction_id.into(),
            channel_id,
        }
    }
}

/// Something a user did that the bot may react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// A plain text message posted in a channel.
    Command {
        /// Channel the message was posted in.
        channel_id: ChannelId,
        /// Whether the author is a bot account.
        author_is_bot: bool,
        /// Full message text.
        content: String,
    },
    /// A button on a rendered checklist was pressed.
    ButtonPress {
        /// Reply handle.
        context: InteractionContext,
        /// The button's custom id.
        custom_id: String,
    },
    /// A form was submitted.
    FormSubmit {
        /// Reply handle.
        context: InteractionContext,
        /// The form's custom id.
        custom_id: String,
        /// Submitted values keyed by field id.
        fields: BTreeMap<String, String>,
    },
}

impl InboundEvent {
    /// Returns the channel this event belongs to.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        match self {
            Self::Command { channel_id, .. } => channel_id,
            Self::ButtonPress { context, .. } | Self::FormSubmit { context, .. } => {
                &context.channel_id
            }
        }
    }

    /// Short name of the event kind, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Command { .. } => "command",
            Self::ButtonPress { .. } => "button",
            Self::FormSubmit { .. } => "form",
        }
    }
}
