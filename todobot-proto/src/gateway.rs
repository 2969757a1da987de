//! Gateway wire protocol between todobot and a platform adapter.
//!
//! An adapter owns the vendor session (login, token, event stream) and
//! connects to the bot over WebSocket. Every binary frame carries one
//! postcard-encoded [`GatewayFrame`]. The adapter opens with
//! [`GatewayFrame::Hello`], the bot answers [`GatewayFrame::Ready`], and from
//! then on the adapter streams events while the bot streams replies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::display::{DisplayPayload, FormRequest};
use crate::event::{ChannelId, InboundEvent, InteractionContext};

/// Default maximum accepted frame size in bytes (64 KB).
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Error type for frame encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Identifies one adapter connection, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new time-ordered session identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `SessionId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frames exchanged over a gateway WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayFrame {
    /// Adapter introduces itself. Must be the first frame it sends.
    Hello {
        /// Free-form adapter name, used in logs.
        adapter: String,
    },

    /// Bot accepts the session.
    Ready {
        /// Identifier assigned to this connection.
        session_id: SessionId,
    },

    /// Adapter delivers a user event.
    Event(InboundEvent),

    /// Bot asks the adapter to post a new message.
    Send {
        /// Target channel.
        channel_id: ChannelId,
        /// Message content.
        payload: DisplayPayload,
    },

    /// Bot asks the adapter to edit the message an interaction came from.
    Update {
        /// Interaction being answered.
        context: InteractionContext,
        /// Replacement content.
        payload: DisplayPayload,
    },

    /// Bot asks the adapter to open a modal form.
    ShowForm {
        /// Interaction being answered.
        context: InteractionContext,
        /// Form to show.
        form: FormRequest,
    },

    /// Bot reports a protocol error on this session.
    Error {
        /// Human-readable error description.
        reason: String,
    },
}

/// Encodes a [`GatewayFrame`] into bytes using postcard.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the frame cannot be serialized.
pub fn encode(frame: &GatewayFrame) -> Result<Vec<u8>, CodecError> {
    postcard::to_allocvec(frame).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a [`GatewayFrame`] from bytes using postcard.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes cannot be deserialized.
pub fn decode(bytes: &[u8]) -> Result<GatewayFrame, CodecError> {
    postcard::from_bytes(bytes).map_err(|e| CodecError::Serialization(e.to_string()))
}
