//! The chat-platform boundary.
//!
//! Defines the [`Platform`] trait the router replies through. Concrete
//! implementations include:
//! - `todobot_gateway::session::SessionPlatform`: forwards replies to a
//!   connected adapter over the gateway WebSocket
//! - [`recording::RecordingPlatform`]: records replies in memory for tests

pub mod recording;

use todobot_proto::display::{DisplayPayload, FormRequest};
use todobot_proto::event::{ChannelId, InteractionContext};

/// Errors a platform can report when a reply cannot be delivered.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The connection to the platform has been closed.
    #[error("platform connection closed")]
    ConnectionClosed,

    /// The reply could not be encoded for the platform.
    #[error("failed to encode reply: {0}")]
    Encoding(String),
}

/// Reply primitives offered by the chat platform.
///
/// Each call completes once the platform has accepted the reply; the router
/// awaits it before finishing the event.
pub trait Platform: Send + Sync {
    /// Post a new message in `channel_id`.
    fn send(
        &self,
        channel_id: &ChannelId,
        payload: DisplayPayload,
    ) -> impl std::future::Future<Output = Result<(), PlatformError>> + Send;

    /// Replace the message the interaction came from.
    fn update(
        &self,
        context: &InteractionContext,
        payload: DisplayPayload,
    ) -> impl std::future::Future<Output = Result<(), PlatformError>> + Send;

    /// Open a modal form in response to the interaction.
    fn show_form(
        &self,
        context: &InteractionContext,
        form: FormRequest,
    ) -> impl std::future::Future<Output = Result<(), PlatformError>> + Send;
}
