//! Per-connection reply channel to a platform adapter.
//!
//! [`SessionPlatform`] implements [`Platform`] by encoding each reply as a
//! [`GatewayFrame`] and handing it to the session's WebSocket writer task.

use axum::extract::ws::Message;
use todobot::platform::{Platform, PlatformError};
use todobot_proto::display::{DisplayPayload, FormRequest};
use todobot_proto::event::{ChannelId, InteractionContext};
use todobot_proto::gateway::{self, GatewayFrame, SessionId};
use tokio::sync::mpsc;

/// Reply side of one adapter connection.
#[derive(Clone)]
pub struct SessionPlatform {
    session_id: SessionId,
    outbound: mpsc::UnboundedSender<Message>,
}

impl SessionPlatform {
    /// Creates a platform that writes into `outbound`.
    #[must_use]
    pub const fn new(session_id: SessionId, outbound: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            session_id,
            outbound,
        }
    }

    /// The session this platform replies on.
    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Encodes `frame` and queues it for the writer task.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Encoding`] if the frame cannot be encoded, or
    /// [`PlatformError::ConnectionClosed`] if the writer has shut down.
    pub fn send_frame(&self, frame: &GatewayFrame) -> Result<(), PlatformError> {
        let bytes = gateway::encode(frame).map_err(|e| PlatformError::Encoding(e.to_string()))?;
        self.outbound
            .send(Message::Binary(bytes.into()))
            .map_err(|_| PlatformError::ConnectionClosed)
    }
}

impl Platform for SessionPlatform {
    async fn send(
        &self,
        channel_id: &ChannelId,
        payload: DisplayPayload,
    ) -> Result<(), PlatformError> {
        self.send_frame(&GatewayFrame::Send {
            channel_id: channel_id.clone(),
            payload,
        })
    }

    async fn update(
        &self,
        context: &InteractionContext,
        payload: DisplayPayload,
    ) -> Result<(), PlatformError> {
        self.send_frame(&GatewayFrame::Update {
            context: context.clone(),
            payload,
        })
    }

    async fn show_form(
        &self,
        context: &InteractionContext,
        form: FormRequest,
    ) -> Result<(), PlatformError> {
        self.send_frame(&GatewayFrame::ShowForm {
            context: context.clone(),
            form,
        })
    }
}
