//! In-memory platform for testing.
//!
//! [`RecordingPlatform`] stores every reply it receives so tests can assert
//! on exactly what the router asked the platform to do.

use parking_lot::Mutex;
use todobot_proto::display::{DisplayPayload, FormRequest};
use todobot_proto::event::{ChannelId, InteractionContext};

use super::{Platform, PlatformError};

/// One reply made through a [`RecordingPlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    /// [`Platform::send`].
    Send {
        /// Target channel.
        channel_id: ChannelId,
        /// Posted content.
        payload: DisplayPayload,
    },
    /// [`Platform::update`].
    Update {
        /// Interaction answered.
        context: InteractionContext,
        /// Replacement content.
        payload: DisplayPayload,
    },
    /// [`Platform::show_form`].
    ShowForm {
        /// Interaction answered.
        context: InteractionContext,
        /// Requested form.
        form: FormRequest,
    },
}

/// Platform that records replies instead of delivering them.
///
/// A platform created with [`RecordingPlatform::disconnected`] rejects every
/// call with [`PlatformError::ConnectionClosed`] and records nothing.
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    disconnected: bool,
}

impl RecordingPlatform {
    /// Creates a platform that accepts and records every reply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a platform whose connection is already closed.
    #[must_use]
    pub fn disconnected() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            disconnected: true,
        }
    }

    /// Returns and clears the recorded calls.
    pub fn take(&self) -> Vec<PlatformCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    fn record(&self, call: PlatformCall) -> Result<(), PlatformError> {
        if self.disconnected {
            return Err(PlatformError::ConnectionClosed);
        }
        self.calls.lock().push(call);
        Ok(())
    }
}

impl Platform for RecordingPlatform {
    async fn send(&self, channel_id: &ChannelId, payload: DisplayPayload) -> Result<(), PlatformError> {
        self.record(PlatformCall::Send {
            channel_id: channel_id.clone(),
            payload,
        })
    }

    async fn update(
        &self,
        context: &InteractionContext,
        payload: DisplayPayload,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::Update {
            context: context.clone(),
            payload,
        })
    }

    async fn show_form(
        &self,
        context: &InteractionContext,
        form: FormRequest,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::ShowForm {
            context: context.clone(),
            form,
        })
    }
}
