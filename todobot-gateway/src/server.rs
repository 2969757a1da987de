//! Gateway server core: shared state, WebSocket handler and session registry.
//!
//! The gateway accepts WebSocket connections from platform adapters. Each
//! connection opens with a `Hello`, gets a `Ready` back, and then streams
//! `Event` frames. Events are handed to the shared [`Router`] one at a time
//! per connection; replies travel back on the same socket.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use todobot::router::Router;
use todobot_proto::gateway::{self, GatewayFrame, MAX_FRAME_SIZE, SessionId};
use tokio::sync::{RwLock, mpsc};

use crate::session::SessionPlatform;

/// Errors that can occur while starting the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The TCP listener could not bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was attempted.
        addr: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The bound address could not be read back.
    #[error("failed to read local address: {0}")]
    LocalAddr(std::io::Error),
}

/// Shared gateway state: the router and the live session registry.
pub struct GatewayState {
    /// Maps session ids to the writer channel of that connection.
    sessions: RwLock<HashMap<SessionId, mpsc::UnboundedSender<Message>>>,
    /// Checklist router shared by every session.
    pub router: Router,
    /// Maximum accepted frame size in bytes.
    max_frame_size: usize,
}

impl GatewayState {
    /// Creates gateway state around `router` with the default frame limit.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self::with_config(router, MAX_FRAME_SIZE)
    }

    /// Creates gateway state with a custom frame size limit.
    #[must_use]
    pub fn with_config(router: Router, max_frame_size: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            router,
            max_frame_size,
        }
    }

    /// Registers a session's writer channel.
    pub async fn register(&self, session_id: SessionId, sender: mpsc::UnboundedSender<Message>) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, sender);
    }

    /// Removes a session, returning its writer channel if it existed.
    pub async fn unregister(&self, session_id: &SessionId) -> Option<mpsc::UnboundedSender<Message>> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Number of connected adapters.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Send a WebSocket Close frame to every connected adapter.
    pub async fn close_all_sessions(&self) {
        let sessions = self.sessions.read().await;
        for (session_id, sender) in sessions.iter() {
            tracing::info!(session_id = %session_id, "sending close frame to adapter");
            let _ = sender.send(Message::Close(None));
        }
    }
}

/// Handles an upgraded WebSocket connection for a single adapter.
///
/// The connection lifecycle:
/// 1. Wait for a `Hello` frame.
/// 2. Register the session and send `Ready` back.
/// 3. Route each `Event` frame through the router, in arrival order.
/// 4. On disconnect, unregister the session.
pub async fn handle_socket(socket: WebSocket, state: Arc<GatewayState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let Some(adapter) = wait_for_hello(&mut ws_receiver).await else {
        tracing::warn!("connection closed before hello");
        return;
    };

    let session_id = SessionId::new();
    tracing::info!(session_id = %session_id, adapter = %adapter, "adapter connecting");

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    state.register(session_id.clone(), tx.clone()).await;

    let ready = GatewayFrame::Ready {
        session_id: session_id.clone(),
    };
    if let Err(e) = send_frame(&mut ws_sender, &ready).await {
        tracing::error!(session_id = %session_id, error = %e, "failed to send Ready");
        state.unregister(&session_id).await;
        return;
    }

    tracing::info!(session_id = %session_id, adapter = %adapter, "adapter ready");

    // Writer task: forwards queued frames to the WebSocket.
    let writer_session = session_id.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(msg).await.is_err() {
                tracing::warn!(session_id = %writer_session, "WebSocket write failed");
                break;
            }
        }
    });

    // Reader task: routes events strictly in arrival order.
    let platform = SessionPlatform::new(session_id.clone(), tx);
    let reader_state = Arc::clone(&state);
    let mut read_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            match msg {
                Message::Binary(data) => {
                    handle_binary_frame(&platform, &data, &reader_state).await;
                }
                Message::Close(_) => {
                    tracing::info!(session_id = %platform.session_id(), "received close frame");
                    break;
                }
                _ => {
                    // Ignore text, ping, pong frames.
                }
            }
        }
    });

    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
        }
        _ = &mut write_task => {
            read_task.abort();
        }
    }

    state.unregister(&session_id).await;
    tracing::info!(session_id = %session_id, "adapter disconnected");
}

/// Waits for the opening `Hello` frame.
///
/// Returns the adapter name, or `None` if the connection closes or any other
/// frame arrives first.
async fn wait_for_hello(
    receiver: &mut (impl StreamExt<Item = Result<Message, axum::Error>> + Unpin),
) -> Option<String> {
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Binary(data) => match gateway::decode(&data) {
                Ok(GatewayFrame::Hello { adapter }) => return Some(adapter),
                Ok(other) => {
                    tracing::warn!(frame = ?other, "expected Hello, got different frame");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to decode hello frame");
                    return None;
                }
            },
            Message::Close(_) => return None,
            _ => {
                // Skip non-binary frames (ping/pong) during the handshake.
            }
        }
    }
    None
}

/// Handles a binary frame from a ready session.
async fn handle_binary_frame(platform: &SessionPlatform, data: &[u8], state: &GatewayState) {
    let session_id = platform.session_id();

    if data.len() > state.max_frame_size {
        tracing::warn!(
            session_id = %session_id,
            size = data.len(),
            max = state.max_frame_size,
            "frame exceeds size limit"
        );
        let err = GatewayFrame::Error {
            reason: format!(
                "frame too large: {} bytes (max {})",
                data.len(),
                state.max_frame_size
            ),
        };
        let _ = platform.send_frame(&err);
        return;
    }

    let frame = match gateway::decode(data) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "failed to decode frame");
            return;
        }
    };

    match frame {
        GatewayFrame::Event(event) => {
            let channel_id = event.channel_id().clone();
            match state.router.handle_event(platform, event).await {
                Ok(outcome) => {
                    tracing::debug!(
                        session_id = %session_id,
                        channel_id = %channel_id,
                        outcome = ?outcome,
                        "event handled"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        channel_id = %channel_id,
                        error = %e,
                        "reply failed"
                    );
                }
            }
        }
        GatewayFrame::Hello { adapter } => {
            tracing::warn!(
                session_id = %session_id,
                adapter = %adapter,
                "received duplicate Hello from ready session"
            );
        }
        other => {
            tracing::warn!(
                session_id = %session_id,
                frame = ?other,
                "unexpected frame type from adapter"
            );
        }
    }
}

/// Encodes and sends a frame directly on a WebSocket sender.
async fn send_frame(
    ws_sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
    frame: &GatewayFrame,
) -> Result<(), String> {
    let bytes = gateway::encode(frame).map_err(|e| e.to_string())?;
    ws_sender
        .send(Message::Binary(bytes.into()))
        .await
        .map_err(|e| format!("WebSocket send error: {e}"))
}

/// Starts the gateway with a fresh store and default settings.
///
/// Returns the bound address and a join handle for the server task.
///
/// # Errors
///
/// Returns [`GatewayError`] if the TCP listener cannot bind.
pub async fn start_server(
    addr: &str,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), GatewayError> {
    let router = Router::new(Arc::new(todobot::store::ListStore::new()));
    start_server_with_state(addr, Arc::new(GatewayState::new(router))).await
}

/// Starts the gateway with a pre-configured [`GatewayState`].
///
/// # Errors
///
/// Returns [`GatewayError`] if the TCP listener cannot bind.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<GatewayState>,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), GatewayError> {
    let app = axum::Router::new()
        .route("/gateway", axum::routing::get(ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| GatewayError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    let bound_addr = listener.local_addr().map_err(GatewayError::LocalAddr)?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "gateway server error");
        }
    });

    Ok((bound_addr, handle))
}

/// axum handler that upgrades an HTTP request to a WebSocket connection.
async fn ws_handler(
    ws: axum::extract::ws::WebSocketUpgrade,
    axum::extract::State(state): axum::extract::State<Arc<GatewayState>>,
) -> impl axum::response::IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}
