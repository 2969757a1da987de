//! Integration tests for the adapter gateway.
//!
//! Connects real WebSocket clients to an in-process gateway and drives the
//! full checklist flow through gateway frames.
//!
//! Verification command: `cargo test --test gateway_session`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite;

use todobot::router::Router;
use todobot::store::ListStore;
use todobot_gateway::server::{GatewayState, start_server, start_server_with_state};
use todobot_proto::event::{ChannelId, InboundEvent, InteractionContext};
use todobot_proto::gateway::{self, GatewayFrame};

// =============================================================================
// Type aliases and helpers
// =============================================================================

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn connect(addr: std::net::SocketAddr) -> WsStream {
    let url = format!("ws://{addr}/gateway");
    let (ws, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
    ws
}

/// Connects and completes the Hello/Ready handshake.
async fn connect_ready(addr: std::net::SocketAddr, adapter: &str) -> WsStream {
    let mut ws = connect(addr).await;
    send_frame(
        &mut ws,
        &GatewayFrame::Hello {
            adapter: adapter.to_string(),
        },
    )
    .await;
    let ready = recv_frame(&mut ws).await;
    assert!(
        matches!(ready, GatewayFrame::Ready { .. }),
        "expected Ready, got {ready:?}"
    );
    ws
}

async fn send_frame(ws: &mut WsStream, frame: &GatewayFrame) {
    let bytes = gateway::encode(frame).unwrap();
    ws.send(tungstenite::Message::Binary(bytes.into()))
        .await
        .unwrap();
}

async fn send_event(ws: &mut WsStream, event: InboundEvent) {
    send_frame(ws, &GatewayFrame::Event(event)).await;
}

/// Receives and decodes a gateway frame, failing after five seconds.
async fn recv_frame(ws: &mut WsStream) -> GatewayFrame {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("recv timed out")
        .unwrap()
        .unwrap();
    gateway::decode(&msg.into_data()).unwrap()
}

fn ctx(channel: &str) -> InteractionContext {
    InteractionContext::new("interaction-1", ChannelId::new(channel))
}

fn show_list(channel: &str) -> InboundEvent {
    InboundEvent::Command {
        channel_id: ChannelId::new(channel),
        author_is_bot: false,
        content: "!todo".to_string(),
    }
}

fn press(channel: &str, custom_id: &str) -> InboundEvent {
    InboundEvent::ButtonPress {
        context: ctx(channel),
        custom_id: custom_id.to_string(),
    }
}

fn submit(channel: &str, custom_id: &str, field: &str, value: &str) -> InboundEvent {
    let mut fields = BTreeMap::new();
    fields.insert(field.to_string(), value.to_string());
    InboundEvent::FormSubmit {
        context: ctx(channel),
        custom_id: custom_id.to_string(),
        fields,
    }
}

// =============================================================================
// Tests
// =============================================================================

/// Full flow: show list, open add form, submit, toggle.
#[tokio::test]
async fn full_checklist_flow_over_gateway() {
    let (addr, _handle) = start_server("127.0.0.1:0").await.unwrap();
    let mut ws = connect_ready(addr, "flow").await;

    send_event(&mut ws, show_list("general")).await;
    match recv_frame(&mut ws).await {
        GatewayFrame::Send { payload, .. } => assert_eq!(payload.body, "No tasks yet!"),
        other => panic!("expected Send, got {other:?}"),
    }

    send_event(&mut ws, press("general", "add_task")).await;
    match recv_frame(&mut ws).await {
        GatewayFrame::ShowForm { context, form } => {
            assert_eq!(context, ctx("general"));
            assert_eq!(form.form_id, "modal_add");
        }
        other => panic!("expected ShowForm, got {other:?}"),
    }

    send_event(&mut ws, submit("general", "modal_add", "task_input", "Buy milk")).await;
    match recv_frame(&mut ws).await {
        GatewayFrame::Update { payload, .. } => assert_eq!(payload.body, "1. ☐ Buy milk"),
        other => panic!("expected Update, got {other:?}"),
    }

    send_event(&mut ws, press("general", "toggle_0")).await;
    match recv_frame(&mut ws).await {
        GatewayFrame::Update { payload, .. } => assert_eq!(payload.body, "1. ✅ Buy milk"),
        other => panic!("expected Update, got {other:?}"),
    }
}

/// Unknown ids produce no reply; the next event is answered normally.
#[tokio::test]
async fn unknown_button_gets_no_reply() {
    let (addr, _handle) = start_server("127.0.0.1:0").await.unwrap();
    let mut ws = connect_ready(addr, "quiet").await;

    send_event(&mut ws, press("c", "archive_all")).await;
    send_event(&mut ws, show_list("c")).await;

    // The first frame back answers the command, not the unknown press.
    assert!(matches!(
        recv_frame(&mut ws).await,
        GatewayFrame::Send { .. }
    ));
}

/// Two adapters see the same channel state.
#[tokio::test]
async fn sessions_share_the_store() {
    let store = Arc::new(ListStore::new());
    let state = Arc::new(GatewayState::new(Router::new(Arc::clone(&store))));
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::clone(&state))
        .await
        .unwrap();

    let mut first = connect_ready(addr, "first").await;
    let mut second = connect_ready(addr, "second").await;

    send_event(&mut first, submit("shared", "modal_add", "task_input", "from first")).await;
    let _ = recv_frame(&mut first).await;

    send_event(&mut second, show_list("shared")).await;
    match recv_frame(&mut second).await {
        GatewayFrame::Send { payload, .. } => assert_eq!(payload.body, "1. ☐ from first"),
        other => panic!("expected Send, got {other:?}"),
    }

    assert_eq!(store.len(), 1);
    assert_eq!(state.session_count().await, 2);
}

/// An event before Hello closes the connection without a Ready.
#[tokio::test]
async fn event_before_hello_closes_session() {
    let (addr, _handle) = start_server("127.0.0.1:0").await.unwrap();
    let mut ws = connect(addr).await;

    send_event(&mut ws, show_list("c")).await;

    let next = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("server did not close the connection");
    match next {
        None | Some(Err(_)) | Some(Ok(tungstenite::Message::Close(_))) => {}
        Some(Ok(other)) => panic!("expected close, got {other:?}"),
    }
}

/// Garbage frames are skipped and the session keeps working.
#[tokio::test]
async fn undecodable_frame_is_skipped() {
    let (addr, _handle) = start_server("127.0.0.1:0").await.unwrap();
    let mut ws = connect_ready(addr, "noisy").await;

    ws.send(tungstenite::Message::Binary(vec![0xFF, 0xFE, 0xFD].into()))
        .await
        .unwrap();
    send_event(&mut ws, show_list("c")).await;

    assert!(matches!(
        recv_frame(&mut ws).await,
        GatewayFrame::Send { .. }
    ));
}

/// Graceful shutdown closes adapter sockets.
#[tokio::test]
async fn close_all_sessions_disconnects_adapters() {
    let state = Arc::new(GatewayState::new(Router::new(Arc::new(ListStore::new()))));
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::clone(&state))
        .await
        .unwrap();
    let mut ws = connect_ready(addr, "closing").await;

    state.close_all_sessions().await;

    let next = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("close frame not received");
    match next {
        Some(Ok(tungstenite::Message::Close(_))) | None | Some(Err(_)) => {}
        Some(Ok(other)) => panic!("expected close, got {other:?}"),
    }
}
