//! todobot gateway: hosts the checklist bot behind a WebSocket endpoint.
//!
//! A platform adapter (the process that owns the chat vendor's session and
//! token) connects to `/gateway`, forwards user events and performs the
//! replies the bot sends back.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:9100
//! cargo run --bin todobot-gateway
//!
//! # Custom address and trigger
//! cargo run --bin todobot-gateway -- --bind 127.0.0.1:8080 --trigger '!list'
//!
//! # Or via environment variables
//! TODOBOT_ADDR=127.0.0.1:8080 TODOBOT_LOG=debug cargo run --bin todobot-gateway
//! ```

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use todobot::router::Router;
use todobot::store::ListStore;
use todobot_gateway::config::{GatewayCliArgs, GatewayConfig};
use todobot_gateway::server::{self, GatewayState};
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() {
    let cli = GatewayCliArgs::parse();

    let config = match GatewayConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Held until exit so buffered file logs are flushed.
    let _log_guard = init_logging(&config.log_level, config.log_file.as_deref());

    tracing::info!(
        addr = %config.bind_addr,
        trigger = %config.trigger,
        "starting todobot gateway"
    );

    let store = Arc::new(ListStore::new());
    let router = Router::with_trigger(store, config.trigger.clone());
    let state = Arc::new(GatewayState::with_config(router, config.max_frame_size));

    let (bound_addr, handle) =
        match server::start_server_with_state(&config.bind_addr, Arc::clone(&state)).await {
            Ok(started) => started,
            Err(e) => {
                tracing::error!(error = %e, "failed to start gateway");
                std::process::exit(1);
            }
        };
    tracing::info!(addr = %bound_addr, "gateway listening");

    tokio::select! {
        result = handle => {
            if let Err(e) = result {
                tracing::error!(error = %e, "gateway task failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!(
                sessions = state.session_count().await,
                "shutting down, closing adapter sessions"
            );
            state.close_all_sessions().await;
        }
    }
}

/// Initialize logging.
///
/// Logs go to stdout unless a file is configured, in which case they are
/// written through a non-blocking appender and the returned [`WorkerGuard`]
/// must be held until shutdown. `RUST_LOG` overrides `level`.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let Some((log_dir, file_name)) = file_path.and_then(|path| {
        let dir = path.parent()?;
        let name = path.file_name()?;
        Some((dir, name))
    }) else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    };

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
