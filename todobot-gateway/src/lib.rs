//! todobot gateway library.
//!
//! Exposes the gateway server for use in tests and embedding. The server
//! accepts WebSocket connections from platform adapters, feeds their events
//! to the checklist router and streams the router's replies back.

pub mod config;
pub mod server;
pub mod session;
