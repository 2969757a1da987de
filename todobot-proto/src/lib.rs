//! Shared protocol definitions for todobot.
//!
//! Everything that crosses the boundary between the checklist core and a
//! chat-platform adapter lives here: the custom identifiers embedded in
//! buttons and forms, the display payloads the core renders, the inbound
//! events adapters deliver, and the gateway frames that carry them.

pub mod display;
pub mod event;
pub mod gateway;
pub mod ids;
