//! Core of the todobot checklist bot.
//!
//! Each chat channel owns one [`list::TodoList`], kept in a
//! [`store::ListStore`] for the lifetime of the process. The
//! [`router::Router`] turns inbound platform events into list transitions
//! and replies, talking to the chat platform only through the
//! [`platform::Platform`] trait.

pub mod forms;
pub mod list;
pub mod platform;
pub mod render;
pub mod router;
pub mod store;
