//! Routes inbound platform events to checklist transitions and replies.
//!
//! Every event except a non-trigger message resolves (creating if needed)
//! the channel's list first. Then:
//!
//! - the trigger command posts a fresh rendering of the list;
//! - `add_task`, `edit_title` and `edit_{i}` buttons open a follow-up form;
//! - `toggle_{i}` and every recognised form submission apply a transition
//!   and re-render the originating message in place;
//! - unrecognised button or form ids are ignored.
//!
//! The router never validates task indices. Transitions treat a stale or
//! unparsable index as a no-op and the message is re-rendered regardless.

use std::collections::BTreeMap;
use std::sync::Arc;

use todobot_proto::event::{ChannelId, InboundEvent, InteractionContext};
use todobot_proto::ids::{self, ActionKind, FormKind, parse_action_id, parse_form_id};

use crate::forms;
use crate::platform::{Platform, PlatformError};
use crate::render::render;
use crate::store::ListStore;

/// Message text that posts the channel's checklist.
pub const DEFAULT_TRIGGER: &str = "!todo";

/// What the router did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Posted a new checklist message.
    Sent,
    /// Re-rendered the originating message.
    Updated,
    /// Opened a follow-up form.
    FormShown,
    /// Did nothing visible.
    Ignored,
}

/// Dispatches events against a shared [`ListStore`].
pub struct Router {
    store: Arc<ListStore>,
    trigger: String,
}

impl Router {
    /// Creates a router over `store` that answers to [`DEFAULT_TRIGGER`].
    #[must_use]
    pub fn new(store: Arc<ListStore>) -> Self {
        Self::with_trigger(store, DEFAULT_TRIGGER)
    }

    /// Creates a router over `store` that answers to a custom trigger text.
    #[must_use]
    pub fn with_trigger(store: Arc<ListStore>, trigger: impl Into<String>) -> Self {
        Self {
            store,
            trigger: trigger.into(),
        }
    }

    /// The store this router mutates.
    #[must_use]
    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// The command text that posts a checklist.
    #[must_use]
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Handles one inbound event, replying through `platform`.
    ///
    /// The channel's list stays locked until the reply has been accepted.
    ///
    /// # Errors
    ///
    /// Returns the [`PlatformError`] of a rejected reply. The list mutation
    /// made before the reply is kept.
    pub async fn handle_event<P: Platform>(
        &self,
        platform: &P,
        event: InboundEvent,
    ) -> Result<Outcome, PlatformError> {
        tracing::debug!(
            channel_id = %event.channel_id(),
            kind = event.kind(),
            "routing event"
        );

        match event {
            InboundEvent::Command {
                channel_id,
                author_is_bot,
                content,
            } => {
                self.handle_command(platform, &channel_id, author_is_bot, &content)
                    .await
            }
            InboundEvent::ButtonPress { context, custom_id } => {
                self.handle_button(platform, &context, &custom_id).await
            }
            InboundEvent::FormSubmit {
                context,
                custom_id,
                fields,
            } => {
                self.handle_form(platform, &context, &custom_id, &fields)
                    .await
            }
        }
    }

    async fn handle_command<P: Platform>(
        &self,
        platform: &P,
        channel_id: &ChannelId,
        author_is_bot: bool,
        content: &str,
    ) -> Result<Outcome, PlatformError> {
        if author_is_bot || content != self.trigger {
            return Ok(Outcome::Ignored);
        }

        let shared = self.store.get_or_create(channel_id);
        let list = shared.lock().await;
        platform.send(channel_id, render(&list)).await?;
        Ok(Outcome::Sent)
    }

    async fn handle_button<P: Platform>(
        &self,
        platform: &P,
        context: &InteractionContext,
        custom_id: &str,
    ) -> Result<Outcome, PlatformError> {
        let shared = self.store.get_or_create(&context.channel_id);
        let mut list = shared.lock().await;

        match parse_action_id(custom_id) {
            ActionKind::AddTask => {
                platform.show_form(context, forms::add_task_form()).await?;
                Ok(Outcome::FormShown)
            }
            ActionKind::EditTitle => {
                platform.show_form(context, forms::rename_form(&list)).await?;
                Ok(Outcome::FormShown)
            }
            ActionKind::EditTask(slot) => {
                platform
                    .show_form(context, forms::edit_task_form(&list, &slot))
                    .await?;
                Ok(Outcome::FormShown)
            }
            ActionKind::ToggleTask(slot) => {
                let changed = slot.index().is_some_and(|i| list.toggle_task(i));
                tracing::debug!(
                    channel_id = %context.channel_id,
                    slot = %slot,
                    changed,
                    "toggle task"
                );
                platform.update(context, render(&list)).await?;
                Ok(Outcome::Updated)
            }
            ActionKind::Unknown => {
                tracing::debug!(
                    channel_id = %context.channel_id,
                    custom_id,
                    "ignoring unknown button"
                );
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn handle_form<P: Platform>(
        &self,
        platform: &P,
        context: &InteractionContext,
        custom_id: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<Outcome, PlatformError> {
        let shared = self.store.get_or_create(&context.channel_id);
        let mut list = shared.lock().await;
        let value = |field_id: &str| fields.get(field_id).map_or("", String::as_str);

        match parse_form_id(custom_id) {
            FormKind::AddTask => {
                let index = list.add_task(value(ids::TASK_INPUT));
                tracing::debug!(channel_id = %context.channel_id, index, "task added");
            }
            FormKind::RenameList => {
                list.rename_list(value(ids::TITLE_INPUT));
                tracing::debug!(channel_id = %context.channel_id, "list renamed");
            }
            FormKind::EditTask(slot) => {
                let changed = slot
                    .index()
                    .is_some_and(|i| list.edit_task_text(i, value(ids::EDIT_INPUT)));
                tracing::debug!(
                    channel_id = %context.channel_id,
                    slot = %slot,
                    changed,
                    "edit task"
                );
            }
            FormKind::Unknown => {
                tracing::debug!(
                    channel_id = %context.channel_id,
                    custom_id,
                    "ignoring unknown form"
                );
                return Ok(Outcome::Ignored);
            }
        }

        platform.update(context, render(&list)).await?;
        Ok(Outcome::Updated)
    }
}
