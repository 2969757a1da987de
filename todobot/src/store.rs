//! Process-lifetime registry of channel checklists.
//!
//! The [`ListStore`] maps each channel to its [`TodoList`], creating a fresh
//! list the first time a channel is referenced. Lists are never removed.
//!
//! Every list sits behind its own async mutex. Callers hold that lock across
//! lookup, mutation, render and reply, so events for one channel are handled
//! one at a time even when sessions run on different worker threads, while
//! other channels proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use todobot_proto::event::ChannelId;
use tokio::sync::Mutex;

use crate::list::TodoList;

/// Shared, individually locked handle to one channel's list.
pub type SharedList = Arc<Mutex<TodoList>>;

/// In-memory channel → checklist map.
///
/// The outer map lock is synchronous and only held for lookup or insert,
/// never across an `.await`.
#[derive(Default)]
pub struct ListStore {
    lists: RwLock<HashMap<ChannelId, SharedList>>,
}

impl ListStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the channel's list, inserting a default one if absent.
    pub fn get_or_create(&self, channel_id: &ChannelId) -> SharedList {
        if let Some(list) = self.lists.read().get(channel_id) {
            return Arc::clone(list);
        }

        let mut lists = self.lists.write();
        let list = lists.entry(channel_id.clone()).or_insert_with(|| {
            tracing::info!(channel_id = %channel_id, "creating checklist for channel");
            Arc::new(Mutex::new(TodoList::new()))
        });
        Arc::clone(list)
    }

    /// Returns the channel's list without creating one.
    pub fn get(&self, channel_id: &ChannelId) -> Option<SharedList> {
        self.lists.read().get(channel_id).cloned()
    }

    /// Whether a list exists for the channel.
    pub fn contains(&self, channel_id: &ChannelId) -> bool {
        self.lists.read().contains_key(channel_id)
    }

    /// Number of channels with a list.
    pub fn len(&self) -> usize {
        self.lists.read().len()
    }

    /// Whether no channel has a list yet.
    pub fn is_empty(&self) -> bool {
        self.lists.read().is_empty()
    }

    /// Returns a copy of the channel's list, if it exists.
    ///
    /// Waits for any in-flight handler on that channel to finish.
    pub async fn snapshot(&self, channel_id: &ChannelId) -> Option<TodoList> {
        let list = self.get(channel_id)?;
        let guard = list.lock().await;
        Some(guard.clone())
    }
}
