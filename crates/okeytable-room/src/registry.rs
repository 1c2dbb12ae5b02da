//! Room registry: the process-wide table of live rooms.

use std::collections::HashMap;

use okeytable_protocol::RoomKey;

use crate::room::spawn_room;
use crate::{RoomConfig, RoomHandle};

/// Get-or-create mapping from room key to a running room actor.
///
/// Rooms are created on first reference and retained until shutdown;
/// there is no eviction. The registry never duplicates a live room for
/// the same key.
pub struct RoomRegistry {
    rooms: HashMap<RoomKey, RoomHandle>,
    config: RoomConfig,
}

impl RoomRegistry {
    /// An empty registry with default room settings.
    pub fn new() -> Self {
        Self::with_config(RoomConfig::default())
    }

    /// An empty registry whose rooms all use `config`.
    pub fn with_config(config: RoomConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            config,
        }
    }

    /// Returns the room for `key`, spawning it on first reference.
    /// Idempotent: repeated calls with the same key return handles to
    /// the same actor.
    pub fn ensure_room(&mut self, key: &RoomKey) -> RoomHandle {
        if let Some(handle) = self.rooms.get(key) {
            return handle.clone();
        }
        let handle = spawn_room(key.clone(), self.config.clone());
        self.rooms.insert(key.clone(), handle.clone());
        tracing::info!(room = %key, "room created");
        handle
    }

    /// Returns the room for `key`, if it exists. Unknown rooms are not
    /// created here: only a join brings a room into being.
    pub fn get(&self, key: &RoomKey) -> Option<RoomHandle> {
        self.rooms.get(key).cloned()
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Keys of all live rooms.
    pub fn room_keys(&self) -> Vec<RoomKey> {
        self.rooms.keys().cloned().collect()
    }

    /// Shuts down every room and clears the table.
    pub async fn shutdown_all(&mut self) {
        for (key, handle) in self.rooms.drain() {
            if handle.shutdown().await.is_err() {
                tracing::debug!(room = %key, "room was already gone at shutdown");
            }
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
