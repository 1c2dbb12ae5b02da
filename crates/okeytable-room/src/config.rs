//! Room configuration.

use std::time::Duration;

/// Settings for a room instance.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Pacing delay before a stand-in takes its turn. Gives human
    /// players time to read the table between automated plays.
    pub bot_delay: Duration,

    /// Command channel size for the room actor. Senders wait when the
    /// channel is full (backpressure).
    pub channel_size: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            bot_delay: Duration::from_millis(900),
            channel_size: 64,
        }
    }
}
