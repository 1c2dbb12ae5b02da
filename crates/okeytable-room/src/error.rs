//! Error types for the room layer.

use okeytable_protocol::{ConnId, RoomKey};

/// Errors that can occur during room operations.
///
/// Game-rule rejections never appear here; those are silent by policy.
/// These cover structural problems the embedding layer may want to log.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomKey),

    /// The room is not in a state that seats new players, or every seat
    /// is held by a human.
    #[error("room {0} is not seating players")]
    NotJoinable(RoomKey),

    /// The connection already holds a seat in this room.
    #[error("connection {0} already seated in room {1}")]
    AlreadySeated(ConnId, RoomKey),

    /// The room's command channel is closed or full.
    #[error("room {0} is unavailable")]
    Unavailable(RoomKey),
}
