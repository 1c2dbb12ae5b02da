//! Unified error type for the Okeytable server.

use okeytable_game::GameError;
use okeytable_protocol::ProtocolError;
use okeytable_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// When embedding the `okeytable` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum OkeytableError {
    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A rules-level error (deck exhausted mid-deal).
    #[error(transparent)]
    Game(#[from] GameError),

    /// A room-level error (not found, not joinable, unavailable).
    #[error(transparent)]
    Room(#[from] RoomError),
}
