//! Wire protocol for Okeytable.
//!
//! This crate defines the "language" spoken between the table server and
//! its clients:
//!
//! - **Tiles** ([`Tile`], [`TileColor`], [`FaceDown`]): the game pieces
//!   and the redaction sentinel used in public draw announcements.
//! - **Messages** ([`ClientAction`], [`ServerEvent`], [`Audience`]): the
//!   tagged inbound/outbound variants and who receives them.
//! - **Codec** ([`Codec`], [`JsonCodec`]): how messages become bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! The protocol layer knows nothing about rooms or connections. It only
//! defines shapes; the room layer decides what the shapes mean.

mod codec;
mod error;
mod tile;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use tile::{FaceDown, Tile, TileColor, DECK_SIZE, JOKER_COUNT, MAX_NUMBER};
pub use types::{Audience, ClientAction, ConnId, RoomKey, SeatInfo, ServerEvent};
