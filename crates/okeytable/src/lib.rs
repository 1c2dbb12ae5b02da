//! # Okeytable
//!
//! Authoritative table server for a four-seat tile-matching game.
//!
//! Players join named rooms, empty seats are filled with automated
//! stand-ins, and the server owns all game state: shuffling, dealing,
//! turn order, and what each seat is allowed to see. Clients only ever
//! receive their own hand.
//!
//! The workspace is layered:
//!
//! - `okeytable-protocol`: tiles, actions, events, and the codec.
//! - `okeytable-game`: the pure rules engine and the stand-in heuristic.
//! - `okeytable-room`: one Tokio actor per room, plus the registry.
//! - `okeytable` (this crate): the [`GameServer`] facade a transport
//!   embeds.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use okeytable::prelude::*;
//! use tokio::sync::mpsc;
//!
//! # async fn demo() {
//! let server = GameServer::new();
//! let (tx, mut rx) = mpsc::unbounded_channel();
//!
//! // Bytes in (from any transport), events out on the channel.
//! server
//!     .handle_data(
//!         ConnId(1),
//!         br#"{"type": "join", "room": "t1", "name": "ayse"}"#,
//!         &tx,
//!     )
//!     .await;
//! while let Some(event) = rx.recv().await {
//!     let _bytes = server.encode_event(&event);
//! }
//! # }
//! ```

mod error;
mod server;

pub use error::OkeytableError;
pub use server::GameServer;

/// Installs a `tracing` subscriber reading `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The commonly used surface, for glob imports.
pub mod prelude {
    pub use okeytable_protocol::{
        Audience, ClientAction, Codec, ConnId, FaceDown, JsonCodec, RoomKey, SeatInfo,
        ServerEvent, Tile, TileColor,
    };
    pub use okeytable_room::{EventSender, RoomConfig, RoomError, RoomHandle, RoomRegistry};

    pub use crate::{GameServer, OkeytableError};
}
