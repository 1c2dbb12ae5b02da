//! Room lifecycle management for Okeytable.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! [`GameSession`](okeytable_game::GameSession). All access goes through
//! the room's command queue, so inbound actions and bot wake timers are
//! processed one at a time and can never interleave inside a session.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: get-or-create mapping from room key to a room
//! - [`RoomHandle`]: send commands to a running room actor
//! - [`RoomConfig`]: bot pacing and channel sizing
//! - [`RoomInfo`]: observable snapshot of a room's state

mod config;
mod error;
mod registry;
mod room;

pub use config::RoomConfig;
pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{EventSender, RoomHandle, RoomInfo};
