//! Game rules for Okeytable.
//!
//! Everything in this crate is synchronous and deterministic given an
//! `Rng`: no channels, no timers, no I/O. The room layer owns a
//! [`GameSession`] and feeds it through the [`engine`] functions; each
//! call either mutates the session and returns the events to broadcast,
//! or leaves the session untouched and returns nothing (the fail-silent
//! policy for out-of-turn, wrong-phase, and not-in-hand actions).
//!
//! # Modules
//!
//! - [`deck`]: the 106-tile multiset, shuffling, dealing
//! - [`engine`]: join / stand-in fill / start / draw / play / end
//! - [`bot`]: the stand-in heuristic and its one-turn driver

pub mod bot;
pub mod deck;
pub mod engine;
mod error;
mod session;

pub use error::GameError;
pub use session::{
    GamePhase, GameSession, Seat, FIRST_SEAT_DEAL, OTHER_SEAT_DEAL, TABLE_SEATS,
};
