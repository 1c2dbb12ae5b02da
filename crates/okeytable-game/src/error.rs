//! Error types for the rules layer.
//!
//! Most rule violations are not errors at all: the engine ignores them
//! silently by contract. `GameError` covers the genuine faults, which in
//! practice only the deck can produce.

/// Errors that can occur inside the rules engine.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A deal asked for more tiles than the deck holds. Cannot happen
    /// with a full deck and four seats (57 of 106 tiles are dealt), so
    /// hitting this indicates a caller bug.
    #[error("not enough tiles: requested {requested}, deck has {available}")]
    NotEnoughTiles { requested: usize, available: usize },
}
