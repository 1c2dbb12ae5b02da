//! The 106-tile deck: generation, shuffling, dealing.
//!
//! The deck is a plain `Vec<Tile>` owned by the session. Dealing removes
//! from the front; drawing pops from the back (the "top" of the stack).

use okeytable_protocol::{Tile, TileColor, DECK_SIZE, MAX_NUMBER};
use rand::Rng;

use crate::GameError;

/// Builds the full 106-tile multiset in deterministic generation order:
/// two copies of each number per color, colors in suit order, jokers
/// last. Not shuffled.
pub fn create() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(DECK_SIZE);
    for color in TileColor::SUITS {
        for number in 1..=MAX_NUMBER {
            tiles.push(Tile::new(color, number));
            tiles.push(Tile::new(color, number));
        }
    }
    tiles.push(Tile::JOKER);
    tiles.push(Tile::JOKER);
    tiles
}

/// In-place Fisher–Yates shuffle: each position `i`, from the end, swaps
/// with a uniformly chosen index in `0..=i`.
pub fn shuffle<R: Rng + ?Sized>(tiles: &mut [Tile], rng: &mut R) {
    for i in (1..tiles.len()).rev() {
        let j = rng.random_range(0..=i);
        tiles.swap(i, j);
    }
}

/// Removes and returns the first `n` tiles of the deck.
///
/// # Errors
/// Returns [`GameError::NotEnoughTiles`] when `n` exceeds the deck size;
/// the deck is left untouched in that case.
pub fn deal(deck: &mut Vec<Tile>, n: usize) -> Result<Vec<Tile>, GameError> {
    if n > deck.len() {
        return Err(GameError::NotEnoughTiles {
            requested: n,
            available: deck.len(),
        });
    }
    Ok(deck.drain(..n).collect())
}

/// Pops one tile from the top of the deck, if any.
pub fn draw_top(deck: &mut Vec<Tile>) -> Option<Tile> {
    deck.pop()
}
