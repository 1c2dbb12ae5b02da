//! The stand-in player: a fixed heuristic and a one-turn driver.
//!
//! The heuristic is deliberately simple (discard the highest number, no
//! meld awareness); it exists so a solo player always has opponents, not
//! to be good at the game.

use okeytable_protocol::Tile;
use rand::Rng;

use crate::engine::{self, Events};
use crate::session::GameSession;

/// Picks the tile to discard: the highest number in the hand, first
/// encountered on ties. Jokers carry number 0, so one is only ever
/// discarded from an all-joker hand.
pub fn choose_move(hand: &[Tile]) -> Option<Tile> {
    let mut best: Option<Tile> = None;
    for &tile in hand {
        match best {
            Some(current) if current.number >= tile.number => {}
            _ => best = Some(tile),
        }
    }
    best
}

/// Plays one full stand-in turn: draw, then discard the heuristic's
/// pick.
///
/// No-op unless the game is active and the seat holding the turn is a
/// stand-in. The draw and the play go through the regular engine paths,
/// so deck replenishment, the win check, and the turn advance behave
/// exactly as for a human; the private draw event is addressed to a seat
/// with no connection and never leaves the room.
pub fn run_once<R: Rng + ?Sized>(session: &mut GameSession, rng: &mut R) -> Events {
    if !session.stand_in_to_move() {
        return Vec::new();
    }
    let seat_index = session.turn;

    let mut events = engine::draw(session, seat_index, rng);

    let Some(pick) = choose_move(&session.seats[seat_index].hand) else {
        // A stand-in cannot reach its turn with an empty hand; the game
        // would have ended on its previous play.
        tracing::warn!(room = %session.room, seat = seat_index, "stand-in has nothing to play");
        return events;
    };
    events.extend(engine::play(session, seat_index, pick));

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use okeytable_protocol::TileColor;

    fn tile(color: TileColor, number: u8) -> Tile {
        Tile::new(color, number)
    }

    #[test]
    fn test_choose_move_picks_highest_number() {
        let hand = vec![
            tile(TileColor::Red, 4),
            tile(TileColor::Blue, 12),
            tile(TileColor::Black, 9),
        ];
        assert_eq!(choose_move(&hand), Some(tile(TileColor::Blue, 12)));
    }

    #[test]
    fn test_choose_move_tie_takes_first_encountered() {
        let hand = vec![
            tile(TileColor::Yellow, 11),
            tile(TileColor::Black, 11),
            tile(TileColor::Red, 2),
        ];
        assert_eq!(choose_move(&hand), Some(tile(TileColor::Yellow, 11)));
    }

    #[test]
    fn test_choose_move_avoids_jokers_while_it_can() {
        let hand = vec![Tile::JOKER, tile(TileColor::Red, 1)];
        assert_eq!(choose_move(&hand), Some(tile(TileColor::Red, 1)));
    }

    #[test]
    fn test_choose_move_all_jokers() {
        let hand = vec![Tile::JOKER, Tile::JOKER];
        assert_eq!(choose_move(&hand), Some(Tile::JOKER));
    }

    #[test]
    fn test_choose_move_empty_hand() {
        assert_eq!(choose_move(&[]), None);
    }
}
