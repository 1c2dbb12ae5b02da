//! The turn engine: validates actions against a session, mutates it, and
//! returns the events to broadcast.
//!
//! Every function here follows the same contract: an invalid action
//! (wrong phase, wrong seat, tile not held) returns an empty event list
//! and leaves the session exactly as it was. Nothing in this module can
//! panic on untrusted input.

use okeytable_protocol::{Audience, ConnId, FaceDown, ServerEvent, Tile};
use rand::Rng;

use crate::deck;
use crate::session::{GamePhase, GameSession, Seat, FIRST_SEAT_DEAL, OTHER_SEAT_DEAL, TABLE_SEATS};

/// Events produced by one engine call, each paired with its audience.
pub type Events = Vec<(Audience, ServerEvent)>;

/// Fixed name pool for stand-in seats.
pub const STAND_IN_NAMES: [&str; 4] = ["Defne", "Kerem", "Selin", "Baran"];

// ---------------------------------------------------------------------------
// Seating
// ---------------------------------------------------------------------------

/// Seats a connection in the session.
///
/// The first human to join takes seat 0 and pulls in three stand-ins so
/// a solo player always faces a full table. Humans joining later while
/// the session is still in the lobby take over a stand-in seat. Joins
/// during an active or ended game, duplicate joins from the same
/// connection, and joins to an all-human table are silently ignored.
pub fn join(session: &mut GameSession, conn: ConnId, name: &str) -> Events {
    if session.phase != GamePhase::Lobby {
        tracing::debug!(room = %session.room, %conn, phase = %session.phase, "join outside lobby ignored");
        return Vec::new();
    }
    if session.seat_of_conn(conn).is_some() {
        tracing::debug!(room = %session.room, %conn, "duplicate join ignored");
        return Vec::new();
    }

    if let Some(index) = session.seats.iter().position(|seat| seat.stand_in) {
        // Take over a stand-in seat.
        session.seats[index] = Seat::human(name, conn);
    } else if session.seats.len() < TABLE_SEATS {
        session.seats.push(Seat::human(name, conn));
    } else {
        tracing::debug!(room = %session.room, %conn, "join to a full table ignored");
        return Vec::new();
    }

    tracing::info!(room = %session.room, %conn, name, "player joined");

    let mut events = vec![(
        Audience::Table,
        ServerEvent::PlayerJoined {
            conn,
            name: name.to_owned(),
        },
    )];

    // The first human at the table brings the stand-ins with them.
    if session.seats.iter().filter(|seat| !seat.stand_in).count() == 1 {
        let names = add_stand_ins(session);
        if !names.is_empty() {
            events.push((Audience::Table, ServerEvent::BotsAdded { names }));
        }
    }

    events
}

/// Fills empty seats up to four with stand-ins, returning the names
/// added. No-op on an already-full table.
pub fn add_stand_ins(session: &mut GameSession) -> Vec<String> {
    let mut added = Vec::new();
    let mut pool = STAND_IN_NAMES.iter();

    while session.seats.len() < TABLE_SEATS {
        let name = match pool.next() {
            // Skip pool names already taken by a human.
            Some(candidate) if session.seats.iter().any(|s| s.name == *candidate) => continue,
            Some(candidate) => (*candidate).to_owned(),
            None => format!("Bot {}", session.seats.len() + 1),
        };
        session.seats.push(Seat::stand_in(name.clone()));
        added.push(name);
    }

    if !added.is_empty() {
        tracing::info!(room = %session.room, count = added.len(), "stand-ins seated");
    }
    added
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Starts a deal: fresh shuffled deck, 15/14/14/14 hands, empty discard,
/// turn to seat 0, phase Active.
///
/// Valid from Lobby or Ended; a start while a deal is already running is
/// ignored, so a race between two start requests yields exactly one deal.
/// Each successful start bumps the generation counter, which retires any
/// bot wake timers queued for the previous deal.
pub fn start<R: Rng + ?Sized>(session: &mut GameSession, rng: &mut R) -> Events {
    if !session.phase.can_start() {
        tracing::debug!(room = %session.room, "duplicate start ignored");
        return Vec::new();
    }
    if session.seats.is_empty() {
        tracing::debug!(room = %session.room, "start with no seats ignored");
        return Vec::new();
    }

    let mut events = Vec::new();

    // Guarantee a full table even if the join-time fill never ran.
    let late_fill = add_stand_ins(session);
    if !late_fill.is_empty() {
        events.push((Audience::Table, ServerEvent::BotsAdded { names: late_fill }));
    }

    let mut fresh = deck::create();
    deck::shuffle(&mut fresh, rng);
    session.deck = fresh;
    session.discard.clear();

    for index in 0..session.seats.len() {
        let count = if index == 0 { FIRST_SEAT_DEAL } else { OTHER_SEAT_DEAL };
        match deck::deal(&mut session.deck, count) {
            Ok(hand) => session.seats[index].hand = hand,
            Err(e) => {
                // 57 of 106 tiles are dealt; unreachable with a full deck.
                tracing::error!(room = %session.room, error = %e, "deal failed");
                return events;
            }
        }
    }

    session.turn = 0;
    session.phase = GamePhase::Active;
    session.generation = session.generation.wrapping_add(1);

    tracing::info!(
        room = %session.room,
        generation = session.generation,
        deck = session.deck.len(),
        "game started"
    );

    let seats = session.seat_infos();
    let deck_remaining = session.deck.len();
    for (index, seat) in session.seats.iter().enumerate() {
        if seat.stand_in {
            continue;
        }
        // One private copy per human seat, carrying only that seat's hand.
        events.push((
            Audience::Seat(index),
            ServerEvent::GameStarted {
                seat_index: index,
                own_hand: seat.hand.clone(),
                seats: seats.clone(),
                deck_remaining,
            },
        ));
    }
    events.push((
        Audience::Table,
        ServerEvent::GameInfo {
            turn_index: 0,
            discard_top: None,
        },
    ));

    events
}

/// Ends the game. With a winner the seat is surfaced to the table; with
/// `None` (or an out-of-range index) the game is reported as aborted.
/// No-op unless a deal is active. The turn pointer stays frozen.
pub fn end(session: &mut GameSession, winner: Option<usize>) -> Events {
    if session.phase != GamePhase::Active {
        return Vec::new();
    }
    session.phase = GamePhase::Ended;

    let winner_index = winner.filter(|&i| i < session.seats.len());
    let winner_name = winner_index.and_then(|i| session.seats.get(i)).map(|s| s.name.clone());

    tracing::info!(room = %session.room, winner = ?winner_index, "game ended");

    vec![(
        Audience::Table,
        ServerEvent::GameEnded {
            winner_index,
            winner_name,
        },
    )]
}

// ---------------------------------------------------------------------------
// Turn actions
// ---------------------------------------------------------------------------

/// Draws one tile from the top of the deck into the acting seat's hand.
///
/// Only the seat holding the turn may draw, and drawing never advances
/// the turn. An exhausted deck is replenished by shuffling the discard
/// pile back in; if the discard is empty too, the draw is ignored.
pub fn draw<R: Rng + ?Sized>(session: &mut GameSession, seat_index: usize, rng: &mut R) -> Events {
    if !session.phase.is_active() || seat_index != session.turn {
        return Vec::new();
    }

    if session.deck.is_empty() {
        replenish_from_discard(session, rng);
    }
    let Some(tile) = deck::draw_top(&mut session.deck) else {
        tracing::debug!(room = %session.room, seat = seat_index, "draw with no tiles left ignored");
        return Vec::new();
    };

    let Some(seat) = session.seats.get_mut(seat_index) else {
        return Vec::new();
    };
    seat.hand.push(tile);

    vec![
        (Audience::Seat(seat_index), ServerEvent::TileDrawn { tile }),
        (
            Audience::Table,
            ServerEvent::TileDrawnPublic {
                seat_index,
                tile: FaceDown,
            },
        ),
    ]
}

/// Plays (discards) one tile from the acting seat's hand.
///
/// Only the seat holding the turn may play, and the tile must be in its
/// hand; the two physical copies of a tile are interchangeable, so either
/// satisfies a match. A play that empties the hand ends the game with
/// that seat as winner and freezes the turn; otherwise the turn advances
/// by one seat.
pub fn play(session: &mut GameSession, seat_index: usize, tile: Tile) -> Events {
    if !session.phase.is_active() || seat_index != session.turn {
        return Vec::new();
    }
    let Some(seat) = session.seats.get_mut(seat_index) else {
        return Vec::new();
    };
    let Some(position) = seat.hand.iter().position(|held| *held == tile) else {
        tracing::debug!(room = %session.room, seat = seat_index, %tile, "play of a tile not in hand ignored");
        return Vec::new();
    };

    let played = seat.hand.remove(position);
    let hand_empty = seat.hand.is_empty();
    session.discard.push(played);

    let mut events = vec![(
        Audience::Table,
        ServerEvent::TilePlayed {
            seat_index,
            tile: played,
        },
    )];

    if hand_empty {
        events.extend(end(session, Some(seat_index)));
    } else {
        session.turn = (session.turn + 1) % TABLE_SEATS;
        events.push((
            Audience::Table,
            ServerEvent::GameInfo {
                turn_index: session.turn,
                discard_top: session.discard.last().copied(),
            },
        ));
    }

    events
}

/// Shuffles the discard pile back into the deck. Conservation holds: the
/// 106 tiles only move between piles.
fn replenish_from_discard<R: Rng + ?Sized>(session: &mut GameSession, rng: &mut R) {
    if session.discard.is_empty() {
        return;
    }
    tracing::info!(
        room = %session.room,
        tiles = session.discard.len(),
        "deck exhausted, reshuffling discard pile"
    );
    session.deck.append(&mut session.discard);
    deck::shuffle(&mut session.deck, rng);
}
