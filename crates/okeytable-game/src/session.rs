//! Session state: seats, hands, deck, discard, turn pointer, phase.

use okeytable_protocol::{ConnId, RoomKey, SeatInfo, Tile};
use serde::{Deserialize, Serialize};

/// Seats at a table. Always exactly this many once a game is active.
pub const TABLE_SEATS: usize = 4;

/// Tiles dealt to seat 0, which opens the game.
pub const FIRST_SEAT_DEAL: usize = 15;

/// Tiles dealt to seats 1..=3.
pub const OTHER_SEAT_DEAL: usize = 14;

// ---------------------------------------------------------------------------
// GamePhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a session.
///
/// ```text
/// Lobby → Active → Ended
///            ↑        │
///            └─(start)─┘
/// ```
///
/// - **Lobby**: seats are filling; joins are accepted.
/// - **Active**: a deal is on the table; only draw/play/end apply.
/// - **Ended**: a hand emptied or the game was aborted. A new `start`
///   deals a rematch in the same room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Lobby,
    Active,
    Ended,
}

impl GamePhase {
    /// Returns `true` while a deal is being played.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if a `start` action may begin a (new) deal.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Lobby | Self::Ended)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::Active => write!(f, "Active"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One of the four player slots at a table.
///
/// A seat is either held by a human connection or by a stand-in driven
/// by the bot loop. The hand is the seat's private multiset of tiles;
/// only draw (add one) and play (remove one) touch it.
#[derive(Debug, Clone)]
pub struct Seat {
    pub name: String,
    pub conn: Option<ConnId>,
    pub stand_in: bool,
    pub hand: Vec<Tile>,
}

impl Seat {
    pub fn human(name: impl Into<String>, conn: ConnId) -> Self {
        Self {
            name: name.into(),
            conn: Some(conn),
            stand_in: false,
            hand: Vec::new(),
        }
    }

    pub fn stand_in(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conn: None,
            stand_in: true,
            hand: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// The authoritative per-room game state.
///
/// Owned exclusively by one room actor; the deck never lives anywhere
/// else. The `generation` counter increments on every successful start
/// and is what invalidates bot wake timers queued during a previous deal.
#[derive(Debug)]
pub struct GameSession {
    pub room: RoomKey,
    pub seats: Vec<Seat>,
    pub deck: Vec<Tile>,
    pub discard: Vec<Tile>,
    /// Index of the seat allowed to draw and play. Always `< TABLE_SEATS`
    /// while active; frozen when the game ends.
    pub turn: usize,
    pub phase: GamePhase,
    pub generation: u64,
}

impl GameSession {
    /// A fresh lobby with no seats, no deck, no deal.
    pub fn new(room: RoomKey) -> Self {
        Self {
            room,
            seats: Vec::new(),
            deck: Vec::new(),
            discard: Vec::new(),
            turn: 0,
            phase: GamePhase::Lobby,
            generation: 0,
        }
    }

    /// Finds the seat occupied by a connection, used to authorize actions.
    pub fn seat_of_conn(&self, conn: ConnId) -> Option<usize> {
        self.seats.iter().position(|seat| seat.conn == Some(conn))
    }

    /// The seat holding the turn, if the table has one.
    pub fn current_seat(&self) -> Option<&Seat> {
        self.seats.get(self.turn)
    }

    /// Whether the bot loop should act: an active deal with a stand-in
    /// holding the turn.
    pub fn stand_in_to_move(&self) -> bool {
        self.phase.is_active() && self.current_seat().is_some_and(|seat| seat.stand_in)
    }

    /// The public seat listing (names and stand-in flags, never hands).
    pub fn seat_infos(&self) -> Vec<SeatInfo> {
        self.seats
            .iter()
            .map(|seat| SeatInfo {
                name: seat.name.clone(),
                stand_in: seat.stand_in,
            })
            .collect()
    }

    pub fn hand_sizes(&self) -> Vec<usize> {
        self.seats.iter().map(|seat| seat.hand.len()).collect()
    }

    /// Every tile in play: deck + hands + discard. Equals the deck size
    /// (106) in every reachable dealt state; tests lean on this.
    pub fn tile_count(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.seats.iter().map(|seat| seat.hand.len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_can_start() {
        assert!(GamePhase::Lobby.can_start());
        assert!(GamePhase::Ended.can_start());
        assert!(!GamePhase::Active.can_start());
    }

    #[test]
    fn test_phase_is_active() {
        assert!(GamePhase::Active.is_active());
        assert!(!GamePhase::Lobby.is_active());
        assert!(!GamePhase::Ended.is_active());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(GamePhase::Lobby.to_string(), "Lobby");
        assert_eq!(GamePhase::Active.to_string(), "Active");
    }

    #[test]
    fn test_new_session_is_an_empty_lobby() {
        let s = GameSession::new(RoomKey::new("t1"));
        assert_eq!(s.phase, GamePhase::Lobby);
        assert!(s.seats.is_empty());
        assert!(s.deck.is_empty());
        assert!(s.discard.is_empty());
        assert_eq!(s.turn, 0);
        assert_eq!(s.generation, 0);
    }

    #[test]
    fn test_seat_of_conn() {
        let mut s = GameSession::new(RoomKey::new("t1"));
        s.seats.push(Seat::human("ayse", ConnId(10)));
        s.seats.push(Seat::stand_in("Defne"));
        assert_eq!(s.seat_of_conn(ConnId(10)), Some(0));
        assert_eq!(s.seat_of_conn(ConnId(99)), None);
    }

    #[test]
    fn test_stand_in_to_move_requires_active_phase() {
        let mut s = GameSession::new(RoomKey::new("t1"));
        s.seats.push(Seat::stand_in("Defne"));
        assert!(!s.stand_in_to_move(), "lobby phase never moves a bot");
        s.phase = GamePhase::Active;
        assert!(s.stand_in_to_move());
    }
}
