//! Message types for the Okeytable wire format.
//!
//! Every inbound action and outbound event is a tagged serde variant with
//! an explicit schema. Payloads that fail to decode are dropped by the
//! caller rather than trusted; there is no untyped passthrough.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::{FaceDown, Tile};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a connection.
///
/// Newtype over `u64` so a connection id can never be confused with a
/// seat index. `#[serde(transparent)]` keeps it a plain number on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnId(pub u64);

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// A room identifier, chosen by clients.
///
/// Rooms are keyed by arbitrary strings (`"t1"`, `"friday-night"`); the
/// first join to an unseen key creates the room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(pub String);

impl RoomKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// Who should receive an outbound event.
///
/// The rules engine emits `(Audience, ServerEvent)` pairs; the room layer
/// resolves each audience to concrete connections. Events addressed to a
/// stand-in seat have no connection behind them and are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    /// Every connected player at the table.
    Table,
    /// The connection occupying one specific seat.
    Seat(usize),
}

// ---------------------------------------------------------------------------
// Inbound actions
// ---------------------------------------------------------------------------

/// An action sent by a client.
///
/// `#[serde(tag = "type", rename_all = "snake_case")]` gives internally
/// tagged JSON: `{ "type": "play", "room": "t1", "tile": {...} }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientAction {
    /// Take a seat in a room, creating the room on first reference.
    Join { room: RoomKey, name: String },

    /// Shuffle, deal, and begin play. Ignored while a game is running.
    Start { room: RoomKey },

    /// Draw one tile from the top of the deck. Only valid on the caller's
    /// turn.
    Draw { room: RoomKey },

    /// Discard one tile from the caller's hand. Only valid on the
    /// caller's turn.
    Play { room: RoomKey, tile: Tile },

    /// End the game, optionally naming a winning seat. Without a winner
    /// this is an abort.
    End {
        room: RoomKey,
        #[serde(default)]
        winner: Option<usize>,
    },
}

impl ClientAction {
    /// The room this action addresses.
    pub fn room(&self) -> &RoomKey {
        match self {
            Self::Join { room, .. }
            | Self::Start { room }
            | Self::Draw { room }
            | Self::Play { room, .. }
            | Self::End { room, .. } => room,
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound events
// ---------------------------------------------------------------------------

/// A seat as shown to the whole table: name and whether it is automated.
/// Never carries hand contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub name: String,
    pub stand_in: bool,
}

/// An event sent by the server.
///
/// Private events (`GameStarted`, `TileDrawn`) are addressed to a single
/// seat and must never include another seat's hand; public events reveal
/// only what is public at a real table (played tiles yes, drawn tiles no).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A player took a seat (room-wide).
    PlayerJoined { conn: ConnId, name: String },

    /// Stand-ins were seated to fill the table (room-wide).
    BotsAdded { names: Vec<String> },

    /// A fresh deal, one copy per human seat (private). `own_hand` is the
    /// receiving seat's hand and nothing else.
    GameStarted {
        seat_index: usize,
        own_hand: Vec<Tile>,
        seats: Vec<SeatInfo>,
        deck_remaining: usize,
    },

    /// Turn pointer and discard top after a state change (room-wide).
    GameInfo {
        turn_index: usize,
        discard_top: Option<Tile>,
    },

    /// The tile just drawn, revealed (private, drawer only).
    TileDrawn { tile: Tile },

    /// A seat drew a tile, identity hidden (room-wide).
    TileDrawnPublic { seat_index: usize, tile: FaceDown },

    /// A seat discarded a tile, revealed (room-wide). Played tiles are
    /// public.
    TilePlayed { seat_index: usize, tile: Tile },

    /// The game is over (room-wide). Both fields are `null` for an abort.
    GameEnded {
        winner_index: Option<usize>,
        winner_name: Option<String>,
    },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! JSON-shape tests, one per variant: clients parse these payloads
    //! by tag and field name, so the serde attributes are part of the
    //! contract.

    use super::*;
    use crate::tile::TileColor;

    fn tile(color: TileColor, number: u8) -> Tile {
        Tile::new(color, number)
    }

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_conn_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ConnId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_conn_id_display() {
        assert_eq!(ConnId(7).to_string(), "C-7");
    }

    #[test]
    fn test_room_key_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomKey::new("t1")).unwrap();
        assert_eq!(json, "\"t1\"");
    }

    #[test]
    fn test_room_key_from_str() {
        let key: RoomKey = "lobby-3".into();
        assert_eq!(key.to_string(), "lobby-3");
    }

    // =====================================================================
    // ClientAction
    // =====================================================================

    #[test]
    fn test_join_action_json_format() {
        let action = ClientAction::Join {
            room: RoomKey::new("t1"),
            name: "ayse".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "join");
        assert_eq!(json["room"], "t1");
        assert_eq!(json["name"], "ayse");
    }

    #[test]
    fn test_start_action_round_trip() {
        let action = ClientAction::Start {
            room: RoomKey::new("t1"),
        };
        let bytes = serde_json::to_vec(&action).unwrap();
        let decoded: ClientAction = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn test_play_action_json_format() {
        let action = ClientAction::Play {
            room: RoomKey::new("t1"),
            tile: tile(TileColor::Red, 7),
        };
        let json: serde_json::Value = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "play");
        assert_eq!(json["tile"]["color"], "red");
        assert_eq!(json["tile"]["number"], 7);
    }

    #[test]
    fn test_end_action_winner_defaults_to_none() {
        // Clients may omit the winner field entirely.
        let json = r#"{"type": "end", "room": "t1"}"#;
        let action: ClientAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            ClientAction::End {
                room: RoomKey::new("t1"),
                winner: None,
            }
        );
    }

    #[test]
    fn test_action_room_accessor() {
        let action = ClientAction::Draw {
            room: RoomKey::new("t9"),
        };
        assert_eq!(action.room(), &RoomKey::new("t9"));
    }

    #[test]
    fn test_action_with_unknown_tag_is_rejected() {
        let json = r#"{"type": "teleport", "room": "t1"}"#;
        let result: Result<ClientAction, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_action_with_missing_field_is_rejected() {
        let json = r#"{"type": "join", "room": "t1"}"#;
        let result: Result<ClientAction, _> = serde_json::from_str(json);
        assert!(result.is_err(), "join without a name must not decode");
    }

    #[test]
    fn test_action_with_bad_tile_is_rejected() {
        let json = r#"{"type": "play", "room": "t1", "tile": {"color": "purple", "number": 3}}"#;
        let result: Result<ClientAction, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerEvent
    // =====================================================================

    #[test]
    fn test_player_joined_json_format() {
        let event = ServerEvent::PlayerJoined {
            conn: ConnId(3),
            name: "mehmet".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "player_joined");
        assert_eq!(json["conn"], 3);
        assert_eq!(json["name"], "mehmet");
    }

    #[test]
    fn test_bots_added_round_trip() {
        let event = ServerEvent::BotsAdded {
            names: vec!["Defne".into(), "Kerem".into(), "Selin".into()],
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_game_started_json_format() {
        let event = ServerEvent::GameStarted {
            seat_index: 0,
            own_hand: vec![tile(TileColor::Blue, 1)],
            seats: vec![SeatInfo {
                name: "ayse".into(),
                stand_in: false,
            }],
            deck_remaining: 49,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "game_started");
        assert_eq!(json["seat_index"], 0);
        assert_eq!(json["deck_remaining"], 49);
        assert_eq!(json["seats"][0]["stand_in"], false);
    }

    #[test]
    fn test_game_info_with_empty_discard() {
        let event = ServerEvent::GameInfo {
            turn_index: 0,
            discard_top: None,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "game_info");
        assert!(json["discard_top"].is_null());
    }

    #[test]
    fn test_tile_drawn_public_hides_the_tile() {
        let event = ServerEvent::TileDrawnPublic {
            seat_index: 2,
            tile: FaceDown,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tile_drawn_public");
        assert_eq!(json["tile"], "face-down");
    }

    #[test]
    fn test_tile_played_reveals_the_tile() {
        let event = ServerEvent::TilePlayed {
            seat_index: 1,
            tile: tile(TileColor::Black, 13),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tile_played");
        assert_eq!(json["tile"]["number"], 13);
    }

    #[test]
    fn test_game_ended_abort_is_all_null() {
        let event = ServerEvent::GameEnded {
            winner_index: None,
            winner_name: None,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "game_ended");
        assert!(json["winner_index"].is_null());
        assert!(json["winner_name"].is_null());
    }

    #[test]
    fn test_game_ended_with_winner_round_trip() {
        let event = ServerEvent::GameEnded {
            winner_index: Some(2),
            winner_name: Some("Kerem".into()),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    // =====================================================================
    // Audience
    // =====================================================================

    #[test]
    fn test_audience_variants() {
        assert_ne!(Audience::Table, Audience::Seat(0));
        assert_eq!(Audience::Seat(3), Audience::Seat(3));
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<ClientAction, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }
}
