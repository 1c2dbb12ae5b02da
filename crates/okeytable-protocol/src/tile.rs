//! Tile types shared by the rules engine and the wire format.
//!
//! The full deck is a fixed multiset: two copies of every (color, number)
//! pair for the four real colors, plus two jokers. 4 colors × 13 numbers
//! × 2 copies + 2 jokers = 106 tiles.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of tiles in a complete deck.
pub const DECK_SIZE: usize = 106;

/// Number of jokers in a complete deck.
pub const JOKER_COUNT: usize = 2;

/// Highest tile number. Numbers run 1..=13; jokers carry 0.
pub const MAX_NUMBER: u8 = 13;

/// A tile color. Jokers are modeled as their own color with number 0.
///
/// Serialized lowercase (`"red"`, `"joker"`, ...) so client payloads stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Yellow,
    Blue,
    Black,
    Joker,
}

impl TileColor {
    /// The four non-joker colors, in deck generation order.
    pub const SUITS: [TileColor; 4] = [
        TileColor::Red,
        TileColor::Yellow,
        TileColor::Blue,
        TileColor::Black,
    ];
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Black => "black",
            Self::Joker => "joker",
        };
        write!(f, "{name}")
    }
}

/// One physical tile. The two copies of each (color, number) pair are
/// interchangeable: equality is by value, and removing "a red 7" from a
/// hand may remove either copy.
///
/// Deserialization enforces the number range, so a tile that decodes is
/// always one that could exist in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub color: TileColor,
    /// 1..=13 for real colors, 0 for jokers.
    pub number: u8,
}

impl Tile {
    /// A joker tile.
    pub const JOKER: Tile = Tile {
        color: TileColor::Joker,
        number: 0,
    };

    pub fn new(color: TileColor, number: u8) -> Self {
        Self { color, number }
    }

    pub fn is_joker(&self) -> bool {
        self.color == TileColor::Joker
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawTile {
            color: TileColor,
            number: u8,
        }

        let raw = RawTile::deserialize(deserializer)?;
        let valid = match raw.color {
            TileColor::Joker => raw.number == 0,
            _ => (1..=MAX_NUMBER).contains(&raw.number),
        };
        if !valid {
            return Err(serde::de::Error::custom(format!(
                "tile number {} is out of range for color {}",
                raw.number, raw.color
            )));
        }
        Ok(Tile {
            color: raw.color,
            number: raw.number,
        })
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            write!(f, "joker")
        } else {
            write!(f, "{} {}", self.color, self.number)
        }
    }
}

/// Sentinel for a tile whose identity is hidden from the audience.
///
/// Public draw announcements reveal that a seat drew, never what it drew.
/// On the wire this serializes as the string `"face-down"` so clients can
/// render a tile back without learning its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceDown;

const FACE_DOWN_STR: &str = "face-down";

impl Serialize for FaceDown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(FACE_DOWN_STR)
    }
}

impl<'de> Deserialize<'de> for FaceDown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == FACE_DOWN_STR {
            Ok(FaceDown)
        } else {
            Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&s),
                &"the string \"face-down\"",
            ))
        }
    }
}
