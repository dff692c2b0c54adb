//! Tiles, factories and player seats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of distinct tile colors
pub const COLOR_COUNT: usize = 5;

/// Canonical color order; wall row `r` is this sequence shifted right by `r`
pub const ALL_COLORS: [Color; COLOR_COUNT] = [
    Color::Blue,
    Color::Yellow,
    Color::Red,
    Color::Black,
    Color::White,
];

/// Tiles dealt to each factory at the start of a round
pub const FACTORY_CAPACITY: usize = 4;

// ============================================================================
// COLOR
// ============================================================================

/// Tile color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[serde(alias = "Blue", alias = "BLUE")]
    Blue = 0,
    #[serde(alias = "Yellow", alias = "YELLOW")]
    Yellow = 1,
    #[serde(alias = "Red", alias = "RED")]
    Red = 2,
    #[serde(alias = "Black", alias = "BLACK")]
    Black = 3,
    #[serde(alias = "White", alias = "WHITE")]
    White = 4,
}

impl Color {
    /// Position in the canonical sequence
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TILE
// ============================================================================

/// A single colored tile.
///
/// Tiles of one color are interchangeable: equality and hashing look at the
/// color only. `selected` is a UI flag carried through the wire format.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub color: Color,
    #[serde(default)]
    pub selected: bool,
}

impl Tile {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            selected: false,
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
    }
}

/// Colors present in `tiles`, in order of first appearance
pub fn distinct_colors(tiles: &[Tile]) -> Vec<Color> {
    let mut seen = [false; COLOR_COUNT];
    let mut colors = Vec::with_capacity(COLOR_COUNT);
    for tile in tiles {
        if !seen[tile.color.index()] {
            seen[tile.color.index()] = true;
            colors.push(tile.color);
        }
    }
    colors
}

// ============================================================================
// FACTORY
// ============================================================================

/// A factory display: an id plus an unordered multiset of tiles
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    pub id: u32,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

impl Factory {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            tiles: Vec::with_capacity(FACTORY_CAPACITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn count(&self, color: Color) -> usize {
        self.tiles.iter().filter(|t| t.color == color).count()
    }
}

// ============================================================================
// SEAT
// ============================================================================

/// One of the two fixed player slots.
///
/// Doubles as the agent identifier keying search rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Seat {
    First = 0,
    Second = 1,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];

    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Seat {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Seat::First),
            1 => Ok(Seat::Second),
            other => Err(format!("player index must be 0 or 1, got {other}")),
        }
    }
}

impl From<Seat> for usize {
    fn from(seat: Seat) -> usize {
        seat.index()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_equality_ignores_selected() {
        let a = Tile::new(Color::Red);
        let b = Tile {
            color: Color::Red,
            selected: true,
        };
        assert_eq!(a, b);
        assert_ne!(a, Tile::new(Color::Blue));
    }

    #[test]
    fn test_color_accepts_both_cases() {
        let lower: Color = serde_json::from_str("\"black\"").unwrap();
        let upper: Color = serde_json::from_str("\"Black\"").unwrap();
        assert_eq!(lower, Color::Black);
        assert_eq!(upper, Color::Black);
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"white\"");
    }

    #[test]
    fn test_distinct_colors_keeps_first_appearance() {
        let tiles = [
            Tile::new(Color::Red),
            Tile::new(Color::Blue),
            Tile::new(Color::Red),
            Tile::new(Color::White),
        ];
        assert_eq!(
            distinct_colors(&tiles),
            vec![Color::Red, Color::Blue, Color::White]
        );
    }

    #[test]
    fn test_seat_round_trip_and_bounds() {
        assert_eq!(Seat::First.opponent(), Seat::Second);
        assert_eq!(Seat::Second.opponent(), Seat::First);
        assert!(Seat::try_from(2usize).is_err());
        let seat: Seat = serde_json::from_str("1").unwrap();
        assert_eq!(seat, Seat::Second);
    }
}
