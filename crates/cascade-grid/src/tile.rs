//! Tile types: identity, color and special kind.
//!
//! - [`TileId`]: Opaque identity, unique within one board
//! - [`Color`]: Member of the fixed palette
//! - [`Special`]: Area-of-effect kind carried by special tiles
//! - [`Tile`]: The complete tile

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a tile.
///
/// Tile IDs are assigned monotonically by the board that spawns the tile and
/// are never reused within that board. A tile keeps its ID while it falls;
/// the ID dies with the tile when its cell is cleared.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(u64);

impl TileId {
    /// Creates a `TileId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileId({})", self.0)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tile color.
///
/// Serialized as the single-letter symbol used by level data (`"R"`, `"G"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    /// Red (`R`)
    #[serde(rename = "R")]
    Red = 0,
    /// Green (`G`)
    #[serde(rename = "G")]
    Green = 1,
    /// Blue (`B`)
    #[serde(rename = "B")]
    Blue = 2,
    /// Yellow (`Y`)
    #[serde(rename = "Y")]
    Yellow = 3,
    /// Purple (`P`)
    #[serde(rename = "P")]
    Purple = 4,
    /// Orange (`O`)
    #[serde(rename = "O")]
    Orange = 5,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 6;

    /// All colors in symbol order.
    #[must_use]
    pub const fn all() -> &'static [Color] {
        &[
            Color::Red,
            Color::Green,
            Color::Blue,
            Color::Yellow,
            Color::Purple,
            Color::Orange,
        ]
    }

    /// The five-color palette most levels use.
    #[must_use]
    pub const fn standard() -> &'static [Color] {
        &[
            Color::Red,
            Color::Green,
            Color::Blue,
            Color::Yellow,
            Color::Purple,
        ]
    }

    /// Index of this color in [`Color::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
            Self::Purple => 'P',
            Self::Orange => 'O',
        }
    }

    /// Parses a single-letter symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Color> {
        match symbol {
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'B' => Some(Self::Blue),
            'Y' => Some(Self::Yellow),
            'P' => Some(Self::Purple),
            'O' => Some(Self::Orange),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Special tile kind.
///
/// A special tile detonates when it is cleared, adding its area of effect to
/// the clear set. Kinds never stack: a tile carries at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Special {
    /// Clears its entire row.
    LineHorizontal,
    /// Clears its entire column.
    LineVertical,
    /// Clears the 3×3 block around it.
    Bomb,
    /// Clears every tile of one color.
    ColorBomb,
}

impl Special {
    /// Returns true for either line orientation.
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, Self::LineHorizontal | Self::LineVertical)
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineHorizontal => write!(f, "line-horizontal"),
            Self::LineVertical => write!(f, "line-vertical"),
            Self::Bomb => write!(f, "bomb"),
            Self::ColorBomb => write!(f, "color-bomb"),
        }
    }
}

/// A colored, swappable unit occupying one cell.
///
/// Tiles are exclusively owned by their cell. Swapping moves them between
/// cells, clearing destroys them; they are never aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    color: Color,
    special: Option<Special>,
}

impl Tile {
    /// Creates a tile. Boards assign IDs; use [`crate::Board::spawn_tile`]
    /// rather than calling this directly when placing tiles on a board.
    #[must_use]
    pub const fn new(id: TileId, color: Color, special: Option<Special>) -> Self {
        Self { id, color, special }
    }

    /// Returns the tile's identity.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Returns the tile's color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns the special kind, if any.
    #[must_use]
    pub const fn special(&self) -> Option<Special> {
        self.special
    }

    /// Returns true if the tile carries a special kind.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.special.is_some()
    }

    /// Marks this tile with a special kind, replacing any previous kind.
    pub fn set_special(&mut self, special: Special) {
        self.special = Some(special);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for color in Color::all() {
            assert_eq!(Color::from_symbol(color.symbol()), Some(*color));
        }
        assert_eq!(Color::from_symbol('x'), None);
    }

    #[test]
    fn color_serializes_as_symbol() {
        let json = serde_json::to_string(&Color::Yellow).unwrap();
        assert_eq!(json, "\"Y\"");
        let special = serde_json::to_string(&Special::ColorBomb).unwrap();
        assert_eq!(special, "\"color-bomb\"");
    }

    #[test]
    fn set_special_replaces_kind() {
        let mut tile = Tile::new(TileId::new(1), Color::Red, Some(Special::Bomb));
        tile.set_special(Special::LineVertical);
        assert_eq!(tile.special(), Some(Special::LineVertical));
        assert!(Special::LineVertical.is_line());
        assert!(!Special::Bomb.is_line());
    }
}
