//! Grid coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` position on the board.
///
/// Row 0 is the top edge; gravity pulls tiles toward the highest row index.
///
/// # Ordering
///
/// Coordinates order row-major (row first, then column). Clear sets and match
/// groups rely on this for deterministic iteration.
///
/// # Example
///
/// ```
/// use cascade_grid::Coord;
///
/// let a = Coord::new(2, 3);
/// assert!(a.is_adjacent(Coord::new(2, 4)));
/// assert!(!a.is_adjacent(Coord::new(3, 4)));
/// assert!(Coord::new(1, 7) < Coord::new(2, 0));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true when `other` is exactly one step away horizontally or vertically.
    #[must_use]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Offsets this coordinate, returning `None` if it would leave the
    /// non-negative quadrant. Upper bounds are checked by the board.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Coord::new(row, col))
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Direction of a straight run of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Along a row (left to right).
    Horizontal,
    /// Along a column (top to bottom).
    Vertical,
}

impl Orientation {
    /// Unit step `(d_row, d_col)` along this orientation.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
        }
    }
}
