//! Construction errors for boards and palettes.

use thiserror::Error;

use crate::tile::{Color, TileId};

/// Error returned when level data cannot form a valid board.
///
/// These are configuration bugs in the caller, reported at construction time
/// or when a serialized board is loaded. Nothing at runtime produces a
/// `BoardError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Rows or columns is zero.
    #[error("Board dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// The palette lists no colors.
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    /// The palette lists the same color twice.
    #[error("Palette lists color {0} more than once")]
    DuplicateColor(Color),

    /// An overlay or blocked coordinate falls outside the grid.
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
        /// Board rows.
        rows: usize,
        /// Board columns.
        cols: usize,
    },

    /// An overlay was placed on a blocked cell.
    #[error("Cell ({row}, {col}) is blocked and cannot carry an overlay")]
    OverlayOnBlockedCell {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// A pattern row contains a character that is neither a color symbol nor `#`.
    #[error("Unknown symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol {
        /// The character found.
        symbol: char,
        /// Row of the character.
        row: usize,
        /// Column of the character.
        col: usize,
    },

    /// Pattern rows have different lengths.
    #[error("Pattern row {row} has {found} cells, expected {expected}")]
    RaggedPattern {
        /// Offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A pattern uses a color the palette does not contain.
    #[error("Color {color} at ({row}, {col}) is not in the palette")]
    ColorNotInPalette {
        /// The color found.
        color: Color,
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
    },

    /// Serialized cell data does not cover the grid.
    #[error("Board has {found} cells, expected {expected}")]
    CellCountMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Cells supplied.
        found: usize,
    },

    /// A blocked cell holds a tile.
    #[error("Cell ({row}, {col}) is blocked and cannot hold a tile")]
    TileOnBlockedCell {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// Two cells hold tiles with the same ID.
    #[error("Tile id {id} at ({row}, {col}) is already on the board")]
    DuplicateTileId {
        /// The repeated ID.
        id: TileId,
        /// Row of the second occurrence.
        row: usize,
        /// Column of the second occurrence.
        col: usize,
    },

    /// The ID counter would hand out an ID already on the board.
    #[error("Next tile id {next} does not exceed existing id {id}")]
    StaleTileCounter {
        /// Stored counter.
        next: u64,
        /// Highest ID present.
        id: TileId,
    },
}
