//! Board container: a fixed grid of cells.
//!
//! The `Board` owns every [`Cell`], and every cell owns at most one [`Tile`].
//! It is plain data plus invariants; the resolution logic that mutates it
//! lives in `cascade-core`.
//!
//! # Invariants
//!
//! - Dimensions and blocked-ness never change for the life of a board.
//! - A blocked cell never holds a tile and never carries overlays.
//! - Outside of an in-progress engine operation, every non-blocked cell
//!   holds exactly one tile ([`Board::is_full`]).
//! - Tile IDs are unique within the board and never reused.
//!
//! # Example
//!
//! ```
//! use cascade_grid::{Board, Color, Coord, Layer};
//!
//! let mut board = Board::from_pattern(
//!     Color::standard(),
//!     &["RGB", "G#R", "BRG"],
//! ).unwrap();
//! board.add_layer(Coord::new(0, 0), Layer::Ice).unwrap();
//!
//! assert_eq!(board.color_at(Coord::new(0, 1)), Some(Color::Green));
//! assert!(board.is_blocked(Coord::new(1, 1)));
//! assert!(board.layers(Coord::new(0, 0)).has(Layer::Ice));
//! assert!(board.is_full());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::coord::{Coord, Orientation};
use crate::error::BoardError;
use crate::layer::{Layer, Layers};
use crate::palette::Palette;
use crate::source::TileSource;
use crate::tile::{Color, Special, Tile, TileId};

/// Symbol used for blocked cells in patterns.
pub const BLOCKED_SYMBOL: char = '#';

// =============================================================================
// Configuration
// =============================================================================

/// Grid dimensions and palette for a new board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Colors tiles are drawn from.
    pub palette: Vec<Color>,
}

impl BoardConfig {
    /// Creates a config.
    #[must_use]
    pub fn new(rows: usize, cols: usize, palette: Vec<Color>) -> Self {
        Self {
            rows,
            cols,
            palette,
        }
    }

    /// A config using the five-color standard palette.
    #[must_use]
    pub fn standard(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, Color::standard().to_vec())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::standard(8, 8)
    }
}

/// One overlay layer placed on one cell at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayPlacement {
    /// Target cell.
    pub at: Coord,
    /// Layer kind.
    pub layer: Layer,
}

impl OverlayPlacement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(at: Coord, layer: Layer) -> Self {
        Self { at, layer }
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single grid position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    tile: Option<Tile>,
    layers: Layers,
    blocked: bool,
}

impl Cell {
    /// The tile in this cell, if any.
    #[must_use]
    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    /// Overlay layers on this cell.
    #[must_use]
    pub fn layers(&self) -> Layers {
        self.layers
    }

    /// Returns true if the cell is permanently blocked.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Returns true if an unblocked cell is missing its tile.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        !self.blocked && self.tile.is_none()
    }
}

// =============================================================================
// Board
// =============================================================================

/// Fixed `rows × cols` grid of cells.
///
/// Deserialization runs the same checks as construction and fails with a
/// [`BoardError`] on malformed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    rows: usize,
    cols: usize,
    palette: Palette,
    cells: Vec<Cell>,
    next_tile_id: u64,
}

impl Board {
    fn empty(rows: usize, cols: usize, palette: Palette) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            palette,
            cells: vec![Cell::default(); rows * cols],
            next_tile_id: 0,
        })
    }

    /// Creates a board and fills it with random tiles.
    ///
    /// Blocked cells are marked first, overlays applied, then every remaining
    /// cell is filled row-major. Each fill avoids completing a run of three
    /// with already-placed neighbors, so a palette of three or more colors
    /// yields a board with no matches.
    ///
    /// # Errors
    ///
    /// Fails on zero dimensions, an invalid palette, coordinates outside the
    /// grid, or an overlay on a blocked cell.
    pub fn generate(
        config: &BoardConfig,
        overlays: &[OverlayPlacement],
        blocked: &[Coord],
        source: &mut dyn TileSource,
    ) -> Result<Self, BoardError> {
        let palette = Palette::new(config.palette.clone())?;
        let mut board = Self::empty(config.rows, config.cols, palette)?;

        for &at in blocked {
            board.check_bounds(at)?;
            let idx = board.index(at);
            board.cells[idx].blocked = true;
        }
        for placement in overlays {
            board.add_layer(placement.at, placement.layer)?;
        }

        board.fill_vacant(source);

        tracing::debug!(
            rows = board.rows,
            cols = board.cols,
            palette = board.palette.len(),
            overlays = overlays.len(),
            blocked = blocked.len(),
            "generated board"
        );
        Ok(board)
    }

    /// Creates a fully specified board from text rows.
    ///
    /// Each character is a color symbol (`R G B Y P O`) or `#` for a blocked
    /// cell. Whitespace is ignored. Every color used must be in `palette`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid palette, an empty or ragged pattern, unknown
    /// symbols, or colors missing from the palette.
    pub fn from_pattern<S: AsRef<str>>(palette: &[Color], rows: &[S]) -> Result<Self, BoardError> {
        let palette = Palette::new(palette.to_vec())?;
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let cols = parsed.first().map_or(0, Vec::len);
        let mut board = Self::empty(parsed.len(), cols, palette)?;

        for (row, symbols) in parsed.iter().enumerate() {
            if symbols.len() != cols {
                return Err(BoardError::RaggedPattern {
                    row,
                    expected: cols,
                    found: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let at = Coord::new(row, col);
                if symbol == BLOCKED_SYMBOL {
                    let idx = board.index(at);
                    board.cells[idx].blocked = true;
                    continue;
                }
                let color = Color::from_symbol(symbol)
                    .ok_or(BoardError::UnknownSymbol { symbol, row, col })?;
                if !board.palette.contains(color) {
                    return Err(BoardError::ColorNotInPalette { color, row, col });
                }
                let tile = board.spawn_tile(color, None);
                let idx = board.index(at);
                board.cells[idx].tile = Some(tile);
            }
        }
        Ok(board)
    }

    /// Adds an overlay layer to a cell.
    ///
    /// # Errors
    ///
    /// Fails if `at` is outside the grid or blocked.
    pub fn add_layer(&mut self, at: Coord, layer: Layer) -> Result<(), BoardError> {
        self.check_bounds(at)?;
        let idx = self.index(at);
        if self.cells[idx].blocked {
            return Err(BoardError::OverlayOnBlockedCell {
                row: at.row,
                col: at.col,
            });
        }
        self.cells[idx].layers.insert(layer.flag());
        Ok(())
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The board's palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns true if `at` lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| Coord::new(i / cols, i % cols))
    }

    /// Coordinates of one line: a row (`Horizontal`) or a column (`Vertical`).
    pub fn line(&self, orientation: Orientation, index: usize) -> impl Iterator<Item = Coord> {
        let len = match orientation {
            Orientation::Horizontal => self.cols,
            Orientation::Vertical => self.rows,
        };
        (0..len).map(move |i| match orientation {
            Orientation::Horizontal => Coord::new(index, i),
            Orientation::Vertical => Coord::new(i, index),
        })
    }

    /// Steps from `at` by `(d_row, d_col)`, staying inside the grid.
    #[must_use]
    pub fn neighbor(&self, at: Coord, d_row: isize, d_col: isize) -> Option<Coord> {
        at.offset(d_row, d_col).filter(|c| self.in_bounds(*c))
    }

    fn index(&self, at: Coord) -> usize {
        at.row * self.cols + at.col
    }

    fn check_bounds(&self, at: Coord) -> Result<(), BoardError> {
        if self.in_bounds(at) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                row: at.row,
                col: at.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    // ========================================================================
    // Cell access
    // ========================================================================

    /// The cell at `at`, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.in_bounds(at).then(|| &self.cells[self.index(at)])
    }

    /// Returns true if `at` is in bounds and blocked.
    #[must_use]
    pub fn is_blocked(&self, at: Coord) -> bool {
        self.cell(at).is_some_and(Cell::is_blocked)
    }

    /// The tile at `at`, if any.
    #[must_use]
    pub fn tile(&self, at: Coord) -> Option<&Tile> {
        self.cell(at).and_then(Cell::tile)
    }

    /// Mutable access to the tile at `at`.
    pub fn tile_mut(&mut self, at: Coord) -> Option<&mut Tile> {
        if !self.in_bounds(at) {
            return None;
        }
        let idx = self.index(at);
        self.cells[idx].tile.as_mut()
    }

    /// Color of the tile at `at`, if any.
    #[must_use]
    pub fn color_at(&self, at: Coord) -> Option<Color> {
        self.tile(at).map(Tile::color)
    }

    /// Special kind of the tile at `at`, if any.
    #[must_use]
    pub fn special_at(&self, at: Coord) -> Option<Special> {
        self.tile(at).and_then(Tile::special)
    }

    /// Overlay layers at `at` (empty when out of bounds).
    #[must_use]
    pub fn layers(&self, at: Coord) -> Layers {
        self.cell(at).map_or(Layers::empty(), Cell::layers)
    }

    /// Removes one overlay unit from `at`, returning the kind removed.
    pub fn peel_layer(&mut self, at: Coord) -> Option<Layer> {
        if !self.in_bounds(at) {
            return None;
        }
        let idx = self.index(at);
        self.cells[idx].layers.peel()
    }

    /// Removes and returns the tile at `at`, leaving the cell vacant.
    pub fn take_tile(&mut self, at: Coord) -> Option<Tile> {
        if !self.in_bounds(at) {
            return None;
        }
        let idx = self.index(at);
        self.cells[idx].tile.take()
    }

    /// Places `tile` at `at`.
    ///
    /// Returns the tile previously in the cell. The tile is handed back as
    /// `Err` if `at` is out of bounds or blocked.
    ///
    /// # Errors
    ///
    /// Returns `Err(tile)` when the cell cannot hold a tile.
    pub fn put_tile(&mut self, at: Coord, tile: Tile) -> Result<Option<Tile>, Tile> {
        if !self.in_bounds(at) || self.is_blocked(at) {
            return Err(tile);
        }
        let idx = self.index(at);
        Ok(self.cells[idx].tile.replace(tile))
    }

    /// Exchanges the tiles of two in-bounds cells. Out-of-bounds input is ignored.
    pub fn swap_tiles(&mut self, a: Coord, b: Coord) {
        if a == b || !self.in_bounds(a) || !self.in_bounds(b) {
            return;
        }
        let (ia, ib) = (self.index(a), self.index(b));
        let tile_a = self.cells[ia].tile.take();
        let tile_b = std::mem::replace(&mut self.cells[ib].tile, tile_a);
        self.cells[ia].tile = tile_b;
    }

    /// Creates a tile with a fresh ID. The tile is not placed.
    pub fn spawn_tile(&mut self, color: Color, special: Option<Special>) -> Tile {
        let id = TileId::new(self.next_tile_id);
        self.next_tile_id += 1;
        Tile::new(id, color, special)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns true if every non-blocked cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_vacant())
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.tile.is_some()).count()
    }

    /// Coordinates of every tile with `color`, row-major.
    #[must_use]
    pub fn coords_of_color(&self, color: Color) -> Vec<Coord> {
        self.coords()
            .filter(|&at| self.color_at(at) == Some(color))
            .collect()
    }

    /// Colors that would complete a run of three through `at`, given the
    /// tiles currently on the board.
    ///
    /// Checks both orientations for a same-colored pair on either side of
    /// `at` and for a pair straddling it.
    #[must_use]
    pub fn forbidden_colors(&self, at: Coord) -> Vec<Color> {
        let mut forbidden = Vec::new();
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let (dr, dc) = orientation.step();
            let color = |k: isize| {
                self.neighbor(at, dr * k, dc * k)
                    .and_then(|c| self.color_at(c))
            };
            let pairs = [(color(-2), color(-1)), (color(-1), color(1)), (color(1), color(2))];
            for (x, y) in pairs {
                if let (Some(x), Some(y)) = (x, y) {
                    if x == y && !forbidden.contains(&x) {
                        forbidden.push(x);
                    }
                }
            }
        }
        forbidden
    }

    /// Fills every vacant cell with a new tile, bottom row first.
    ///
    /// Each new color avoids completing a run with tiles already present,
    /// including tiles placed earlier in the same call. Returns the filled
    /// coordinates in fill order.
    pub fn fill_vacant(&mut self, source: &mut dyn TileSource) -> Vec<Coord> {
        let mut filled = Vec::new();
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let at = Coord::new(row, col);
                let idx = self.index(at);
                if !self.cells[idx].is_vacant() {
                    continue;
                }
                let forbidden = self.forbidden_colors(at);
                let color = self.palette.pick(&forbidden, source);
                let tile = self.spawn_tile(color, None);
                self.cells[idx].tile = Some(tile);
                filled.push(at);
            }
        }
        filled
    }

    /// Deterministic hash of the full board state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        crate::hash::hash_board(self)
    }

    /// Iterates `(coord, cell)` pairs row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.coords().zip(self.cells.iter())
    }

    pub(crate) fn next_tile_id(&self) -> u64 {
        self.next_tile_id
    }

    /// Renders the board as pattern rows (`#` blocked, `.` vacant).
    #[must_use]
    pub fn to_pattern(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                self.line(Orientation::Horizontal, row)
                    .map(|at| {
                        let cell = &self.cells[self.index(at)];
                        match (cell.blocked, &cell.tile) {
                            (true, _) => BLOCKED_SYMBOL,
                            (false, Some(tile)) => tile.color().symbol(),
                            (false, None) => '.',
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct BoardRepr {
    rows: usize,
    cols: usize,
    palette: Palette,
    cells: Vec<Cell>,
    next_tile_id: u64,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let BoardRepr {
            rows,
            cols,
            palette,
            cells,
            next_tile_id,
        } = repr;

        let expected = rows
            .checked_mul(cols)
            .filter(|&n| n > 0)
            .ok_or(BoardError::InvalidDimensions { rows, cols })?;
        if cells.len() != expected {
            return Err(BoardError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for (i, cell) in cells.iter().enumerate() {
            let (row, col) = (i / cols, i % cols);
            if cell.blocked {
                if cell.tile.is_some() {
                    return Err(BoardError::TileOnBlockedCell { row, col });
                }
                if !cell.layers.is_empty() {
                    return Err(BoardError::OverlayOnBlockedCell { row, col });
                }
                continue;
            }
            let Some(tile) = &cell.tile else {
                continue;
            };
            if !palette.contains(tile.color()) {
                return Err(BoardError::ColorNotInPalette {
                    color: tile.color(),
                    row,
                    col,
                });
            }
            if !seen.insert(tile.id()) {
                return Err(BoardError::DuplicateTileId {
                    id: tile.id(),
                    row,
                    col,
                });
            }
        }
        if let Some(&id) = seen.last() {
            if id.as_u64() >= next_tile_id {
                return Err(BoardError::StaleTileCounter {
                    next: next_tile_id,
                    id,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            palette,
            cells,
            next_tile_id,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_pattern() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ScriptedSource, SeededSource};

    fn has_run_of_three(board: &Board) -> bool {
        board.coords().any(|at| {
            [Orientation::Horizontal, Orientation::Vertical]
                .into_iter()
                .any(|o| {
                    let (dr, dc) = o.step();
                    let Some(color) = board.color_at(at) else {
                        return false;
                    };
                    (1..3).all(|k| {
                        board
                            .neighbor(at, dr * k, dc * k)
                            .and_then(|c| board.color_at(c))
                            == Some(color)
                    })
                })
        })
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn generate_fills_every_open_cell() {
            let mut source = SeededSource::new(42);
            let blocked = [Coord::new(0, 0), Coord::new(7, 7)];
            let board =
                Board::generate(&BoardConfig::standard(8, 8), &[], &blocked, &mut source).unwrap();

            assert!(board.is_full());
            assert_eq!(board.tile_count(), 62);
            assert!(board.tile(Coord::new(0, 0)).is_none());
            assert!(board.is_blocked(Coord::new(7, 7)));
        }

        #[test]
        fn generate_avoids_initial_matches() {
            for seed in 0..50 {
                let mut source = SeededSource::new(seed);
                let board =
                    Board::generate(&BoardConfig::standard(9, 7), &[], &[], &mut source).unwrap();
                assert!(!has_run_of_three(&board), "seed {seed} produced a match:\n{board}");
            }
        }

        #[test]
        fn generate_applies_overlays() {
            let mut source = SeededSource::new(1);
            let overlays = [
                OverlayPlacement::new(Coord::new(2, 2), Layer::Ice),
                OverlayPlacement::new(Coord::new(2, 2), Layer::Jelly),
                OverlayPlacement::new(Coord::new(5, 1), Layer::Jelly),
            ];
            let board =
                Board::generate(&BoardConfig::default(), &overlays, &[], &mut source).unwrap();
            assert_eq!(board.layers(Coord::new(2, 2)), Layers::ICE | Layers::JELLY);
            assert_eq!(board.layers(Coord::new(5, 1)), Layers::JELLY);
            assert!(board.layers(Coord::new(0, 0)).is_empty());
        }

        #[test]
        fn generate_rejects_bad_level_data() {
            let mut source = SeededSource::new(1);
            let err = Board::generate(&BoardConfig::standard(0, 8), &[], &[], &mut source);
            assert_eq!(err, Err(BoardError::InvalidDimensions { rows: 0, cols: 8 }));

            let err = Board::generate(&BoardConfig::new(8, 8, vec![]), &[], &[], &mut source);
            assert_eq!(err, Err(BoardError::EmptyPalette));

            let err = Board::generate(
                &BoardConfig::default(),
                &[],
                &[Coord::new(8, 0)],
                &mut source,
            );
            assert!(matches!(err, Err(BoardError::OutOfBounds { row: 8, .. })));

            let err = Board::generate(
                &BoardConfig::default(),
                &[OverlayPlacement::new(Coord::new(1, 1), Layer::Ice)],
                &[Coord::new(1, 1)],
                &mut source,
            );
            assert_eq!(err, Err(BoardError::OverlayOnBlockedCell { row: 1, col: 1 }));
        }

        #[test]
        fn pattern_round_trips() {
            let rows = ["RGB#", "YPRG", "#BYP"];
            let board = Board::from_pattern(Color::standard(), &rows).unwrap();
            assert_eq!(board.rows(), 3);
            assert_eq!(board.cols(), 4);
            assert_eq!(board.to_pattern(), rows);
            assert_eq!(board.to_string(), "RGB#\nYPRG\n#BYP\n");
        }

        #[test]
        fn pattern_errors() {
            assert_eq!(
                Board::from_pattern(Color::standard(), &["RG", "R"]),
                Err(BoardError::RaggedPattern {
                    row: 1,
                    expected: 2,
                    found: 1
                })
            );
            assert_eq!(
                Board::from_pattern(Color::standard(), &["Rx"]),
                Err(BoardError::UnknownSymbol {
                    symbol: 'x',
                    row: 0,
                    col: 1
                })
            );
            assert_eq!(
                Board::from_pattern(Color::standard(), &["RO"]),
                Err(BoardError::ColorNotInPalette {
                    color: Color::Orange,
                    row: 0,
                    col: 1
                })
            );
            let empty: [&str; 0] = [];
            assert_eq!(
                Board::from_pattern(Color::standard(), &empty),
                Err(BoardError::InvalidDimensions { rows: 0, cols: 0 })
            );
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn tile_ids_are_unique_and_monotonic() {
            let board = Board::from_pattern(Color::standard(), &["RGB", "BRG"]).unwrap();
            let ids: Vec<u64> = board
                .coords()
                .filter_map(|at| board.tile(at).map(|t| t.id().as_u64()))
                .collect();
            assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
            assert_eq!(board.next_tile_id(), 6);
        }

        #[test]
        fn swap_exchanges_tiles() {
            let mut board = Board::from_pattern(Color::standard(), &["RG"]).unwrap();
            let a = Coord::new(0, 0);
            let b = Coord::new(0, 1);
            let id_a = board.tile(a).unwrap().id();
            board.swap_tiles(a, b);
            assert_eq!(board.color_at(a), Some(Color::Green));
            assert_eq!(board.tile(b).unwrap().id(), id_a);
        }

        #[test]
        fn put_tile_rejects_blocked_cells() {
            let mut board = Board::from_pattern(Color::standard(), &["R#"]).unwrap();
            let tile = board.spawn_tile(Color::Blue, None);
            assert!(board.put_tile(Coord::new(0, 1), tile.clone()).is_err());
            assert!(board.put_tile(Coord::new(3, 3), tile.clone()).is_err());

            let old = board.take_tile(Coord::new(0, 0)).unwrap();
            assert_eq!(old.color(), Color::Red);
            assert_eq!(board.put_tile(Coord::new(0, 0), tile), Ok(None));
        }

        #[test]
        fn fill_vacant_respects_forbidden_colors() {
            let mut board =
                Board::from_pattern(Color::standard(), &["RRG", "BYP", "GBY"]).unwrap();
            board.take_tile(Coord::new(0, 2));
            // Index 0 is red, which would complete RRR.
            let mut source = ScriptedSource::new(vec![0, 0, 0, 0, 0, 0, 0, 0, 1]);
            let filled = board.fill_vacant(&mut source);
            assert_eq!(filled, vec![Coord::new(0, 2)]);
            assert_ne!(board.color_at(Coord::new(0, 2)), Some(Color::Red));
            assert!(board.is_full());
        }

        #[test]
        fn forbidden_colors_cover_straddles() {
            let board = Board::from_pattern(Color::standard(), &["RGR", "YBG", "YPB"]).unwrap();
            // (0,1) sits between two reds.
            assert_eq!(board.forbidden_colors(Coord::new(0, 1)), vec![Color::Red]);
            // (0,0) sits above two yellows.
            assert_eq!(board.forbidden_colors(Coord::new(0, 0)), vec![Color::Yellow]);
        }

        #[test]
        fn peel_layer_removes_one_unit() {
            let mut board = Board::from_pattern(Color::standard(), &["RG"]).unwrap();
            board.add_layer(Coord::new(0, 0), Layer::Ice).unwrap();
            board.add_layer(Coord::new(0, 0), Layer::Jelly).unwrap();
            assert_eq!(board.peel_layer(Coord::new(0, 0)), Some(Layer::Ice));
            assert_eq!(board.layers(Coord::new(0, 0)), Layers::JELLY);
            assert_eq!(board.peel_layer(Coord::new(0, 1)), None);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_boards_are_full_and_quiet(
                seed in any::<u64>(),
                rows in 1usize..12,
                cols in 1usize..12,
                palette_len in 3usize..=6,
            ) {
                let config = BoardConfig::new(rows, cols, Color::all()[..palette_len].to_vec());
                let mut source = SeededSource::new(seed);
                let board = Board::generate(&config, &[], &[], &mut source).unwrap();

                prop_assert!(board.is_full());
                prop_assert_eq!(board.tile_count(), rows * cols);
                prop_assert!(!has_run_of_three(&board));
            }

            #[test]
            fn refill_after_random_holes_stays_quiet(
                seed in any::<u64>(),
                holes in proptest::collection::vec((0usize..8, 0usize..8), 0..20),
            ) {
                let mut source = SeededSource::new(seed);
                let mut board =
                    Board::generate(&BoardConfig::default(), &[], &[], &mut source).unwrap();
                for (row, col) in holes {
                    board.take_tile(Coord::new(row, col));
                }
                board.fill_vacant(&mut source);

                prop_assert!(board.is_full());
                prop_assert!(!has_run_of_three(&board));
            }
        }
    }

    mod serde_tests {
        use super::*;
        use serde_json::{json, Value};

        fn to_value(board: &Board) -> Value {
            serde_json::to_value(board).unwrap()
        }

        fn load_err(value: Value) -> String {
            serde_json::from_value::<Board>(value).unwrap_err().to_string()
        }

        #[test]
        fn vacant_cells_survive_a_round_trip() {
            let mut board = Board::from_pattern(Color::standard(), &["RG#", "BYP"]).unwrap();
            board.add_layer(Coord::new(1, 1), Layer::Jelly).unwrap();
            board.take_tile(Coord::new(0, 1));
            let back: Board = serde_json::from_value(to_value(&board)).unwrap();
            assert_eq!(back, board);
            assert_eq!(back.next_tile_id(), 5);
        }

        #[test]
        fn rejects_missing_cells() {
            let err = load_err(json!({
                "rows": 2,
                "cols": 2,
                "palette": ["R", "G", "B"],
                "cells": [],
                "next_tile_id": 0
            }));
            assert!(err.contains("Board has 0 cells, expected 4"), "{err}");
        }

        #[test]
        fn rejects_zero_dimensions() {
            let err = load_err(json!({
                "rows": 0,
                "cols": 3,
                "palette": ["R", "G", "B"],
                "cells": [],
                "next_tile_id": 0
            }));
            assert!(err.contains("dimensions must be positive, got 0x3"), "{err}");
        }

        #[test]
        fn rejects_tile_on_blocked_cell() {
            let board = Board::from_pattern(Color::standard(), &["R#", "GB"]).unwrap();
            let mut value = to_value(&board);
            value["cells"][1]["tile"] = json!({"id": 9, "color": "R", "special": null});
            value["next_tile_id"] = json!(10);
            let err = load_err(value);
            assert!(err.contains("Cell (0, 1) is blocked and cannot hold a tile"), "{err}");
        }

        #[test]
        fn rejects_overlay_on_blocked_cell() {
            let mut board = Board::from_pattern(Color::standard(), &["RG"]).unwrap();
            board.add_layer(Coord::new(0, 0), Layer::Ice).unwrap();
            let mut value = to_value(&board);
            value["cells"][0]["tile"] = Value::Null;
            value["cells"][0]["blocked"] = json!(true);
            let err = load_err(value);
            assert!(err.contains("Cell (0, 0) is blocked and cannot carry an overlay"), "{err}");
        }

        #[test]
        fn rejects_duplicate_tile_ids() {
            let board = Board::from_pattern(Color::standard(), &["RG"]).unwrap();
            let mut value = to_value(&board);
            value["cells"][1]["tile"] = value["cells"][0]["tile"].clone();
            let err = load_err(value);
            assert!(err.contains("Tile id 0 at (0, 1) is already on the board"), "{err}");
        }

        #[test]
        fn rejects_colors_outside_palette() {
            let board = Board::from_pattern(Color::standard(), &["RG"]).unwrap();
            let mut value = to_value(&board);
            value["cells"][0]["tile"]["color"] = json!("O");
            let err = load_err(value);
            assert!(err.contains("Color O at (0, 0) is not in the palette"), "{err}");
        }

        #[test]
        fn rejects_stale_tile_counter() {
            let board = Board::from_pattern(Color::standard(), &["RG"]).unwrap();
            let mut value = to_value(&board);
            value["next_tile_id"] = json!(1);
            let err = load_err(value);
            assert!(err.contains("Next tile id 1 does not exceed existing id 1"), "{err}");
        }
    }

    #[test]
    fn board_serde_round_trip() {
        let mut source = SeededSource::new(3);
        let board = Board::generate(&BoardConfig::standard(4, 5), &[], &[], &mut source).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
        assert_eq!(board.state_hash(), back.state_hash());
    }
}
