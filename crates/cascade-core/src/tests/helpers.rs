//! Test helper functions for building boards and playing swaps.

use cascade_grid::{Board, BoardConfig, Color, Coord, Layer, SeededSource, Special};

use crate::config::EngineConfig;
use crate::swap::{swap, SwapOutcome};

// =============================================================================
// Fixtures
// =============================================================================

/// An 8×8 board over the standard palette with no matches.
///
/// Cell `(r, c)` holds palette color `(2r + c) mod 5`. Horizontal neighbors
/// differ by one step and vertical neighbors by two, so no two adjacent
/// cells share a color:
///
/// ```text
/// RGBYPRGB
/// BYPRGBYP
/// PRGBYPRG
/// GBYPRGBY
/// YPRGBYPR
/// RGBYPRGB
/// BYPRGBYP
/// PRGBYPRG
/// ```
pub fn base_board() -> Board {
    let palette = Color::standard();
    let rows: Vec<String> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| palette[(2 * r + c) % palette.len()].symbol())
                .collect()
        })
        .collect();
    Board::from_pattern(palette, &rows).unwrap()
}

/// A generated board from `seed`.
pub fn seeded_board(seed: u64, rows: usize, cols: usize) -> Board {
    let mut source = SeededSource::new(seed);
    Board::generate(&BoardConfig::standard(rows, cols), &[], &[], &mut source).unwrap()
}

// =============================================================================
// Mutation helpers
// =============================================================================

/// Replaces the tile at `at` with a fresh plain tile of `color`.
pub fn set_color(board: &mut Board, at: Coord, color: Color) {
    let tile = board.spawn_tile(color, None);
    board.put_tile(at, tile).unwrap();
}

/// Marks the tile at `at` as `kind`.
pub fn set_special(board: &mut Board, at: Coord, kind: Special) {
    board.tile_mut(at).unwrap().set_special(kind);
}

/// Adds one overlay unit.
pub fn add_layer(board: &mut Board, at: Coord, layer: Layer) {
    board.add_layer(at, layer).unwrap();
}

/// Plays one swap with the default config and a fixed seed.
pub fn play(board: &mut Board, a: Coord, b: Coord) -> SwapOutcome {
    let mut source = SeededSource::new(7);
    swap(board, a, b, &mut source, &EngineConfig::default())
}

/// Shorthand for `Coord::new`.
pub fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col)
}

/// Returns true if no two unblocked cells hold tiles with the same id.
pub fn ids_unique(board: &Board) -> bool {
    let mut ids: Vec<u64> = board
        .coords()
        .filter_map(|c| board.tile(c).map(|t| t.id().as_u64()))
        .collect();
    let len = ids.len();
    ids.sort_unstable();
    ids.dedup();
    ids.len() == len
}
