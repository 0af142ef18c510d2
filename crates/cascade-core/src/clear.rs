//! Clear, collapse and refill.
//!
//! One application of a [`ClearSet`]:
//!
//! 1. Every tile in the set is removed and recorded.
//! 2. Every cell in the set loses one overlay unit, ice before jelly.
//! 3. Each column compacts downward. Blocked cells split a column into
//!    independent segments; tiles never pass a blocked cell.
//! 4. Vacated cells are refilled from the [`TileSource`].
//!
//! Afterwards every unblocked cell holds a tile again.

use cascade_grid::{Board, Color, Coord, LayerTally, Special, TileId, TileSource};
use serde::{Deserialize, Serialize};

use crate::config::TileAward;
use crate::trigger::ClearSet;

/// A tile removed by a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedTile {
    /// Cell the tile occupied when cleared.
    pub at: Coord,
    /// Identity of the removed tile.
    pub id: TileId,
    /// Its color.
    pub color: Color,
    /// Its special kind, if any.
    pub special: Option<Special>,
}

/// What one clear removed and what it scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearOutcome {
    /// Removed tiles, row-major.
    pub cleared: Vec<ClearedTile>,
    /// Overlay units removed per kind.
    pub layers: LayerTally,
    /// Tiles that fell during collapse.
    pub fallen: usize,
    /// Cells refilled with new tiles.
    pub refilled: usize,
    /// Score for this clear.
    pub score: u64,
}

/// Removes tiles and peels one overlay unit from every cell in `set`.
pub fn clear_cells(board: &mut Board, set: &ClearSet) -> ClearOutcome {
    let mut outcome = ClearOutcome::default();
    for at in set.iter() {
        if let Some(tile) = board.take_tile(at) {
            outcome.cleared.push(ClearedTile {
                at,
                id: tile.id(),
                color: tile.color(),
                special: tile.special(),
            });
        }
        if let Some(layer) = board.peel_layer(at) {
            outcome.layers.record(layer);
        }
    }
    outcome
}

/// Compacts every column toward the bottom. Returns the number of tiles moved.
pub fn collapse(board: &mut Board) -> usize {
    let mut moved = 0;
    for col in 0..board.cols() {
        // Lowest vacant row in the current segment.
        let mut write: Option<usize> = None;
        for row in (0..board.rows()).rev() {
            let at = Coord::new(row, col);
            if board.is_blocked(at) {
                write = None;
                continue;
            }
            if board.tile(at).is_none() {
                write.get_or_insert(row);
                continue;
            }
            let Some(target) = write else {
                continue;
            };
            if let Some(tile) = board.take_tile(at) {
                let displaced = board.put_tile(Coord::new(target, col), tile);
                debug_assert!(matches!(displaced, Ok(None)), "collapse target occupied");
                moved += 1;
            }
            write = Some(target - 1);
        }
    }
    moved
}

/// Clears `set`, collapses, refills and scores the result.
///
/// Score is `(tiles × per_tile + layers × per_layer) × multiplier`.
pub fn clear_and_collapse(
    board: &mut Board,
    set: &ClearSet,
    source: &mut dyn TileSource,
    award: TileAward,
    multiplier: u64,
) -> ClearOutcome {
    let mut outcome = clear_cells(board, set);
    outcome.fallen = collapse(board);
    outcome.refilled = board.fill_vacant(source).len();

    let tiles = outcome.cleared.len() as u64;
    let layers = u64::from(outcome.layers.total());
    outcome.score = (tiles * award.per_tile + layers * award.per_layer) * multiplier;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_grid::{Layer, ScriptedSource};

    fn board(rows: &[&str]) -> Board {
        Board::from_pattern(Color::all(), rows).unwrap()
    }

    fn award() -> TileAward {
        TileAward {
            per_tile: 10,
            per_layer: 25,
        }
    }

    #[test]
    fn clear_records_tiles_and_layers() {
        let mut b = board(&["RGB", "YPO"]);
        b.add_layer(Coord::new(0, 1), Layer::Ice).unwrap();
        b.add_layer(Coord::new(0, 1), Layer::Jelly).unwrap();
        let set: ClearSet = [Coord::new(0, 0), Coord::new(0, 1)].into_iter().collect();

        let out = clear_cells(&mut b, &set);
        assert_eq!(out.cleared.len(), 2);
        assert_eq!(out.cleared[0].color, Color::Red);
        assert_eq!(out.layers.ice, 1);
        assert_eq!(out.layers.jelly, 0);
        assert!(b.layers(Coord::new(0, 1)).has(Layer::Jelly));
        assert!(b.tile(Coord::new(0, 0)).is_none());
    }

    #[test]
    fn collapse_drops_tiles_to_bottom() {
        let mut b = board(&["R", "G", "B", "Y"]);
        b.take_tile(Coord::new(2, 0));
        b.take_tile(Coord::new(3, 0));

        assert_eq!(collapse(&mut b), 2);
        assert_eq!(b.to_pattern(), vec![".", ".", "R", "G"]);
    }

    #[test]
    fn blocked_cell_splits_column() {
        let mut b = board(&["R", "G", "#", "B", "Y"]);
        b.take_tile(Coord::new(1, 0));
        b.take_tile(Coord::new(4, 0));

        collapse(&mut b);
        // Red stays above the blocker; blue falls below it.
        assert_eq!(b.to_pattern(), vec![".", "R", "#", ".", "B"]);
    }

    #[test]
    fn tile_identity_survives_falling() {
        let mut b = board(&["R", "G"]);
        let id = b.tile(Coord::new(0, 0)).unwrap().id();
        b.take_tile(Coord::new(1, 0));
        collapse(&mut b);
        assert_eq!(b.tile(Coord::new(1, 0)).unwrap().id(), id);
    }

    #[test]
    fn clear_and_collapse_refills_and_scores() {
        let mut b = board(&["RGB", "YPO", "GBR"]);
        b.add_layer(Coord::new(2, 2), Layer::Jelly).unwrap();
        let set: ClearSet = [Coord::new(1, 1), Coord::new(2, 2)].into_iter().collect();
        let mut source = ScriptedSource::new(vec![3]);

        let out = clear_and_collapse(&mut b, &set, &mut source, award(), 2);
        assert!(b.is_full());
        assert_eq!(out.refilled, 2);
        assert_eq!(out.fallen, 3);
        assert_eq!(out.score, (2 * 10 + 25) * 2);
    }

    #[test]
    fn layer_peeled_even_without_tile() {
        let mut b = board(&["RG"]);
        b.add_layer(Coord::new(0, 0), Layer::Ice).unwrap();
        b.take_tile(Coord::new(0, 0));
        let set: ClearSet = std::iter::once(Coord::new(0, 0)).collect();

        let out = clear_cells(&mut b, &set);
        assert!(out.cleared.is_empty());
        assert_eq!(out.layers.ice, 1);
    }
}
