//! Valid-move search.
//!
//! A swap is valid when it would form a match through one of the swapped
//! cells or trigger a combo. Matches already on the board (left behind by a
//! capped cascade) do not make unrelated swaps valid. The scan works on a
//! scratch copy; the caller's board is never touched.

use cascade_grid::{Board, Coord};

use crate::matcher::{find_matches, MatchGroup};
use crate::swap::validate_swap;
use crate::trigger::ComboKind;

/// Every valid swap, as `(a, b)` pairs with `a` before `b` row-major.
#[must_use]
pub fn valid_swaps(board: &Board) -> Vec<(Coord, Coord)> {
    let mut scratch = board.clone();
    let existing = find_matches(board);
    candidate_pairs(board)
        .filter(|&(a, b)| swap_is_productive(&mut scratch, &existing, a, b))
        .collect()
}

/// The first valid swap in row-major order, if any.
#[must_use]
pub fn find_valid_swap(board: &Board) -> Option<(Coord, Coord)> {
    let mut scratch = board.clone();
    let existing = find_matches(board);
    candidate_pairs(board).find(|&(a, b)| swap_is_productive(&mut scratch, &existing, a, b))
}

/// Returns true if at least one swap would do something.
#[must_use]
pub fn has_valid_swap(board: &Board) -> bool {
    find_valid_swap(board).is_some()
}

fn candidate_pairs(board: &Board) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    board.coords().flat_map(move |a| {
        [(0, 1), (1, 0)]
            .into_iter()
            .filter_map(move |(dr, dc)| board.neighbor(a, dr, dc))
            .filter(move |&b| validate_swap(board, a, b).is_ok())
            .map(move |b| (a, b))
    })
}

/// `existing` holds the groups present before the swap; only a group through
/// `a` or `b` that is not among them counts.
fn swap_is_productive(scratch: &mut Board, existing: &[MatchGroup], a: Coord, b: Coord) -> bool {
    if ComboKind::classify(scratch.special_at(a), scratch.special_at(b)).is_some() {
        return true;
    }
    scratch.swap_tiles(a, b);
    let productive = find_matches(scratch)
        .iter()
        .any(|group| (group.contains(a) || group.contains(b)) && !existing.contains(group));
    scratch.swap_tiles(a, b);
    productive
}
