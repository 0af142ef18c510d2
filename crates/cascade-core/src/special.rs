//! Special-tile creation rules.
//!
//! Each match group awards at most one special tile:
//!
//! | Group | Special |
//! |---|---|
//! | longest straight run ≥ 5 | color bomb |
//! | horizontal and vertical runs crossing | bomb |
//! | single line of exactly 4 | line of the same orientation |
//! | single line of 3 | none |
//!
//! The special is placed on a just-swapped cell when the group covers one,
//! otherwise on the crossing cell (crosses) or the middle cell (lines).

use cascade_grid::{Board, Color, Coord, Orientation, Special};
use serde::{Deserialize, Serialize};

use crate::matcher::{MatchGroup, MatchShape};

/// Run length that awards a color bomb.
pub const COLOR_BOMB_SPAN: usize = 5;

/// Run length that awards a line special.
pub const LINE_SPECIAL_LEN: usize = 4;

/// A special tile created by a match group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSpawn {
    /// Cell whose tile became special.
    pub at: Coord,
    /// Kind awarded.
    pub kind: Special,
    /// Color of the tile (the group's color).
    pub color: Color,
}

/// The special a group awards, if any.
#[must_use]
pub fn special_for(group: &MatchGroup) -> Option<Special> {
    if group.span() >= COLOR_BOMB_SPAN {
        return Some(Special::ColorBomb);
    }
    match group.shape() {
        MatchShape::Cross => Some(Special::Bomb),
        MatchShape::Line(orientation) if group.len() == LINE_SPECIAL_LEN => Some(match orientation {
            Orientation::Horizontal => Special::LineHorizontal,
            Orientation::Vertical => Special::LineVertical,
        }),
        MatchShape::Line(_) => None,
    }
}

/// Decides where each group's special goes.
///
/// `anchors` are the swapped coordinates; pass an empty slice for cascade
/// steps. Cells already holding a special are skipped, as are cells already
/// chosen for an earlier group. Groups with no eligible cell award nothing.
#[must_use]
pub fn plan_specials(board: &Board, groups: &[MatchGroup], anchors: &[Coord]) -> Vec<SpecialSpawn> {
    let mut spawns: Vec<SpecialSpawn> = Vec::new();

    for group in groups {
        let Some(kind) = special_for(group) else {
            continue;
        };

        let preferred: Vec<Coord> = match group.shape() {
            MatchShape::Cross => group.intersections().to_vec(),
            MatchShape::Line(_) => vec![group.middle()],
        };
        let chosen = anchors
            .iter()
            .copied()
            .filter(|&at| group.contains(at))
            .chain(preferred)
            .chain(group.cells().iter().copied())
            .find(|&at| board.special_at(at).is_none() && !spawns.iter().any(|s| s.at == at));
        if let Some(at) = chosen {
            spawns.push(SpecialSpawn {
                at,
                kind,
                color: group.color(),
            });
        }
    }
    spawns
}
