//! Special-tile triggers and combos.
//!
//! Two entry points compute what a resolution step clears:
//!
//! - [`expand`] grows a seed set transitively: every special tile caught in
//!   the set detonates once, adding its blast area, which may catch further
//!   specials.
//! - [`resolve_combo`] handles a swap of two specials (or a color bomb and
//!   an ordinary tile) with the larger combo rules, then expands the result.
//!
//! Blast areas are always clipped to the board and never include blocked
//! cells, so no out-of-range coordinate can reach a [`ClearSet`].

use std::collections::{BTreeSet, VecDeque};

use cascade_grid::{Board, Color, Coord, Orientation, Special};
use serde::{Deserialize, Serialize};

/// Radius of a single bomb blast (3×3).
pub const BOMB_RADIUS: usize = 1;

/// Radius of each blast in a bomb + bomb combo (5×5).
pub const DOUBLE_BOMB_RADIUS: usize = 2;

// =============================================================================
// ClearSet
// =============================================================================

/// Deduplicated set of coordinates cleared in one step, iterated row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSet(BTreeSet<Coord>);

impl ClearSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a coordinate. Returns false if it was already present.
    pub fn insert(&mut self, at: Coord) -> bool {
        self.0.insert(at)
    }

    /// Returns true if the set holds `at`.
    #[must_use]
    pub fn contains(&self, at: Coord) -> bool {
        self.0.contains(&at)
    }

    /// Removes a coordinate. Returns true if it was present.
    pub fn remove(&mut self, at: Coord) -> bool {
        self.0.remove(&at)
    }

    /// Number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates coordinates row-major.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().copied()
    }
}

impl Extend<Coord> for ClearSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Coord> for ClearSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Single triggers
// =============================================================================

/// One special tile going off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detonation {
    /// Cell of the detonating tile.
    pub at: Coord,
    /// Effect applied.
    pub kind: Special,
    /// Target color. Only meaningful for color bombs.
    pub color: Color,
}

/// Cells covered by a `kind` blast centered on `at`.
///
/// `target` is the color swept by a color bomb and is ignored by the other
/// kinds. The detonating cell is always included.
#[must_use]
pub fn blast_area(board: &Board, at: Coord, kind: Special, target: Color) -> Vec<Coord> {
    let mut cells: Vec<Coord> = match kind {
        Special::LineHorizontal => board.line(Orientation::Horizontal, at.row).collect(),
        Special::LineVertical => board.line(Orientation::Vertical, at.col).collect(),
        Special::Bomb => square(board, at, BOMB_RADIUS),
        Special::ColorBomb => {
            let mut cells = board.coords_of_color(target);
            if !cells.contains(&at) {
                cells.push(at);
            }
            cells
        }
    };
    cells.retain(|&c| board.in_bounds(c) && !board.is_blocked(c));
    cells
}

/// Unblocked cells of the `(2r+1)²` square centered on `at`, clipped to the board.
#[must_use]
pub fn square(board: &Board, at: Coord, radius: usize) -> Vec<Coord> {
    if !board.in_bounds(at) {
        return Vec::new();
    }
    let rows = at.row.saturating_sub(radius)..=(at.row + radius).min(board.rows() - 1);
    let cols = at.col.saturating_sub(radius)..=(at.col + radius).min(board.cols() - 1);
    rows.flat_map(|row| cols.clone().map(move |col| Coord::new(row, col)))
        .filter(|&c| !board.is_blocked(c))
        .collect()
}

/// A fully expanded clear set with the detonations that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// Every cell to clear.
    pub cells: ClearSet,
    /// Specials that went off during expansion, in trigger order.
    pub detonations: Vec<Detonation>,
}

/// Expands `seeds` through every special tile they reach.
///
/// Each special caught in the set detonates once using its own color as the
/// color-bomb target. Cells in `protected` are never added; cells in `spent`
/// are added but their specials do not detonate (they already resolved).
#[must_use]
pub fn expand(
    board: &Board,
    seeds: impl IntoIterator<Item = Coord>,
    protected: &BTreeSet<Coord>,
    spent: &BTreeSet<Coord>,
) -> Expansion {
    let mut expansion = Expansion::default();
    let mut queue: VecDeque<Coord> = seeds.into_iter().collect();

    while let Some(at) = queue.pop_front() {
        if protected.contains(&at) || !board.in_bounds(at) || board.is_blocked(at) {
            continue;
        }
        if !expansion.cells.insert(at) || spent.contains(&at) {
            continue;
        }
        let Some(tile) = board.tile(at) else {
            continue;
        };
        let Some(kind) = tile.special() else {
            continue;
        };
        let color = tile.color();
        expansion.detonations.push(Detonation { at, kind, color });
        queue.extend(blast_area(board, at, kind, color));
    }
    expansion
}

// =============================================================================
// Combos
// =============================================================================

/// Kind of combo triggered by swapping two tiles into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComboKind {
    /// Two line specials of any orientation.
    LineCross,
    /// Two bombs.
    DoubleBomb,
    /// Two color bombs: the whole board.
    DoubleColorBomb,
    /// Color bomb with another special of the given kind.
    ColorInfusion(Special),
    /// Color bomb with an ordinary tile.
    ColorSweep,
    /// Any other pair of specials.
    Mixed,
}

impl ComboKind {
    /// Classifies a pair of swapped tiles by their special kinds.
    ///
    /// Returns `None` when neither tile is a special, or when exactly one is
    /// and it is not a color bomb.
    #[must_use]
    pub fn classify(a: Option<Special>, b: Option<Special>) -> Option<Self> {
        use Special::{Bomb, ColorBomb};

        match (a, b) {
            (Some(ColorBomb), Some(ColorBomb)) => Some(Self::DoubleColorBomb),
            (Some(ColorBomb), Some(other)) | (Some(other), Some(ColorBomb)) => {
                Some(Self::ColorInfusion(other))
            }
            (Some(ColorBomb), None) | (None, Some(ColorBomb)) => Some(Self::ColorSweep),
            (Some(x), Some(y)) if x.is_line() && y.is_line() => Some(Self::LineCross),
            (Some(Bomb), Some(Bomb)) => Some(Self::DoubleBomb),
            (Some(_), Some(_)) => Some(Self::Mixed),
            _ => None,
        }
    }
}

/// A resolved combo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    /// Combo kind.
    pub kind: ComboKind,
    /// Cells cleared, including transitive detonations.
    pub expansion: Expansion,
}

/// Resolves the combo formed by the tiles now sitting at `a` and `b`.
///
/// Call after the swap has been applied. Returns `None` if the pair does
/// not form a combo. Both endpoints are always cleared; other specials the
/// combo reaches detonate normally.
#[must_use]
pub fn resolve_combo(board: &Board, a: Coord, b: Coord) -> Option<Combo> {
    let tile_a = board.tile(a)?;
    let tile_b = board.tile(b)?;
    let kind = ComboKind::classify(tile_a.special(), tile_b.special())?;

    let mut spent: BTreeSet<Coord> = [a, b].into_iter().collect();
    let mut detonations = Vec::new();
    let mut seeds: Vec<Coord> = vec![a, b];

    match kind {
        ComboKind::LineCross => {
            for row in [a.row, b.row] {
                seeds.extend(board.line(Orientation::Horizontal, row));
            }
            for col in [a.col, b.col] {
                seeds.extend(board.line(Orientation::Vertical, col));
            }
        }
        ComboKind::DoubleBomb => {
            seeds.extend(square(board, a, DOUBLE_BOMB_RADIUS));
            seeds.extend(square(board, b, DOUBLE_BOMB_RADIUS));
        }
        ComboKind::DoubleColorBomb => {
            seeds.extend(board.coords().filter(|&c| board.tile(c).is_some()));
        }
        ComboKind::ColorInfusion(infused) => {
            let partner = if tile_a.special() == Some(Special::ColorBomb) {
                tile_b
            } else {
                tile_a
            };
            let color = partner.color();
            for at in board.coords_of_color(color) {
                spent.insert(at);
                detonations.push(Detonation {
                    at,
                    kind: infused,
                    color,
                });
                seeds.extend(blast_area(board, at, infused, color));
            }
        }
        ComboKind::ColorSweep => {
            let partner = if tile_a.special() == Some(Special::ColorBomb) {
                tile_b
            } else {
                tile_a
            };
            seeds.extend(board.coords_of_color(partner.color()));
        }
        ComboKind::Mixed => {
            for (at, tile) in [(a, tile_a), (b, tile_b)] {
                if let Some(special) = tile.special() {
                    seeds.extend(blast_area(board, at, special, tile.color()));
                }
            }
        }
    }

    let mut expansion = expand(board, seeds, &BTreeSet::new(), &spent);
    detonations.append(&mut expansion.detonations);
    expansion.detonations = detonations;

    tracing::debug!(?kind, cells = expansion.cells.len(), "resolved combo");
    Some(Combo { kind, expansion })
}
