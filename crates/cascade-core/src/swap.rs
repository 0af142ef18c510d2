//! Swap orchestration: the engine's single entry point for a player move.
//!
//! A swap is validated, applied, and then resolved one of two ways:
//!
//! - **Combo**: both tiles are specials, or one is a color bomb. The combo
//!   is cleared once with its flat award, then the ordinary cascade loop
//!   settles whatever falls into place (starting at depth 2).
//! - **Match**: the cascade loop runs with the swapped cells as anchors. If
//!   its first step finds nothing, the swap is undone.
//!
//! Rejected swaps leave the board untouched, score nothing, and consume no
//! randomness. A step bound of zero rejects every swap as `NoMatch`, combos
//! included.

use cascade_grid::{Board, Coord, LayerTally, TileSource};
use serde::{Deserialize, Serialize};

use crate::cascade::{run_cascade, StepReport};
use crate::clear::{clear_and_collapse, ClearedTile};
use crate::config::{EngineConfig, TileAward};
use crate::special::SpecialSpawn;
use crate::trigger::{resolve_combo, ComboKind};

/// Why a swap did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwapRejection {
    /// An endpoint lies outside the board.
    OutOfBounds,
    /// The endpoints are not 4-directionally adjacent.
    NotAdjacent,
    /// An endpoint is a blocked cell.
    Blocked,
    /// The swap would create no match and no combo.
    NoMatch,
}

/// Aggregated result of one swap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// True if the swap was applied and the caller should consume a move.
    pub moved: bool,
    /// Reason for a no-op result.
    pub rejection: Option<SwapRejection>,
    /// Total score across all steps.
    pub score_delta: u64,
    /// Every tile removed, in step order.
    pub tiles_cleared: Vec<ClearedTile>,
    /// Overlay units removed per kind.
    pub layers_cleared: LayerTally,
    /// Number of resolution steps, the combo step included.
    pub cascades: u32,
    /// Combo triggered by the swap, if any.
    pub combo: Option<ComboKind>,
    /// Specials created across all steps.
    pub specials_created: Vec<SpecialSpawn>,
    /// Per-step breakdown.
    pub steps: Vec<StepReport>,
    /// True if resolution stopped at the step bound.
    pub capped: bool,
}

impl SwapOutcome {
    /// A no-op result.
    #[must_use]
    pub fn rejected(reason: SwapRejection) -> Self {
        Self {
            rejection: Some(reason),
            ..Self::default()
        }
    }

    fn from_steps(steps: Vec<StepReport>, capped: bool) -> Self {
        let mut outcome = Self {
            moved: true,
            capped,
            combo: steps.first().and_then(|s| s.combo),
            ..Self::default()
        };
        for step in &steps {
            outcome.score_delta += step.score;
            outcome.tiles_cleared.extend_from_slice(&step.cleared);
            outcome.layers_cleared.absorb(step.layers);
            outcome
                .specials_created
                .extend_from_slice(&step.specials_created);
        }
        outcome.cascades = u32::try_from(steps.len()).unwrap_or(u32::MAX);
        outcome.steps = steps;
        outcome
    }
}

/// Checks that `a` and `b` form a legal swap.
///
/// # Errors
///
/// Returns the rejection reason. Checks run in order: bounds, adjacency,
/// blocked endpoints.
pub fn validate_swap(board: &Board, a: Coord, b: Coord) -> Result<(), SwapRejection> {
    if !board.in_bounds(a) || !board.in_bounds(b) {
        return Err(SwapRejection::OutOfBounds);
    }
    if !a.is_adjacent(b) {
        return Err(SwapRejection::NotAdjacent);
    }
    if board.is_blocked(a) || board.is_blocked(b) {
        return Err(SwapRejection::Blocked);
    }
    Ok(())
}

/// Swaps the tiles at `a` and `b` and resolves the consequences.
///
/// # Example
///
/// ```
/// use cascade_core::{swap, EngineConfig};
/// use cascade_grid::{Board, Color, Coord, ScriptedSource};
///
/// let mut board = Board::from_pattern(
///     Color::standard(),
///     &["RRGR", "GBYB", "BYGY", "YGBP"],
/// ).unwrap();
/// let mut source = ScriptedSource::new(vec![0, 1, 2, 3, 4]);
///
/// let outcome = swap(
///     &mut board,
///     Coord::new(0, 2),
///     Coord::new(0, 3),
///     &mut source,
///     &EngineConfig::default(),
/// );
/// assert!(outcome.moved);
/// assert_eq!(outcome.steps[0].cleared.len(), 3);
/// assert!(board.is_full());
/// ```
pub fn swap(
    board: &mut Board,
    a: Coord,
    b: Coord,
    source: &mut dyn TileSource,
    config: &EngineConfig,
) -> SwapOutcome {
    if let Err(reason) = validate_swap(board, a, b) {
        tracing::debug!(%a, %b, ?reason, "swap rejected");
        return SwapOutcome::rejected(reason);
    }

    board.swap_tiles(a, b);

    let outcome = if let Some(combo) = resolve_combo(board, a, b) {
        if config.max_cascade_steps == 0 {
            board.swap_tiles(a, b);
            tracing::warn!(%a, %b, combo = ?combo.kind, "cascade bound is zero; combo not resolved");
            return SwapOutcome::rejected(SwapRejection::NoMatch);
        }
        let award = config.scoring.combo_award(combo.kind);
        let tile_award = TileAward {
            per_tile: award.per_cell,
            per_layer: config.scoring.per_layer,
        };
        let clear = clear_and_collapse(board, &combo.expansion.cells, source, tile_award, 1);
        let step = StepReport {
            depth: 1,
            combo: Some(combo.kind),
            cleared: clear.cleared,
            layers: clear.layers,
            detonations: combo.expansion.detonations,
            score: clear.score + award.bonus,
            ..StepReport::default()
        };

        let settle = run_cascade(board, &[], 2, source, config);
        let mut steps = Vec::with_capacity(settle.steps.len() + 1);
        steps.push(step);
        steps.extend(settle.steps);
        SwapOutcome::from_steps(steps, settle.capped)
    } else {
        let cascade = run_cascade(board, &[a, b], 1, source, config);
        if cascade.steps.is_empty() {
            board.swap_tiles(a, b);
            tracing::debug!(%a, %b, reason = ?SwapRejection::NoMatch, "swap rejected");
            return SwapOutcome::rejected(SwapRejection::NoMatch);
        }
        SwapOutcome::from_steps(cascade.steps, cascade.capped)
    };

    tracing::debug!(
        %a,
        %b,
        combo = ?outcome.combo,
        score = outcome.score_delta,
        tiles = outcome.tiles_cleared.len(),
        layers = outcome.layers_cleared.total(),
        cascades = outcome.cascades,
        "swap resolved"
    );
    outcome
}
