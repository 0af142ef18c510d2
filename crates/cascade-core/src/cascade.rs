//! The cascade loop.
//!
//! Runs detect → plan specials → expand → clear-and-collapse until the board
//! settles or the step bound in [`EngineConfig`] is reached. Each step's
//! score is scaled by its 1-based depth, so chains pay more the longer they
//! run.

use std::collections::BTreeSet;

use cascade_grid::{Board, Coord, LayerTally, TileSource};
use serde::{Deserialize, Serialize};

use crate::clear::{clear_and_collapse, ClearedTile};
use crate::config::EngineConfig;
use crate::matcher::{find_matches, MatchGroup};
use crate::special::{plan_specials, SpecialSpawn};
use crate::trigger::{expand, ComboKind, Detonation};

/// One resolution step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// 1-based step depth, also the score multiplier.
    pub depth: u32,
    /// Combo resolved in this step. Combo steps carry no match groups.
    pub combo: Option<ComboKind>,
    /// Match groups detected.
    pub groups: Vec<MatchGroup>,
    /// Tiles removed.
    pub cleared: Vec<ClearedTile>,
    /// Overlay units removed.
    pub layers: LayerTally,
    /// Specials created and left on the board.
    pub specials_created: Vec<SpecialSpawn>,
    /// Specials that went off.
    pub detonations: Vec<Detonation>,
    /// Score for this step, multiplier applied.
    pub score: u64,
}

/// Result of running the cascade loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Steps resolved, in order.
    pub steps: Vec<StepReport>,
    /// True if the loop stopped at the step bound with matches remaining.
    pub capped: bool,
}

/// Resolves matches until none remain.
///
/// `anchors` steer special placement on the first step only. `first_depth`
/// is the depth assigned to the first step; the loop stops before any step
/// deeper than `config.max_cascade_steps`.
pub fn run_cascade(
    board: &mut Board,
    anchors: &[Coord],
    first_depth: u32,
    source: &mut dyn TileSource,
    config: &EngineConfig,
) -> CascadeOutcome {
    let scoring = &config.scoring;
    let mut outcome = CascadeOutcome::default();
    let mut anchors = anchors;
    let mut depth = first_depth.max(1);

    loop {
        let groups = find_matches(board);
        if groups.is_empty() {
            break;
        }
        if depth > config.max_cascade_steps {
            tracing::warn!(
                depth,
                max = config.max_cascade_steps,
                groups = groups.len(),
                "cascade bound reached with matches remaining"
            );
            outcome.capped = true;
            break;
        }

        let spawns = plan_specials(board, &groups, anchors);
        anchors = &[];

        let mut protected = BTreeSet::new();
        for spawn in &spawns {
            if let Some(tile) = board.tile_mut(spawn.at) {
                tile.set_special(spawn.kind);
            }
            protected.insert(spawn.at);
        }

        let seeds = groups.iter().flat_map(|g| g.cells().iter().copied());
        let expansion = expand(board, seeds, &protected, &BTreeSet::new());

        let multiplier = u64::from(depth);
        let clear = clear_and_collapse(
            board,
            &expansion.cells,
            source,
            scoring.tile_award(),
            multiplier,
        );
        let bonus: u64 = expansion
            .detonations
            .iter()
            .map(|d| scoring.detonation_bonus(d.kind))
            .sum();

        let step = StepReport {
            depth,
            combo: None,
            groups,
            cleared: clear.cleared,
            layers: clear.layers,
            specials_created: spawns,
            detonations: expansion.detonations,
            score: clear.score + bonus * multiplier,
        };
        tracing::trace!(
            depth,
            groups = step.groups.len(),
            cleared = step.cleared.len(),
            specials = step.specials_created.len(),
            detonations = step.detonations.len(),
            score = step.score,
            "cascade step"
        );
        outcome.steps.push(step);
        depth += 1;
    }
    outcome
}
