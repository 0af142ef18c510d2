//! Engine configuration and score tables.

use cascade_grid::Special;
use serde::{Deserialize, Serialize};

use crate::trigger::ComboKind;

/// Default bound on cascade steps per swap.
pub const DEFAULT_MAX_CASCADE_STEPS: u32 = 15;

/// Per-cell amounts awarded by one clear-and-collapse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileAward {
    /// Awarded per tile removed.
    pub per_tile: u64,
    /// Awarded per overlay layer unit removed.
    pub per_layer: u64,
}

/// Flat award for a combo: a fixed bonus plus an amount per cleared tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboAward {
    /// Fixed bonus for triggering the combo.
    pub bonus: u64,
    /// Awarded per tile the combo clears.
    pub per_cell: u64,
}

impl ComboAward {
    /// Creates an award.
    #[must_use]
    pub const fn new(bonus: u64, per_cell: u64) -> Self {
        Self { bonus, per_cell }
    }
}

/// Bonus added when a special tile detonates inside an ordinary match step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetonationBonus {
    /// Either line orientation.
    pub line: u64,
    /// 3×3 bomb.
    pub bomb: u64,
    /// Color bomb.
    pub color_bomb: u64,
}

/// Combo awards, one per combo kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboScores {
    /// Two lines.
    pub line_cross: ComboAward,
    /// Two bombs.
    pub double_bomb: ComboAward,
    /// Two color bombs.
    pub double_color_bomb: ComboAward,
    /// Color bomb with another special.
    pub color_infusion: ComboAward,
    /// Color bomb with an ordinary tile.
    pub color_sweep: ComboAward,
    /// Any other pair of specials.
    pub mixed: ComboAward,
}

/// Scoring rules.
///
/// Ordinary match steps score `(tiles × per_tile + layers × per_layer +
/// detonation bonuses) × depth`, where depth is the 1-based cascade step.
/// Combo steps bypass per-tile scoring and use their [`ComboAward`] instead;
/// overlay layers still score `per_layer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Awarded per tile removed by a match step.
    pub per_tile: u64,
    /// Awarded per overlay layer unit removed.
    pub per_layer: u64,
    /// Bonuses for special detonations.
    pub detonation: DetonationBonus,
    /// Combo awards.
    pub combos: ComboScores,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            per_tile: 10,
            per_layer: 25,
            detonation: DetonationBonus {
                line: 80,
                bomb: 120,
                color_bomb: 180,
            },
            combos: ComboScores {
                line_cross: ComboAward::new(180, 12),
                double_bomb: ComboAward::new(200, 14),
                double_color_bomb: ComboAward::new(400, 20),
                color_infusion: ComboAward::new(240, 16),
                color_sweep: ComboAward::new(240, 15),
                mixed: ComboAward::new(150, 12),
            },
        }
    }
}

impl ScoreTable {
    /// Award used by ordinary match steps.
    #[must_use]
    pub const fn tile_award(&self) -> TileAward {
        TileAward {
            per_tile: self.per_tile,
            per_layer: self.per_layer,
        }
    }

    /// Bonus for one detonation of `special`.
    #[must_use]
    pub const fn detonation_bonus(&self, special: Special) -> u64 {
        match special {
            Special::LineHorizontal | Special::LineVertical => self.detonation.line,
            Special::Bomb => self.detonation.bomb,
            Special::ColorBomb => self.detonation.color_bomb,
        }
    }

    /// Award for a combo of `kind`.
    #[must_use]
    pub const fn combo_award(&self, kind: ComboKind) -> ComboAward {
        match kind {
            ComboKind::LineCross => self.combos.line_cross,
            ComboKind::DoubleBomb => self.combos.double_bomb,
            ComboKind::DoubleColorBomb => self.combos.double_color_bomb,
            ComboKind::ColorInfusion(_) => self.combos.color_infusion,
            ComboKind::ColorSweep => self.combos.color_sweep,
            ComboKind::Mixed => self.combos.mixed,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on cascade steps resolved by one swap. Reaching it stops
    /// the loop without error.
    pub max_cascade_steps: u32,
    /// Scoring rules.
    pub scoring: ScoreTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cascade_steps: DEFAULT_MAX_CASCADE_STEPS,
            scoring: ScoreTable::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the cascade step bound.
    #[must_use]
    pub fn with_max_cascade_steps(mut self, steps: u32) -> Self {
        self.max_cascade_steps = steps;
        self
    }

    /// Replaces the score table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoreTable) -> Self {
        self.scoring = scoring;
        self
    }
}
