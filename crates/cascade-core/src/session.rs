//! A game session: one board, its random source, and running totals.
//!
//! The session owns its [`Board`] and mutates it in place; callers only see
//! it between swaps, when it is always full. It does not interpret
//! objectives or decide win and loss. [`Tally`] carries the raw counts an
//! objective evaluator reduces over.

use std::collections::BTreeMap;

use cascade_grid::{
    Board, BoardConfig, BoardError, Color, Coord, LayerTally, OverlayPlacement, SeededSource,
};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::hint::has_valid_swap;
use crate::swap::{swap, SwapOutcome};

/// Cumulative counts across the swaps of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Total score.
    pub score: u64,
    /// Swaps that consumed a move.
    pub moves: u32,
    /// Tiles cleared per color.
    pub collected: BTreeMap<Color, u32>,
    /// Overlay units cleared per kind.
    pub layers: LayerTally,
    /// Specials created.
    pub specials_created: u32,
    /// Combos triggered.
    pub combos: u32,
    /// Most resolution steps in a single swap.
    pub longest_cascade: u32,
}

impl Tally {
    /// Folds one swap result into the totals. No-op results are ignored.
    pub fn record(&mut self, outcome: &SwapOutcome) {
        if !outcome.moved {
            return;
        }
        self.score += outcome.score_delta;
        self.moves += 1;
        for tile in &outcome.tiles_cleared {
            *self.collected.entry(tile.color).or_default() += 1;
        }
        self.layers.absorb(outcome.layers_cleared);
        self.specials_created += u32::try_from(outcome.specials_created.len()).unwrap_or(u32::MAX);
        if outcome.combo.is_some() {
            self.combos += 1;
        }
        self.longest_cascade = self.longest_cascade.max(outcome.cascades);
    }

    /// Tiles of `color` cleared so far.
    #[must_use]
    pub fn collected(&self, color: Color) -> u32 {
        self.collected.get(&color).copied().unwrap_or(0)
    }
}

/// One game in progress.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    source: SeededSource,
    config: EngineConfig,
    tally: Tally,
}

impl Session {
    /// Generates a board and starts a session on it.
    ///
    /// # Errors
    ///
    /// Returns the [`BoardError`] from board construction.
    pub fn new(
        board_config: &BoardConfig,
        overlays: &[OverlayPlacement],
        blocked: &[Coord],
        seed: u64,
        config: EngineConfig,
    ) -> Result<Self, BoardError> {
        let mut source = SeededSource::new(seed);
        let board = Board::generate(board_config, overlays, blocked, &mut source)?;
        Ok(Self {
            board,
            source,
            config,
            tally: Tally::default(),
        })
    }

    /// Starts a session on an existing board. Refills draw from `seed`.
    #[must_use]
    pub fn from_board(board: Board, seed: u64, config: EngineConfig) -> Self {
        Self {
            board,
            source: SeededSource::new(seed),
            config,
            tally: Tally::default(),
        }
    }

    /// Plays one swap and records the result.
    pub fn swap(&mut self, a: Coord, b: Coord) -> SwapOutcome {
        let outcome = swap(&mut self.board, a, b, &mut self.source, &self.config);
        self.tally.record(&outcome);
        outcome
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Running totals.
    #[must_use]
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Seed of the session's random source.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// Returns true if any swap on the current board would do something.
    #[must_use]
    pub fn has_valid_swap(&self) -> bool {
        has_valid_swap(&self.board)
    }
}
