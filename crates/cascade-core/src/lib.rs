//! # Cascade Core
//!
//! Board resolution engine for match-3 puzzles.
//!
//! Given a [`cascade_grid::Board`], the engine validates player swaps,
//! detects matches, creates and triggers special tiles, resolves combos,
//! clears overlay layers, and loops gravity and refill until the board
//! settles. Every call reports the score delta and the raw counts a caller
//! needs for objectives and move accounting.
//!
//! ## Pipeline
//!
//! - [`matcher`]: runs of three or more, merged into cross groups
//! - [`special`]: which special each group awards, and where it goes
//! - [`trigger`]: blast areas, transitive expansion, combos
//! - [`clear`]: remove tiles, peel layers, collapse, refill
//! - [`cascade`]: the bounded detect/clear loop
//! - [`swap`](mod@swap): validation and dispatch; the entry point
//!
//! ## Usage
//!
//! ```
//! use cascade_core::{EngineConfig, Session};
//! use cascade_grid::{BoardConfig, Coord, Layer, OverlayPlacement};
//!
//! let overlays = [OverlayPlacement::new(Coord::new(4, 4), Layer::Jelly)];
//! let mut session = Session::new(
//!     &BoardConfig::standard(8, 8),
//!     &overlays,
//!     &[Coord::new(0, 0)],
//!     42,
//!     EngineConfig::default(),
//! )
//! .unwrap();
//!
//! if let Some((a, b)) = cascade_core::find_valid_swap(session.board()) {
//!     let outcome = session.swap(a, b);
//!     assert!(outcome.moved);
//! }
//! assert!(session.board().is_full());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub use cascade_grid;

pub mod cascade;
pub mod clear;
pub mod config;
pub mod hint;
pub mod matcher;
pub mod session;
pub mod special;
pub mod swap;
pub mod trigger;

pub use cascade::{run_cascade, CascadeOutcome, StepReport};
pub use clear::{clear_and_collapse, ClearOutcome, ClearedTile};
pub use config::{ComboAward, DetonationBonus, EngineConfig, ScoreTable, TileAward};
pub use hint::{find_valid_swap, has_valid_swap, valid_swaps};
pub use matcher::{find_matches, MatchGroup, MatchShape};
pub use session::{Session, Tally};
pub use special::{plan_specials, SpecialSpawn};
pub use swap::{swap, SwapOutcome, SwapRejection};
pub use trigger::{resolve_combo, ClearSet, Combo, ComboKind, Detonation, Expansion};

#[cfg(test)]
mod tests;
