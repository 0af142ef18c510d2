//! # Cascade Grid
//!
//! Tile grid substrate for the cascade match-3 engine.
//!
//! A [`Board`] is a fixed `rows × cols` grid of [`Cell`]s. Each cell owns at
//! most one [`Tile`], carries zero or more overlay [`Layers`] (ice, jelly) and
//! may be permanently blocked. This crate holds the data model and its
//! invariants; match detection and resolution live in `cascade-core`.
//!
//! Randomness is isolated behind the [`TileSource`] trait so that a seeded
//! source ([`SeededSource`]) or a scripted one ([`ScriptedSource`]) can drive
//! tile generation deterministically.
//!
//! ## Quick Start
//!
//! ```
//! use cascade_grid::{Board, BoardConfig, Color, Coord, Layer, OverlayPlacement, SeededSource};
//!
//! let config = BoardConfig::new(8, 8, Color::standard().to_vec());
//! let overlays = [OverlayPlacement::new(Coord::new(3, 3), Layer::Ice)];
//! let blocked = [Coord::new(0, 0)];
//!
//! let mut source = SeededSource::new(42);
//! let board = Board::generate(&config, &overlays, &blocked, &mut source).unwrap();
//!
//! assert!(board.is_blocked(Coord::new(0, 0)));
//! assert!(board.tile(Coord::new(4, 4)).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod coord;
pub mod error;
pub mod hash;
pub mod layer;
pub mod palette;
pub mod source;
pub mod tile;

// Re-exports for convenience
pub use board::{Board, BoardConfig, Cell, OverlayPlacement};
pub use coord::{Coord, Orientation};
pub use error::BoardError;
pub use hash::hash_board;
pub use layer::{Layer, LayerTally, Layers};
pub use palette::{Palette, MAX_PICK_ATTEMPTS};
pub use source::{ScriptedSource, SeededSource, TileSource};
pub use tile::{Color, Special, Tile, TileId};
