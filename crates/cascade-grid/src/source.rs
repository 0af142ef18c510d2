//! Randomness seam for tile generation.
//!
//! Every random decision the engine makes goes through a [`TileSource`]. The
//! default [`SeededSource`] wraps a ChaCha8 generator so that identical seeds
//! replay identical boards; [`ScriptedSource`] replays a fixed index sequence
//! for tutorials and tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of palette indices for new tiles.
pub trait TileSource {
    /// Returns an index in `0..len`. `len` is always at least 1.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Deterministic seeded source backed by ChaCha8.
///
/// # Example
///
/// ```
/// use cascade_grid::{SeededSource, TileSource};
///
/// let mut a = SeededSource::new(7);
/// let mut b = SeededSource::new(7);
/// let xs: Vec<usize> = (0..16).map(|_| a.next_index(5)).collect();
/// let ys: Vec<usize> = (0..16).map(|_| b.next_index(5)).collect();
/// assert_eq!(xs, ys);
/// ```
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededSource {
    /// Creates a source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Re-seeds the generator so the sequence replays from the start.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

impl TileSource for SeededSource {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}

/// Source that cycles through a fixed list of indices.
///
/// Indices are reduced modulo `len`, so a script written for a five-color
/// palette stays valid on smaller palettes.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a scripted source. An empty script always yields index 0.
    #[must_use]
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of indices handed out so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl TileSource for ScriptedSource {
    fn next_index(&mut self, len: usize) -> usize {
        let len = len.max(1);
        if self.script.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % len
    }
}
