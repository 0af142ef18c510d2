//! Overlay layers bound to cells.
//!
//! Overlays are secondary obstacles that sit on a cell independent of the
//! tile it holds. They are placed once at board construction and peeled one
//! unit per clear event. A cell may carry both kinds at once; ice covers
//! jelly, so ice is always peeled first.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single overlay kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Frozen cover over the cell.
    Ice,
    /// Jelly underneath the tile.
    Jelly,
}

impl Layer {
    /// Peel order: the first entry is removed first.
    pub const PEEL_ORDER: [Layer; 2] = [Layer::Ice, Layer::Jelly];

    /// The bit for this layer in a [`Layers`] set.
    #[must_use]
    pub const fn flag(self) -> Layers {
        match self {
            Self::Ice => Layers::ICE,
            Self::Jelly => Layers::JELLY,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ice => write!(f, "ice"),
            Self::Jelly => write!(f, "jelly"),
        }
    }
}

bitflags! {
    /// Set of overlay layers carried by one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Layers: u8 {
        /// Ice cover.
        const ICE = 0b0000_0001;
        /// Jelly.
        const JELLY = 0b0000_0010;
    }
}

impl Layers {
    /// Removes exactly one layer unit, outermost first, and reports which
    /// kind was removed. Returns `None` when the set is already empty.
    ///
    /// # Example
    ///
    /// ```
    /// use cascade_grid::{Layer, Layers};
    ///
    /// let mut layers = Layers::ICE | Layers::JELLY;
    /// assert_eq!(layers.peel(), Some(Layer::Ice));
    /// assert_eq!(layers.peel(), Some(Layer::Jelly));
    /// assert_eq!(layers.peel(), None);
    /// ```
    pub fn peel(&mut self) -> Option<Layer> {
        let layer = Layer::PEEL_ORDER
            .into_iter()
            .find(|layer| self.contains(layer.flag()))?;
        self.remove(layer.flag());
        Some(layer)
    }

    /// Returns true if the given layer kind is present.
    #[must_use]
    pub fn has(self, layer: Layer) -> bool {
        self.contains(layer.flag())
    }
}

/// Per-kind count of overlay layers removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerTally {
    /// Ice units removed.
    pub ice: u32,
    /// Jelly units removed.
    pub jelly: u32,
}

impl LayerTally {
    /// Records one removed unit of `layer`.
    pub fn record(&mut self, layer: Layer) {
        match layer {
            Layer::Ice => self.ice += 1,
            Layer::Jelly => self.jelly += 1,
        }
    }

    /// Adds another tally into this one.
    pub fn absorb(&mut self, other: LayerTally) {
        self.ice += other.ice;
        self.jelly += other.jelly;
    }

    /// Count for one layer kind.
    #[must_use]
    pub const fn get(&self, layer: Layer) -> u32 {
        match layer {
            Layer::Ice => self.ice,
            Layer::Jelly => self.jelly,
        }
    }

    /// Total units across kinds.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.ice + self.jelly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peel_single_layer() {
        let mut layers = Layers::JELLY;
        assert_eq!(layers.peel(), Some(Layer::Jelly));
        assert!(layers.is_empty());
    }

    #[test]
    fn peel_empty_is_none() {
        let mut layers = Layers::empty();
        assert_eq!(layers.peel(), None);
    }

    #[test]
    fn tally_records_and_absorbs() {
        let mut a = LayerTally::default();
        a.record(Layer::Ice);
        a.record(Layer::Jelly);
        a.record(Layer::Ice);

        let mut b = LayerTally::default();
        b.absorb(a);
        b.absorb(a);
        assert_eq!(b.get(Layer::Ice), 4);
        assert_eq!(b.get(Layer::Jelly), 2);
        assert_eq!(b.total(), 6);
    }
}
