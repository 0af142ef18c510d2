//! Validated tile palette and the bounded-retry color picker.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::source::TileSource;
use crate::tile::Color;

/// Maximum random draws before the picker falls back to a deterministic choice.
pub const MAX_PICK_ATTEMPTS: usize = 8;

/// Non-empty, duplicate-free list of colors a board draws from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Validates and wraps a color list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyPalette`] for an empty list and
    /// [`BoardError::DuplicateColor`] if a color appears twice.
    pub fn new(colors: Vec<Color>) -> Result<Self, BoardError> {
        if colors.is_empty() {
            return Err(BoardError::EmptyPalette);
        }
        let mut seen = [false; Color::COUNT];
        for color in &colors {
            if std::mem::replace(&mut seen[color.index()], true) {
                return Err(BoardError::DuplicateColor(*color));
            }
        }
        Ok(Self { colors })
    }

    /// Colors in palette order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns true if `color` belongs to the palette.
    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Picks a color, avoiding `forbidden` where possible.
    ///
    /// Draws up to [`MAX_PICK_ATTEMPTS`] times from `source`, returning the
    /// first draw not in `forbidden`. If every draw is forbidden, returns the
    /// first palette color not forbidden, or the last draw when the palette
    /// offers no allowed color at all.
    ///
    /// This is pure with respect to the board: callers compute `forbidden`
    /// (typically via [`crate::Board::forbidden_colors`]).
    ///
    /// # Example
    ///
    /// ```
    /// use cascade_grid::{Color, Palette, ScriptedSource};
    ///
    /// let palette = Palette::new(vec![Color::Red, Color::Green, Color::Blue]).unwrap();
    /// // Script always draws index 0 (red), which is forbidden.
    /// let mut source = ScriptedSource::new(vec![0]);
    /// let color = palette.pick(&[Color::Red], &mut source);
    /// assert_eq!(color, Color::Green);
    /// ```
    pub fn pick(&self, forbidden: &[Color], source: &mut dyn TileSource) -> Color {
        let mut last = self.colors[0];
        for _ in 0..MAX_PICK_ATTEMPTS {
            last = self.colors[source.next_index(self.colors.len()) % self.colors.len()];
            if !forbidden.contains(&last) {
                return last;
            }
        }
        self.colors
            .iter()
            .copied()
            .find(|color| !forbidden.contains(color))
            .unwrap_or(last)
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = BoardError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}
