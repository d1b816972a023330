//! Default terrain cell implementation.

use crate::{Cell, Glyph};

/// Terrain cell carrying a glyph, an optional gold pile and visibility flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spot {
    glyph: Glyph,
    gold: u32,
    visible: bool,
    gold_hidden: bool,
}

impl Spot {
    /// Creates a visible cell showing the provided glyph with no gold.
    #[must_use]
    pub const fn new(glyph: Glyph) -> Self {
        Self {
            glyph,
            gold: 0,
            visible: true,
            gold_hidden: false,
        }
    }

    /// Marks the cell as visible or hidden for its viewer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Marks any gold on the cell as not yet discovered by its viewer.
    pub fn set_gold_hidden(&mut self, hidden: bool) {
        self.gold_hidden = hidden;
    }
}

impl Cell for Spot {
    fn from_symbol(symbol: char) -> Option<Self> {
        Glyph::from_symbol(symbol).map(Self::new)
    }

    fn glyph(&self) -> Glyph {
        self.glyph
    }

    fn set_glyph(&mut self, glyph: Glyph) {
        self.glyph = glyph;
    }

    fn gold(&self) -> u32 {
        self.gold
    }

    fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    fn take_gold(&mut self) -> u32 {
        std::mem::take(&mut self.gold)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn hides_gold(&self) -> bool {
        self.gold_hidden && self.gold > 0
    }
}
