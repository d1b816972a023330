//! Default occupant implementation.

use crate::{CellCoord, Occupant, SessionHandle};

/// Player standing on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    glyph: char,
    name: String,
    cell: CellCoord,
    purse: u32,
    handle: SessionHandle,
}

impl Player {
    /// Real name reported when the player joined.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Session handle the network layer uses to reach the player.
    #[must_use]
    pub const fn handle(&self) -> SessionHandle {
        self.handle
    }
}

impl Occupant for Player {
    fn spawn(glyph: char, name: &str, handle: SessionHandle, cell: CellCoord) -> Self {
        Self {
            glyph,
            name: name.to_owned(),
            cell,
            purse: 0,
            handle,
        }
    }

    fn glyph(&self) -> char {
        self.glyph
    }

    fn cell(&self) -> CellCoord {
        self.cell
    }

    fn set_cell(&mut self, cell: CellCoord) {
        self.cell = cell;
    }

    fn gold(&self) -> u32 {
        self.purse
    }

    fn add_gold(&mut self, amount: u32) {
        self.purse = self.purse.saturating_add(amount);
    }
}
