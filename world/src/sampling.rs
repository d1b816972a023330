//! Free-cell sampling used for spawning and gold placement.

use nuggets_core::{Cell, CellCoord, Glyph, Occupant};
use rand::Rng;

use crate::{World, WorldError};

/// Cells that are open floor, unoccupied and free of gold.
///
/// The set reflects the world at the moment it was computed; any mutation
/// invalidates it, so callers sample afresh before each placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreeCells {
    cells: Vec<CellCoord>,
}

impl FreeCells {
    /// Eligible cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of eligible cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is eligible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Draws one eligible cell with probability `1 / len`.
    pub fn draw_uniform<R>(&self, rng: &mut R) -> Result<CellCoord, WorldError>
    where
        R: Rng + ?Sized,
    {
        if self.cells.is_empty() {
            return Err(WorldError::NoFreeCell);
        }
        let pick = rng.gen_range(0..self.cells.len());
        Ok(self.cells[pick])
    }
}

impl<C: Cell, P: Occupant> World<C, P> {
    /// Scans the grid for cells eligible to receive an occupant or gold.
    #[must_use]
    pub fn free_cells(&self) -> FreeCells {
        let cells = self
            .terrain
            .iter()
            .zip(&self.occupants)
            .enumerate()
            .filter(|(_, (terrain, occupant))| {
                occupant.is_none()
                    && terrain
                        .as_ref()
                        .is_some_and(|cell| cell.glyph() == Glyph::Floor && cell.gold() == 0)
            })
            .filter_map(|(index, _)| self.shape.cell_at(index))
            .collect();
        FreeCells { cells }
    }
}
