//! Placement of planned gold piles onto free floor.

use nuggets_core::{Cell, Glyph, GoldConfig, GoldPile, Occupant};
use rand::Rng;

use crate::{World, WorldError};

impl<C: Cell, P: Occupant> World<C, P> {
    /// Scatters the configured gold budget across free floor cells.
    ///
    /// The world must hold at least as many free cells as the planned pile
    /// count; otherwise nothing is placed. Each pile samples the free set
    /// afresh, so a cell that just received gold is never chosen twice.
    pub fn distribute_gold<R>(
        &mut self,
        config: &GoldConfig,
        rng: &mut R,
    ) -> Result<Vec<GoldPile>, WorldError>
    where
        R: Rng + ?Sized,
    {
        let amounts = nuggets_system_gold::plan_piles(config, rng)?;
        let available = self.free_cells().len();
        if available < amounts.len() {
            return Err(WorldError::InsufficientCapacity {
                required: amounts.len(),
                available,
            });
        }

        let mut piles = Vec::with_capacity(amounts.len());
        for amount in amounts {
            let cell = self.free_cells().draw_uniform(rng)?;
            let terrain = self
                .cell_mut(cell)
                .ok_or(WorldError::OutOfBounds { cell })?;
            terrain.add_gold(amount);
            terrain.set_glyph(Glyph::Gold);
            tracing::debug!(column = cell.column(), row = cell.row(), amount, "gold placed");
            piles.push(GoldPile { cell, amount });
        }

        tracing::info!(piles = piles.len(), total = config.total(), "gold distributed");
        Ok(piles)
    }
}
