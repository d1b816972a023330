//! Deep copies of the world for broadcast.

use nuggets_core::{Cell, Occupant};

use crate::{World, WorldError};

impl<C: Cell, P: Occupant> World<C, P> {
    /// Produces an independent deep copy of every cell and occupant.
    ///
    /// A terrain slot without a cell signals corruption; the copy is abandoned
    /// and the hole reported.
    pub fn snapshot(&self) -> Result<Self, WorldError> {
        let mut copy = Self::empty(self.shape);
        for (index, (terrain, occupant)) in self.terrain.iter().zip(&self.occupants).enumerate() {
            let cell = terrain.as_ref().ok_or(WorldError::MissingCell { index })?;
            copy.terrain[index] = Some(cell.clone());
            copy.occupants[index] = occupant.clone();
        }
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use nuggets_core::{CellCoord, Direction, Glyph, Player, SessionHandle};

    use super::*;

    #[test]
    fn snapshot_matches_source_layout() {
        let mut world: World = World::from_map_str("+--+\n|..|\n+--+").expect("valid map");
        world
            .place_occupant(Player::spawn('A', "alice", SessionHandle::detached(), CellCoord::new(1, 1)))
            .expect("empty cell");

        let copy = world.snapshot().expect("complete grid");

        assert_eq!(copy.shape(), world.shape());
        assert_eq!(copy.terrain(), world.terrain());
        assert_eq!(copy.occupants(), world.occupants());
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let mut world: World = World::from_map_str("...").expect("valid map");
        world
            .place_occupant(Player::spawn('A', "alice", SessionHandle::detached(), CellCoord::new(0, 0)))
            .expect("empty cell");
        let mut copy = world.snapshot().expect("complete grid");

        assert_eq!(world.move_occupant('A', Direction::Right).ok(), Some(true));
        if let Some(cell) = copy.cell_mut(CellCoord::new(2, 0)) {
            cell.set_glyph(Glyph::Wall);
        }

        assert_eq!(copy.occupant('A').map(Occupant::cell), Some(CellCoord::new(0, 0)));
        assert_eq!(world.cell(CellCoord::new(2, 0)).map(Cell::glyph), Some(Glyph::Floor));
    }

    #[test]
    fn missing_cell_aborts_snapshot() {
        let mut world: World = World::from_map_str("...").expect("valid map");
        world.terrain[1] = None;
        assert!(matches!(world.snapshot(), Err(WorldError::MissingCell { index: 1 })));
    }
}
