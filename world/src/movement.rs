//! Movement resolution for occupants.

use nuggets_core::{Cell, CellCoord, Direction, Glyph, Occupant};

use crate::{World, WorldError};

/// Result of a single movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The destination was off the grid or not walkable; nothing changed.
    Blocked,
    /// The occupant stepped onto walkable terrain.
    Walked {
        /// Cell the occupant left.
        from: CellCoord,
        /// Cell the occupant now stands on.
        to: CellCoord,
        /// Gold picked up from a pile on the destination, if it held one.
        collected: Option<u32>,
    },
    /// The occupant traded places with the occupant on the destination.
    Swapped {
        /// Cell the mover left and the displaced occupant now holds.
        from: CellCoord,
        /// Cell the displaced occupant left and the mover now holds.
        to: CellCoord,
        /// Glyph of the displaced occupant.
        displaced: char,
    },
}

impl MoveOutcome {
    /// Reports whether the mover's position changed.
    #[must_use]
    pub const fn moved(&self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

impl<C: Cell, P: Occupant> World<C, P> {
    /// Moves the occupant one step, returning whether its position changed.
    pub fn move_occupant(&mut self, glyph: char, direction: Direction) -> Result<bool, WorldError> {
        self.resolve_move(glyph, direction)
            .map(|outcome| outcome.moved())
    }

    /// Resolves a single step for the occupant identified by `glyph`.
    ///
    /// An occupant on the destination is swapped with the mover. Otherwise the
    /// mover walks onto floor, gold or found markers; stepping onto a gold
    /// pile credits its gold to the mover and turns the cell back into floor.
    /// Steps off the grid or into any other terrain leave the world untouched.
    pub fn resolve_move(
        &mut self,
        glyph: char,
        direction: Direction,
    ) -> Result<MoveOutcome, WorldError> {
        let from_index = self
            .locate(glyph)
            .ok_or(WorldError::UnknownOccupant { glyph })?;
        let Some(from) = self.shape.cell_at(from_index) else {
            return Ok(MoveOutcome::Blocked);
        };
        let Some(to) = self.shape.neighbor(from, direction) else {
            tracing::debug!(%glyph, ?direction, "move blocked by grid edge");
            return Ok(MoveOutcome::Blocked);
        };
        let Some(to_index) = self.shape.index(to) else {
            return Ok(MoveOutcome::Blocked);
        };

        if let Some(displaced) = self.occupants[to_index].as_ref().map(Occupant::glyph) {
            self.swap(from_index, to_index, from, to);
            tracing::debug!(%glyph, %displaced, "occupants swapped");
            return Ok(MoveOutcome::Swapped {
                from,
                to,
                displaced,
            });
        }

        let Some(terrain) = self.terrain[to_index].as_mut() else {
            return Ok(MoveOutcome::Blocked);
        };
        let destination = terrain.glyph();
        if !destination.is_walkable() {
            tracing::debug!(%glyph, ?direction, ?destination, "move blocked by terrain");
            return Ok(MoveOutcome::Blocked);
        }

        let collected = if destination == Glyph::Gold {
            let amount = terrain.take_gold();
            terrain.set_glyph(Glyph::Floor);
            Some(amount)
        } else {
            None
        };

        let mut mover = self.occupants[from_index].take();
        if let Some(occupant) = mover.as_mut() {
            occupant.set_cell(to);
            if let Some(amount) = collected {
                occupant.add_gold(amount);
                tracing::debug!(%glyph, amount, purse = occupant.gold(), "gold collected");
            }
        }
        self.occupants[to_index] = mover;

        Ok(MoveOutcome::Walked {
            from,
            to,
            collected,
        })
    }

    fn swap(&mut self, from_index: usize, to_index: usize, from: CellCoord, to: CellCoord) {
        self.occupants.swap(from_index, to_index);
        if let Some(mover) = self.occupants[to_index].as_mut() {
            mover.set_cell(to);
        }
        if let Some(displaced) = self.occupants[from_index].as_mut() {
            displaced.set_cell(from);
        }
    }
}

#[cfg(test)]
mod tests {
    use nuggets_core::{Player, SessionHandle};

    use super::*;

    fn world_with(map: &str, players: &[(char, u32, u32)]) -> World {
        let mut world: World = World::from_map_str(map).expect("valid map");
        for (glyph, column, row) in players {
            world
                .place_occupant(Player::spawn(
                    *glyph,
                    "player",
                    SessionHandle::detached(),
                    CellCoord::new(*column, *row),
                ))
                .expect("empty cell");
        }
        world
    }

    #[test]
    fn walls_block_in_single_row_map() {
        let mut world = world_with(".#.#.", &[('A', 0, 0)]);
        assert_eq!(world.move_occupant('A', Direction::Right).ok(), Some(false));

        let mut world = world_with(".#.#.", &[('A', 2, 0)]);
        assert_eq!(world.move_occupant('A', Direction::Right).ok(), Some(false));
        assert_eq!(world.move_occupant('A', Direction::Left).ok(), Some(false));
        assert_eq!(world.occupant('A').map(Occupant::cell), Some(CellCoord::new(2, 0)));
    }

    #[test]
    fn walking_updates_slot_and_record_together() {
        let mut world = world_with("...\n...", &[('A', 0, 0)]);

        let outcome = world.resolve_move('A', Direction::DownRight).expect("known occupant");

        let destination = CellCoord::new(1, 1);
        assert_eq!(
            outcome,
            MoveOutcome::Walked {
                from: CellCoord::new(0, 0),
                to: destination,
                collected: None
            }
        );
        assert!(world.occupant_at(CellCoord::new(0, 0)).is_none());
        assert_eq!(world.occupant_at(destination).map(Occupant::cell), Some(destination));
    }

    #[test]
    fn stepping_on_gold_collects_it() {
        let mut world = world_with("..", &[('A', 0, 0)]);
        let pile = CellCoord::new(1, 0);
        if let Some(cell) = world.cell_mut(pile) {
            cell.set_glyph(Glyph::Gold);
            cell.add_gold(42);
        }

        let outcome = world.resolve_move('A', Direction::Right).expect("known occupant");

        assert_eq!(
            outcome,
            MoveOutcome::Walked {
                from: CellCoord::new(0, 0),
                to: pile,
                collected: Some(42)
            }
        );
        let cell = world.cell(pile).expect("terrain");
        assert_eq!(cell.gold(), 0);
        assert_eq!(cell.glyph(), Glyph::Floor);
        assert_eq!(world.occupant('A').map(Occupant::gold), Some(42));
    }

    #[test]
    fn found_marker_is_walkable_without_pickup() {
        let mut world = world_with(".$", &[('A', 0, 0)]);
        let outcome = world.resolve_move('A', Direction::Right).expect("known occupant");
        assert!(matches!(outcome, MoveOutcome::Walked { collected: None, .. }));
        assert_eq!(world.cell(CellCoord::new(1, 0)).map(Cell::glyph), Some(Glyph::Found));
    }

    #[test]
    fn swap_exchanges_positions_only_of_the_pair() {
        let mut world = world_with("...\n...", &[('A', 0, 0), ('B', 1, 0), ('C', 2, 1)]);

        let outcome = world.resolve_move('A', Direction::Right).expect("known occupant");

        assert_eq!(
            outcome,
            MoveOutcome::Swapped {
                from: CellCoord::new(0, 0),
                to: CellCoord::new(1, 0),
                displaced: 'B'
            }
        );
        assert_eq!(world.occupant('A').map(Occupant::cell), Some(CellCoord::new(1, 0)));
        assert_eq!(world.occupant('B').map(Occupant::cell), Some(CellCoord::new(0, 0)));
        assert_eq!(world.occupant('C').map(Occupant::cell), Some(CellCoord::new(2, 1)));
        for occupant in world.iter_occupants() {
            assert_eq!(
                world.occupant_at(occupant.cell()).map(Occupant::glyph),
                Some(occupant.glyph())
            );
        }
    }

    #[test]
    fn unknown_occupant_is_reported() {
        let mut world = world_with("..", &[]);
        assert!(matches!(
            world.resolve_move('Q', Direction::Left),
            Err(WorldError::UnknownOccupant { glyph: 'Q' })
        ));
    }
}
