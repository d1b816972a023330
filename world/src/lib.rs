#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Nuggets.
//!
//! The [`World`] owns two equal-length slot arrays sharing one linear address
//! space: terrain cells and occupants. Every slot is addressed through
//! [`GridShape`], and every mutation takes `&mut World`, so no caller can
//! observe the two arrays disagreeing.

use std::{fs, path::Path};

use nuggets_core::{
    Cell, CellCoord, Command, Event, GridShape, Occupant, Player, SessionHandle, Spot,
};
use rand::Rng;

mod error;
mod gold;
mod movement;
mod sampling;
pub mod shared;
mod snapshot;

pub use error::WorldError;
pub use movement::MoveOutcome;
pub use sampling::FreeCells;
pub use shared::SharedWorld;

/// Symbol used to pad rows shorter than the widest map line.
const VOID_SYMBOL: char = ' ';

/// Represents the authoritative Nuggets world state.
#[derive(Debug)]
pub struct World<C = Spot, P = Player> {
    shape: GridShape,
    terrain: Vec<Option<C>>,
    occupants: Vec<Option<P>>,
}

impl<C: Cell, P: Occupant> World<C, P> {
    /// Loads a world from the map file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| WorldError::MapLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let world = Self::from_map_str(&source)?;
        tracing::info!(
            path = %path.display(),
            rows = world.rows(),
            columns = world.columns(),
            "loaded map"
        );
        Ok(world)
    }

    /// Builds a world from map text.
    ///
    /// The first pass sizes the grid from the line count and the longest line.
    /// The second pass turns every character into a cell; rows shorter than the
    /// widest line are padded with void cells.
    pub fn from_map_str(source: &str) -> Result<Self, WorldError> {
        let shape = measure(source)?;
        let mut world = Self::empty(shape);
        world.populate(source)?;
        Ok(world)
    }

    /// Allocates a grid whose every slot is explicitly empty.
    pub(crate) fn empty(shape: GridShape) -> Self {
        let capacity = shape.capacity();
        let mut terrain = Vec::with_capacity(capacity);
        terrain.resize_with(capacity, || None);
        let mut occupants = Vec::with_capacity(capacity);
        occupants.resize_with(capacity, || None);
        Self {
            shape,
            terrain,
            occupants,
        }
    }

    fn populate(&mut self, source: &str) -> Result<(), WorldError> {
        for (line, row) in source.lines().zip(0..self.shape.rows()) {
            let mut symbols = line.chars();
            for column in 0..self.shape.columns() {
                let symbol = symbols.next().unwrap_or(VOID_SYMBOL);
                let cell = C::from_symbol(symbol).ok_or(WorldError::InvalidCell {
                    symbol,
                    column,
                    row,
                })?;
                let coord = CellCoord::new(column, row);
                let index = self
                    .shape
                    .index(coord)
                    .ok_or(WorldError::OutOfBounds { cell: coord })?;
                self.terrain[index] = Some(cell);
            }
        }
        Ok(())
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.shape.rows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.shape.columns()
    }

    /// Terrain slots in row-major order.
    #[must_use]
    pub fn terrain(&self) -> &[Option<C>] {
        &self.terrain
    }

    /// Occupant slots in row-major order.
    #[must_use]
    pub fn occupants(&self) -> &[Option<P>] {
        &self.occupants
    }

    /// Terrain cell at the coordinate.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&C> {
        self.shape
            .index(coord)
            .and_then(|index| self.terrain[index].as_ref())
    }

    /// Mutable terrain cell at the coordinate, used to refresh visibility.
    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut C> {
        let index = self.shape.index(coord)?;
        self.terrain[index].as_mut()
    }

    /// Occupant standing on the coordinate.
    #[must_use]
    pub fn occupant_at(&self, coord: CellCoord) -> Option<&P> {
        self.shape
            .index(coord)
            .and_then(|index| self.occupants[index].as_ref())
    }

    /// Occupant identified by the glyph.
    #[must_use]
    pub fn occupant(&self, glyph: char) -> Option<&P> {
        self.iter_occupants()
            .find(|occupant| occupant.glyph() == glyph)
    }

    /// Iterator over every occupant in row-major order of their cells.
    pub fn iter_occupants(&self) -> impl Iterator<Item = &P> {
        self.occupants.iter().flatten()
    }

    pub(crate) fn locate(&self, glyph: char) -> Option<usize> {
        self.occupants.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|occupant| occupant.glyph() == glyph)
        })
    }

    /// Spawns a new occupant on a uniformly drawn free cell.
    pub fn insert_occupant<R>(
        &mut self,
        glyph: char,
        name: &str,
        handle: SessionHandle,
        rng: &mut R,
    ) -> Result<&P, WorldError>
    where
        R: Rng + ?Sized,
    {
        if self.locate(glyph).is_some() {
            return Err(WorldError::DuplicateOccupant { glyph });
        }

        let cell = match self.free_cells().draw_uniform(rng) {
            Ok(cell) => cell,
            Err(error) => {
                tracing::warn!(%glyph, name, "no free cell for new occupant");
                return Err(error);
            }
        };
        let index = self
            .shape
            .index(cell)
            .ok_or(WorldError::OutOfBounds { cell })?;

        tracing::debug!(%glyph, name, column = cell.column(), row = cell.row(), "occupant inserted");
        Ok(&*self.occupants[index].insert(P::spawn(glyph, name, handle, cell)))
    }

    /// Registers an existing occupant at the cell it records as its position.
    pub fn place_occupant(&mut self, occupant: P) -> Result<(), WorldError> {
        let cell = occupant.cell();
        let index = self
            .shape
            .index(cell)
            .ok_or(WorldError::OutOfBounds { cell })?;
        if self.locate(occupant.glyph()).is_some() {
            return Err(WorldError::DuplicateOccupant {
                glyph: occupant.glyph(),
            });
        }
        if self.occupants[index].is_some() {
            return Err(WorldError::CellOccupied { cell });
        }
        self.occupants[index] = Some(occupant);
        Ok(())
    }

    /// Takes the occupant identified by the glyph off the grid.
    pub fn remove_occupant(&mut self, glyph: char) -> Option<P> {
        let index = self.locate(glyph)?;
        self.occupants[index].take()
    }

    /// Tears the world down, releasing every cell and handing occupants back.
    #[must_use]
    pub fn into_occupants(self) -> Vec<P> {
        self.occupants.into_iter().flatten().collect()
    }
}

fn measure(source: &str) -> Result<GridShape, WorldError> {
    let mut rows: usize = 0;
    let mut columns: usize = 0;
    for line in source.lines() {
        rows += 1;
        columns = columns.max(line.chars().count());
    }

    if rows == 0 || columns == 0 {
        return Err(WorldError::EmptyMap);
    }

    let rows = u32::try_from(rows).map_err(|_| WorldError::MapTooLarge)?;
    let columns = u32::try_from(columns).map_err(|_| WorldError::MapTooLarge)?;
    if u64::from(rows) * u64::from(columns) > usize::MAX as u64 {
        return Err(WorldError::MapTooLarge);
    }
    Ok(GridShape::new(columns, rows))
}

/// Applies the provided command to the world, broadcasting what changed.
pub fn apply<C, P, R>(
    world: &mut World<C, P>,
    command: Command,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError>
where
    C: Cell,
    P: Occupant,
    R: Rng + ?Sized,
{
    match command {
        Command::InsertOccupant {
            glyph,
            name,
            handle,
        } => {
            let cell = world.insert_occupant(glyph, &name, handle, rng)?.cell();
            out_events.push(Event::OccupantInserted { glyph, cell });
        }
        Command::MoveOccupant { glyph, direction } => match world.resolve_move(glyph, direction)? {
            MoveOutcome::Blocked => out_events.push(Event::MoveBlocked { glyph, direction }),
            MoveOutcome::Walked {
                from,
                to,
                collected,
            } => {
                out_events.push(Event::OccupantMoved { glyph, from, to });
                if let Some(amount) = collected {
                    out_events.push(Event::GoldCollected {
                        glyph,
                        cell: to,
                        amount,
                    });
                }
            }
            MoveOutcome::Swapped {
                from,
                to,
                displaced,
            } => out_events.push(Event::OccupantsSwapped {
                mover: glyph,
                displaced,
                from,
                to,
            }),
        },
        Command::RemoveOccupant { glyph } => {
            let occupant = world
                .remove_occupant(glyph)
                .ok_or(WorldError::UnknownOccupant { glyph })?;
            out_events.push(Event::OccupantRemoved {
                glyph,
                cell: occupant.cell(),
            });
        }
        Command::DistributeGold { config } => {
            let piles = world.distribute_gold(&config, rng)?;
            out_events.extend(piles.into_iter().map(|pile| Event::GoldPlaced {
                cell: pile.cell,
                amount: pile.amount,
            }));
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use nuggets_core::{Cell, GoldPile, Occupant};

    use super::World;

    /// Sum of the gold lying on terrain cells.
    #[must_use]
    pub fn gold_on_terrain<C: Cell, P: Occupant>(world: &World<C, P>) -> u64 {
        world
            .terrain()
            .iter()
            .flatten()
            .map(|cell| u64::from(cell.gold()))
            .sum()
    }

    /// Sum of the gold carried by occupants.
    #[must_use]
    pub fn gold_carried<C: Cell, P: Occupant>(world: &World<C, P>) -> u64 {
        world
            .iter_occupants()
            .map(|occupant| u64::from(occupant.gold()))
            .sum()
    }

    /// All gold in the world, on the ground or in purses.
    #[must_use]
    pub fn total_gold<C: Cell, P: Occupant>(world: &World<C, P>) -> u64 {
        gold_on_terrain(world) + gold_carried(world)
    }

    /// Every cell still holding gold, in row-major order.
    #[must_use]
    pub fn gold_piles<C: Cell, P: Occupant>(world: &World<C, P>) -> Vec<GoldPile> {
        world
            .shape()
            .cells()
            .filter_map(|cell| {
                let amount = world.cell(cell)?.gold();
                (amount > 0).then_some(GoldPile { cell, amount })
            })
            .collect()
    }
}
