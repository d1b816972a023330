//! Failures reported by world operations.

use std::{io, path::PathBuf};

use nuggets_core::CellCoord;
use nuggets_system_gold::GoldConfigError;

/// Errors raised while building or mutating the world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The map source could not be opened or read.
    #[error("failed to read map {}", path.display())]
    MapLoad {
        /// Path of the map file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The map source contained no rows or no columns.
    #[error("map contains no cells")]
    EmptyMap,
    /// The map dimensions do not fit the grid's address space.
    #[error("map dimensions exceed the addressable grid")]
    MapTooLarge,
    /// A map character has no terrain glyph.
    #[error("unrecognised map symbol {symbol:?} at column {column}, row {row}")]
    InvalidCell {
        /// Offending character.
        symbol: char,
        /// Column of the character.
        column: u32,
        /// Row of the character.
        row: u32,
    },
    /// No open, unoccupied, gold-free floor cell remains.
    #[error("no free floor cell available")]
    NoFreeCell,
    /// The grid has fewer free cells than the distribution may need.
    #[error("gold distribution needs {required} free cells but only {available} exist")]
    InsufficientCapacity {
        /// Number of piles planned.
        required: usize,
        /// Number of eligible cells on the grid.
        available: usize,
    },
    /// The gold configuration cannot be planned.
    #[error("invalid gold configuration")]
    InvalidGoldConfig(#[from] GoldConfigError),
    /// No occupant with the glyph stands on the grid.
    #[error("no occupant {glyph:?} on the grid")]
    UnknownOccupant {
        /// Glyph that was looked up.
        glyph: char,
    },
    /// An occupant with the glyph already stands on the grid.
    #[error("occupant {glyph:?} is already on the grid")]
    DuplicateOccupant {
        /// Glyph that is already in use.
        glyph: char,
    },
    /// The cell lies outside the grid.
    #[error("cell {cell:?} lies outside the grid")]
    OutOfBounds {
        /// Rejected cell.
        cell: CellCoord,
    },
    /// Another occupant already holds the cell.
    #[error("cell {cell:?} is already occupied")]
    CellOccupied {
        /// Rejected cell.
        cell: CellCoord,
    },
    /// A terrain slot that must hold a cell was empty.
    #[error("terrain slot {index} is missing its cell")]
    MissingCell {
        /// Linear index of the empty slot.
        index: usize,
    },
}
