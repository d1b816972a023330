#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Nuggets world engine.
//!
//! This crate defines the message surface that connects the session layer,
//! the authoritative world, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what changed. The terrain and occupant capabilities the world consumes are
//! expressed as the [`Cell`] and [`Occupant`] traits, with [`Spot`] and
//! [`Player`] as the default implementations.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

mod player;
mod spot;

pub use player::Player;
pub use spot::Spot;

/// Amount of gold scattered through a standard game.
pub const GOLD_TOTAL: u32 = 250;
/// Fewest gold piles a standard game distributes.
pub const GOLD_MIN_PILES: u32 = 10;
/// Most gold piles a standard game distributes.
pub const GOLD_MAX_PILES: u32 = 30;

/// Glyph used to highlight the viewer's own occupant in player views.
pub const SELF_GLYPH: char = '@';

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests that a new occupant be spawned on a random free cell.
    InsertOccupant {
        /// Display glyph identifying the occupant.
        glyph: char,
        /// Human readable name reported by the session layer.
        name: String,
        /// Opaque session handle passed through to the occupant.
        handle: SessionHandle,
    },
    /// Requests that an occupant take a single step in the given direction.
    MoveOccupant {
        /// Glyph of the occupant attempting to move.
        glyph: char,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that an occupant leave the grid.
    RemoveOccupant {
        /// Glyph of the departing occupant.
        glyph: char,
    },
    /// Requests that the gold budget be scattered across free floor cells.
    DistributeGold {
        /// Budget and pile bounds for the distribution.
        config: GoldConfig,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that an occupant was spawned.
    OccupantInserted {
        /// Glyph of the new occupant.
        glyph: char,
        /// Cell the occupant spawned on.
        cell: CellCoord,
    },
    /// Confirms that an occupant stepped onto walkable terrain.
    OccupantMoved {
        /// Glyph of the occupant that moved.
        glyph: char,
        /// Cell the occupant left.
        from: CellCoord,
        /// Cell the occupant now stands on.
        to: CellCoord,
    },
    /// Confirms that two occupants traded places.
    OccupantsSwapped {
        /// Glyph of the occupant that initiated the move.
        mover: char,
        /// Glyph of the occupant that was pushed back to the mover's cell.
        displaced: char,
        /// Cell the mover left and the displaced occupant now holds.
        from: CellCoord,
        /// Cell the displaced occupant left and the mover now holds.
        to: CellCoord,
    },
    /// Reports that an occupant picked up a gold pile while moving.
    GoldCollected {
        /// Glyph of the collecting occupant.
        glyph: char,
        /// Cell that held the pile.
        cell: CellCoord,
        /// Amount of gold credited to the occupant.
        amount: u32,
    },
    /// Reports that a move request left the world unchanged.
    MoveBlocked {
        /// Glyph of the occupant whose move was rejected.
        glyph: char,
        /// Direction that was requested.
        direction: Direction,
    },
    /// Confirms that a gold pile was placed.
    GoldPlaced {
        /// Cell that received the pile.
        cell: CellCoord,
        /// Amount of gold in the pile.
        amount: u32,
    },
    /// Confirms that an occupant left the grid.
    OccupantRemoved {
        /// Glyph of the departed occupant.
        glyph: char,
        /// Cell the occupant vacated.
        cell: CellCoord,
    },
}

/// Eight-way movement directions available to occupants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Diagonal movement up and to the left.
    UpLeft,
    /// Diagonal movement up and to the right.
    UpRight,
    /// Diagonal movement down and to the left.
    DownLeft,
    /// Diagonal movement down and to the right.
    DownRight,
}

impl Direction {
    /// Every direction, cardinals first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Maps a keyboard key onto a direction.
    ///
    /// The alphabet is `k` up, `j` down, `h` left, `l` right, `y` up-left,
    /// `u` up-right, `b` down-left and `n` down-right. Any other key yields
    /// `None`; rejecting it is the caller's responsibility.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'k' => Some(Self::Up),
            'j' => Some(Self::Down),
            'h' => Some(Self::Left),
            'l' => Some(Self::Right),
            'y' => Some(Self::UpLeft),
            'u' => Some(Self::UpRight),
            'b' => Some(Self::DownLeft),
            'n' => Some(Self::DownRight),
            _ => None,
        }
    }

    /// Keyboard key bound to the direction.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Up => 'k',
            Self::Down => 'j',
            Self::Left => 'h',
            Self::Right => 'l',
            Self::UpLeft => 'y',
            Self::UpRight => 'u',
            Self::DownLeft => 'b',
            Self::DownRight => 'n',
        }
    }

    /// Column and row deltas applied by a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Dimensions of a rectangular grid and the linear address space they define.
///
/// All conversions between [`CellCoord`] values and linear slot indices go
/// through this type so callers never perform index arithmetic themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    columns: u32,
    rows: u32,
}

impl GridShape {
    /// Creates a new shape with the provided dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of slots in the linear address space.
    #[must_use]
    pub fn capacity(&self) -> usize {
        let capacity_u64 = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(capacity_u64).unwrap_or(0)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Linear index of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    /// Cell addressed by the linear index, or `None` past the last slot.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.capacity() {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Cell reached by stepping once from `cell` in `direction`.
    ///
    /// The step must land within `[0, columns - 1] × [0, rows - 1]`; a step
    /// off any edge, including diagonals crossing either axis, yields `None`.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }
        let last_column = self.columns.checked_sub(1)?;
        let last_row = self.rows.checked_sub(1)?;
        let (column_delta, row_delta) = direction.offset();
        let column = cell.column().checked_add_signed(column_delta)?;
        let row = cell.row().checked_add_signed(row_delta)?;
        if column > last_column || row > last_row {
            return None;
        }
        Some(CellCoord::new(column, row))
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }
}

/// Terrain glyphs recognised in map files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    /// Solid rock outside every room, drawn as a blank.
    Void,
    /// Open room floor.
    Floor,
    /// Solid wall block.
    Wall,
    /// Horizontal room boundary.
    HorizontalBoundary,
    /// Vertical room boundary.
    VerticalBoundary,
    /// Room corner.
    Corner,
    /// Marker for a cell holding a gold pile.
    Gold,
    /// Marker for a previously revealed gold spot.
    Found,
}

impl Glyph {
    /// Parses a map symbol, returning `None` for unrecognised characters.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(Self::Void),
            '.' => Some(Self::Floor),
            '#' => Some(Self::Wall),
            '-' => Some(Self::HorizontalBoundary),
            '|' => Some(Self::VerticalBoundary),
            '+' => Some(Self::Corner),
            '*' => Some(Self::Gold),
            '$' => Some(Self::Found),
            _ => None,
        }
    }

    /// Character drawn for the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Void => ' ',
            Self::Floor => '.',
            Self::Wall => '#',
            Self::HorizontalBoundary => '-',
            Self::VerticalBoundary => '|',
            Self::Corner => '+',
            Self::Gold => '*',
            Self::Found => '$',
        }
    }

    /// Reports whether an occupant may step onto the glyph.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Gold | Self::Found)
    }
}

/// Terrain capability consumed by the world.
///
/// The world reads and rewrites glyphs, moves gold in and out of cells, and
/// asks whether a cell is currently visible. How visibility is computed is
/// left to the implementor. `Clone` is the deep-copy capability used by
/// snapshots.
pub trait Cell: Clone {
    /// Builds a cell from a map symbol, or `None` if the symbol is unknown.
    fn from_symbol(symbol: char) -> Option<Self>;

    /// Current terrain glyph.
    fn glyph(&self) -> Glyph;

    /// Replaces the terrain glyph.
    fn set_glyph(&mut self, glyph: Glyph);

    /// Gold currently lying on the cell.
    fn gold(&self) -> u32;

    /// Adds gold to the cell.
    fn add_gold(&mut self, amount: u32);

    /// Removes and returns all gold on the cell.
    fn take_gold(&mut self) -> u32;

    /// Whether the cell is visible to the viewer this cell belongs to.
    fn is_visible(&self) -> bool;

    /// Whether a gold pile on this cell has not yet been discovered.
    fn hides_gold(&self) -> bool;
}

/// Occupant capability consumed by the world.
///
/// Occupants are identified by their glyph. `Clone` is the deep-copy
/// capability used by snapshots.
pub trait Occupant: Clone {
    /// Constructs a new occupant standing on `cell`.
    fn spawn(glyph: char, name: &str, handle: SessionHandle, cell: CellCoord) -> Self;

    /// Display glyph identifying the occupant.
    fn glyph(&self) -> char;

    /// Cell the occupant records as its position.
    fn cell(&self) -> CellCoord;

    /// Updates the recorded position.
    fn set_cell(&mut self, cell: CellCoord);

    /// Gold carried by the occupant.
    fn gold(&self) -> u32;

    /// Credits gold to the occupant.
    fn add_gold(&mut self, amount: u32);
}

/// Opaque session handle carried by occupants on behalf of the network layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(Option<SocketAddr>);

impl SessionHandle {
    /// Handle for an occupant with no remote peer.
    #[must_use]
    pub const fn detached() -> Self {
        Self(None)
    }

    /// Handle bound to the provided peer address.
    #[must_use]
    pub const fn from_addr(addr: SocketAddr) -> Self {
        Self(Some(addr))
    }

    /// Peer address, if the handle is bound to one.
    #[must_use]
    pub const fn addr(&self) -> Option<SocketAddr> {
        self.0
    }
}

/// Gold budget and pile bounds used when scattering gold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldConfig {
    total: u32,
    min_piles: u32,
    max_piles: u32,
}

impl GoldConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(total: u32, min_piles: u32, max_piles: u32) -> Self {
        Self {
            total,
            min_piles,
            max_piles,
        }
    }

    /// Total amount of gold to distribute.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Fewest piles the budget may be split into.
    #[must_use]
    pub const fn min_piles(&self) -> u32 {
        self.min_piles
    }

    /// Most piles the budget may be split into.
    #[must_use]
    pub const fn max_piles(&self) -> u32 {
        self.max_piles
    }
}

impl Default for GoldConfig {
    fn default() -> Self {
        Self::new(GOLD_TOTAL, GOLD_MIN_PILES, GOLD_MAX_PILES)
    }
}

/// Gold pile lying on a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoldPile {
    /// Cell holding the pile.
    pub cell: CellCoord,
    /// Amount of gold in the pile.
    pub amount: u32,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, Event, Glyph, GoldConfig, GridShape};

    #[test]
    fn direction_keys_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_key(direction.key()), Some(direction));
        }
        assert_eq!(Direction::from_key('x'), None);
        assert_eq!(Direction::from_key('K'), None);
    }

    #[test]
    fn index_is_row_major() {
        let shape = GridShape::new(5, 3);
        assert_eq!(shape.index(CellCoord::new(0, 0)), Some(0));
        assert_eq!(shape.index(CellCoord::new(4, 0)), Some(4));
        assert_eq!(shape.index(CellCoord::new(0, 1)), Some(5));
        assert_eq!(shape.index(CellCoord::new(4, 2)), Some(14));
        assert_eq!(shape.index(CellCoord::new(5, 0)), None);
        assert_eq!(shape.index(CellCoord::new(0, 3)), None);
    }

    #[test]
    fn cell_at_inverts_index() {
        let shape = GridShape::new(7, 4);
        for (index, cell) in shape.cells().enumerate() {
            assert_eq!(shape.cell_at(index), Some(cell));
            assert_eq!(shape.index(cell), Some(index));
        }
        assert_eq!(shape.cell_at(shape.capacity()), None);
    }

    #[test]
    fn neighbor_rejects_every_edge() {
        let shape = GridShape::new(3, 3);
        let top_left = CellCoord::new(0, 0);
        let bottom_right = CellCoord::new(2, 2);

        for direction in [Direction::Up, Direction::Left, Direction::UpLeft, Direction::UpRight, Direction::DownLeft] {
            assert_eq!(shape.neighbor(top_left, direction), None, "{direction:?}");
        }
        for direction in [
            Direction::Down,
            Direction::Right,
            Direction::DownRight,
            Direction::DownLeft,
            Direction::UpRight,
        ] {
            assert_eq!(shape.neighbor(bottom_right, direction), None, "{direction:?}");
        }

        assert_eq!(shape.neighbor(top_left, Direction::DownRight), Some(CellCoord::new(1, 1)));
        assert_eq!(shape.neighbor(bottom_right, Direction::UpLeft), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn neighbor_rejects_cells_outside_grid() {
        let shape = GridShape::new(2, 2);
        assert_eq!(shape.neighbor(CellCoord::new(2, 0), Direction::Left), None);
    }

    #[test]
    fn glyph_symbols_round_trip() {
        for symbol in [' ', '.', '#', '-', '|', '+', '*', '$'] {
            let glyph = Glyph::from_symbol(symbol).expect("known symbol");
            assert_eq!(glyph.symbol(), symbol);
        }
        assert_eq!(Glyph::from_symbol('x'), None);
    }

    #[test]
    fn only_floor_gold_and_found_are_walkable() {
        assert!(Glyph::Floor.is_walkable());
        assert!(Glyph::Gold.is_walkable());
        assert!(Glyph::Found.is_walkable());
        assert!(!Glyph::Wall.is_walkable());
        assert!(!Glyph::Void.is_walkable());
        assert!(!Glyph::Corner.is_walkable());
    }

    #[test]
    fn gold_config_defaults_match_standard_game() {
        let config = GoldConfig::default();
        assert_eq!(config.total(), 250);
        assert_eq!(config.min_piles(), 10);
        assert_eq!(config.max_piles(), 30);
    }

    #[test]
    fn event_round_trips_through_bincode() {
        let event = Event::OccupantsSwapped {
            mover: 'A',
            displaced: 'B',
            from: CellCoord::new(1, 2),
            to: CellCoord::new(2, 2),
        };
        let bytes = bincode::serialize(&event).expect("serialize");
        let restored: Event = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, event);
    }
}
