//! # Grid Module
//!
//! Board representation: coordinates, directions, cells and the board itself.
//!
//! Coordinates are `(row, col)`, zero-based, with row 0 at the top. They are
//! signed so that geometric offsets can step off the board and be rejected by
//! a bounds check instead of underflowing.

pub mod board;
pub mod cell;

pub use board::*;
pub use cell::*;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// # Examples
///
/// ```
/// use tilecrush::Position;
///
/// let pos = Position::new(3, 4);
/// assert_eq!(pos.row, 3);
/// assert_eq!(pos.col, 4);
/// assert!(pos.is_orthogonally_adjacent(Position::new(3, 5)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by a `(row, col)` offset.
    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Calculates the Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        (self.row - other.row).unsigned_abs() + (self.col - other.col).unsigned_abs()
    }

    /// True when the two positions share an edge.
    pub fn is_orthogonally_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the 4 orthogonal neighbours (north, west, east, south).
    pub fn cardinal_neighbors(self) -> [Position; 4] {
        [
            self.offset(Direction::North.to_delta()),
            self.offset(Direction::West.to_delta()),
            self.offset(Direction::East.to_delta()),
            self.offset(Direction::South.to_delta()),
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.row + other.row, self.col + other.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 8 directions around a cell.
///
/// Only the 4 cardinal directions are valid swap directions; the diagonals
/// exist for radius effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a `(row, col)` delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::Direction;
    ///
    /// assert_eq!(Direction::North.to_delta(), (-1, 0));
    /// assert_eq!(Direction::Southeast.to_delta(), (1, 1));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::Northeast => (-1, 1),
            Direction::Northwest => (-1, -1),
            Direction::Southeast => (1, 1),
            Direction::Southwest => (1, -1),
        }
    }

    /// Converts a delta back to a direction, if it is one of the 8.
    pub fn from_delta(delta: (i32, i32)) -> Option<Direction> {
        match delta {
            (-1, 0) => Some(Direction::North),
            (1, 0) => Some(Direction::South),
            (0, 1) => Some(Direction::East),
            (0, -1) => Some(Direction::West),
            (-1, 1) => Some(Direction::Northeast),
            (-1, -1) => Some(Direction::Northwest),
            (1, 1) => Some(Direction::Southeast),
            (1, -1) => Some(Direction::Southwest),
            _ => None,
        }
    }

    /// Whether this direction is one of the 4 swap directions.
    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    /// Returns all 8 directions.
    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ]
    }

    /// Returns only the 4 cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}
