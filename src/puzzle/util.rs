use std::fmt;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

/// One king-move step on the grid. Rows grow downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    SouthEast,
    SouthWest,
    NorthEast,
    NorthWest,
    South,
    North,
    East,
    West,
}

impl Direction {
    /// All eight directions in the order neighbours are visited
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 8] = [
            Direction::SouthEast,
            Direction::SouthWest,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::South,
            Direction::North,
            Direction::East,
            Direction::West,
        ];
        DIRS.iter()
    }

    /// Row and column offset of a single step
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::SouthEast => (1, 1),
            Self::SouthWest => (1, -1),
            Self::NorthEast => (-1, 1),
            Self::NorthWest => (-1, -1),
            Self::South => (1, 0),
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the cell one step away in the given direction. Only the lower
    /// bound is checked here, the grid checks the upper one
    pub fn step(&self, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Cell { row, col })
    }

    /// True if the two cells are distinct and one king move apart
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
