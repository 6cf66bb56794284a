use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::error::{PuzzleError, Result};
use super::util::{Cell, Direction};

/// Rectangular letter grid. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Letters stored row by row
    state: Vec<Vec<char>>,
    ncol: usize,
    nrow: usize,
}

impl Grid {
    /// Builds the grid from a flat, row-major letter sequence
    pub fn new(letters: Vec<char>, ncol: usize, nrow: usize) -> Result<Self> {
        if ncol == 0 || nrow == 0 || letters.len() != ncol * nrow {
            return Err(PuzzleError::InvalidDimensions {
                letters: letters.len(),
                ncol,
                nrow,
            });
        }
        let state = letters.chunks(ncol).map(|row| row.to_vec()).collect();
        Ok(Self { state, ncol, nrow })
    }

    /// Builds the grid from rows of single letter strings. Every row must
    /// have the same length.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self> {
        let nrow = rows.len();
        let ncol = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != ncol) {
            return Err(PuzzleError::InvalidDimensions {
                letters: rows.iter().map(|r| r.len()).sum(),
                ncol,
                nrow,
            });
        }
        let mut letters = Vec::with_capacity(nrow * ncol);
        for row in rows {
            for cell in row {
                let cell = cell.as_ref();
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => letters.push(c),
                    _ => return Err(PuzzleError::InvalidLetter(cell.to_string())),
                }
            }
        }
        Self::new(letters, ncol, nrow)
    }

    /// Reads a grid stored as a JSON array of rows, e.g. `[["K","O"],["T","I"]]`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let raw_grid: Vec<Vec<String>> = serde_json::from_reader(BufReader::new(file))?;
        Self::from_rows(&raw_grid)
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.ncol * self.nrow
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.nrow && cell.col < self.ncol
    }

    pub fn letter_at(&self, cell: Cell) -> char {
        self.state[cell.row][cell.col]
    }

    /// Converts the row/col to a dense row-major index
    pub fn index_of(&self, cell: Cell) -> usize {
        cell.row * self.ncol + cell.col
    }

    /// Every cell of the grid in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.nrow).flat_map(move |row| (0..self.ncol).map(move |col| Cell { row, col }))
    }

    /// The letters in row-major order
    pub fn letters(&self) -> String {
        self.state.iter().flatten().collect()
    }

    /// Returns the cells one king move away along with their letters
    pub fn neighbors(&self, cell: Cell) -> Vec<(Cell, char)> {
        Direction::iter()
            .filter_map(|d| cell.step(*d))
            .filter(|c| self.contains(*c))
            .map(|c| (c, self[c]))
            .collect()
    }
}

impl std::ops::Index<Cell> for Grid {
    type Output = char;

    fn index(&self, index: Cell) -> &Self::Output {
        &self.state[index.row][index.col]
    }
}
