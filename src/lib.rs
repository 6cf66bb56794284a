//! Solver for word partition puzzles: find every way to split a letter grid
//! into dictionary words traced along adjacent cells, using every cell once.

pub mod puzzle;
pub mod utils;

pub use puzzle::{
    CandidateCache, Cell, Grid, Puzzle, PuzzleError, Solution, Vocabulary, WordPath,
    DEFAULT_MIN_LENGTH,
};
