// Word partition puzzles: cover a letter grid with dictionary words
pub mod cache;
pub mod error;
pub mod exact_cover;
pub mod grid;
pub mod util;
pub mod vocab;
pub mod word_search;

use std::fmt;

use log::debug;

pub use self::cache::CandidateCache;
pub use self::error::{PuzzleError, Result};
pub use self::exact_cover::ExactCover;
pub use self::grid::Grid;
pub use self::util::{Cell, Direction};
pub use self::vocab::Vocabulary;
pub use self::word_search::WordPath;

/// Words shorter than this are never recorded
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A set of word paths that together cover every grid cell exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    words: Vec<WordPath>,
}

impl Solution {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.word.as_str())
    }

    pub fn paths(&self) -> &[WordPath] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Checks that the paths are disjoint and together cover the whole grid
    pub fn is_partition_of(&self, grid: &Grid) -> bool {
        let mut covered = vec![false; grid.len()];
        for cell in self.words.iter().flat_map(|w| w.path.iter()) {
            if !grid.contains(*cell) {
                return false;
            }
            let idx = grid.index_of(*cell);
            if covered[idx] {
                return false;
            }
            covered[idx] = true;
        }
        covered.into_iter().all(|c| c)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let words = self.words().collect::<Vec<_>>();
        write!(f, "{}", words.join(" "))
    }
}

/// One solving session: a grid, the vocabulary and the search settings
#[derive(Debug)]
pub struct Puzzle {
    grid: Grid,
    vocab: Vocabulary,
    min_length: usize,
    parallel: bool,
}

impl Puzzle {
    /// Builds the grid from a flat letter sequence. Fails if the number of
    /// letters does not match the dimensions.
    pub fn new(letters: Vec<char>, vocab: Vocabulary, ncol: usize, nrow: usize) -> Result<Self> {
        let grid = Grid::new(letters, ncol, nrow)?;
        Ok(Self::with_grid(grid, vocab))
    }

    pub fn with_grid(grid: Grid, vocab: Vocabulary) -> Self {
        Self {
            grid,
            vocab,
            min_length: DEFAULT_MIN_LENGTH,
            parallel: true,
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Runs word discovery on the calling thread only
    pub fn sequential(mut self, sequential: bool) -> Self {
        self.parallel = !sequential;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Every vocabulary word on the grid with the path that spells it, sorted by word
    pub fn find_words(&self) -> Vec<WordPath> {
        let words = if self.parallel {
            word_search::find_words(&self.grid, &self.vocab, self.min_length)
        } else {
            word_search::find_words_sequential(&self.grid, &self.vocab, self.min_length)
        };
        words
            .into_iter()
            .map(|(word, path)| WordPath { word, path })
            .collect()
    }

    /// Lazily yields every way of partitioning the grid into words
    pub fn solve(&self) -> impl Iterator<Item = Solution> + '_ {
        self.solve_with(self.find_words())
    }

    /// Same as [`solve`](Self::solve) but over an already computed list of word paths.
    /// Candidates that are not vocabulary words traced on this grid are skipped.
    pub fn solve_with(&self, candidates: Vec<WordPath>) -> impl Iterator<Item = Solution> + '_ {
        let candidates = candidates
            .into_iter()
            .filter(|wp| {
                let valid = wp.is_valid_on(&self.grid) && self.vocab.contains(&wp.word);
                if !valid {
                    debug!("Skipping candidate {} {:?}", wp.word, wp.path);
                }
                valid
            })
            .collect::<Vec<_>>();
        let rows = candidates
            .iter()
            .map(|wp| {
                wp.path
                    .iter()
                    .map(|c| self.grid.index_of(*c))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        debug!("Solving over {} candidate words", candidates.len());

        ExactCover::new(rows, self.grid.len())
            .solutions()
            .map(move |rows| Solution {
                words: rows.into_iter().map(|r| candidates[r].clone()).collect(),
            })
    }
}
