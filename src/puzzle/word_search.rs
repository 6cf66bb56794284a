use std::collections::BTreeMap;
use std::rc::Rc;

use fst::Automaton;
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::util::Cell;
use super::vocab::Vocabulary;

/*
    Automaton that walks the letter grid while the FST walks the vocabulary.

    Every byte the FST offers is matched against the letters reachable from the
    end of each path we are still following. Once no path survives the state is
    dead and the FST stops descending, so only prefixes of real words are ever
    explored from a starting cell.
*/

/// Persistent list of visited cells, newest first. Paths that share a prefix
/// share its tail.
#[derive(Debug, Clone, PartialEq)]
pub enum CellPath {
    Empty,
    Elem(Cell, Rc<CellPath>),
}

impl CellPath {
    fn head(&self) -> Option<Cell> {
        match self {
            Self::Empty => None,
            Self::Elem(cell, _) => Some(*cell),
        }
    }

    fn contains(&self, cell: Cell) -> bool {
        let mut node = self;
        while let Self::Elem(c, next) = node {
            if *c == cell {
                return true;
            }
            node = next.as_ref();
        }
        false
    }

    /// The path from the first visited cell to the last
    fn to_vec(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut node = self;
        while let Self::Elem(c, next) = node {
            cells.push(*c);
            node = next.as_ref();
        }
        cells.reverse();
        cells
    }
}

#[derive(Debug, Clone)]
pub struct Trace {
    /// Cells whose letters have been fully consumed
    path: CellPath,
    /// Number of cells on the path
    len: usize,
    /// Cell whose letter is being matched and how many of its UTF-8 bytes
    /// have been seen so far
    partial: Option<(Cell, usize)>,
}

impl Trace {
    fn root() -> Self {
        Self {
            path: CellPath::Empty,
            len: 0,
            partial: None,
        }
    }

    fn is_complete(&self, min_length: usize) -> bool {
        self.partial.is_none() && self.len > 0 && self.len >= min_length
    }

    /// Tries to match `byte` against the next unread byte of `cell`'s letter
    fn feed(&self, grid: &Grid, cell: Cell, matched: usize, byte: u8, out: &mut Vec<Trace>) {
        let mut buf = [0u8; 4];
        let letter = grid.letter_at(cell).encode_utf8(&mut buf).as_bytes();
        if letter[matched] != byte {
            return;
        }
        if matched + 1 == letter.len() {
            out.push(Trace {
                path: CellPath::Elem(cell, Rc::new(self.path.clone())),
                len: self.len + 1,
                partial: None,
            });
        } else {
            out.push(Trace {
                path: self.path.clone(),
                len: self.len,
                partial: Some((cell, matched + 1)),
            });
        }
    }
}

/// Searches the vocabulary for every word spelled by a simple path of
/// adjacent cells beginning at `start`
#[derive(Debug, Clone)]
pub struct PathSearcher<'a> {
    pub grid: &'a Grid,
    pub start: Cell,
    /// Minimum length for anything to be considered a word
    pub min_length: usize,
}

impl<'a> Automaton for PathSearcher<'a> {
    /// Every path still alive, in the order a depth first walk would reach them
    type State = Vec<Trace>;

    fn start(&self) -> Self::State {
        vec![Trace::root()]
    }

    fn is_match(&self, state: &Self::State) -> bool {
        state.iter().any(|t| t.is_complete(self.min_length))
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        let mut next = Vec::new();
        for t in state.iter() {
            match t.partial {
                Some((cell, matched)) => t.feed(self.grid, cell, matched, byte, &mut next),
                None => match t.path.head() {
                    None => t.feed(self.grid, self.start, 0, byte, &mut next),
                    Some(head) => {
                        for (cell, _) in self.grid.neighbors(head) {
                            if !t.path.contains(cell) {
                                t.feed(self.grid, cell, 0, byte, &mut next);
                            }
                        }
                    }
                },
            }
        }
        next
    }

    fn can_match(&self, state: &Self::State) -> bool {
        !state.is_empty()
    }
}

/// A vocabulary word together with the cells that spell it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordPath {
    pub word: String,
    pub path: Vec<Cell>,
}

impl WordPath {
    /// True if the path stays on the grid, never revisits a cell, only takes
    /// king-move steps and spells the word
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        if self.path.is_empty() || self.path.len() != self.word.chars().count() {
            return false;
        }
        for (i, cell) in self.path.iter().enumerate() {
            if !grid.contains(*cell) || self.path[i + 1..].contains(cell) {
                return false;
            }
        }
        if !self.path.windows(2).all(|p| p[0].is_adjacent(&p[1])) {
            return false;
        }
        self.path
            .iter()
            .map(|c| grid.letter_at(*c))
            .eq(self.word.chars())
    }
}

/// Finds every word reachable from a single starting cell. When a word can be
/// spelled along several paths the one a depth first walk reaches last is kept.
pub fn search_from(grid: &Grid, vocab: &Vocabulary, start: Cell, min_length: usize) -> Vec<WordPath> {
    let searcher = PathSearcher {
        grid,
        start,
        min_length,
    };
    let found = vocab
        .search(searcher)
        .into_iter()
        .filter_map(|(word, traces)| {
            traces
                .iter()
                .rev()
                .find(|t| t.is_complete(min_length))
                .map(|t| WordPath {
                    word,
                    path: t.path.to_vec(),
                })
        })
        .collect::<Vec<_>>();
    trace!("{} words start at {}", found.len(), start);
    found
}

/// Finds all words on the grid, one parallel task per starting cell. Results
/// are merged in row-major order of the starting cell so a word found from
/// several cells keeps the path from the last of them.
pub fn find_words(grid: &Grid, vocab: &Vocabulary, min_length: usize) -> BTreeMap<String, Vec<Cell>> {
    let per_start = grid
        .cells()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|start| search_from(grid, vocab, start, min_length))
        .collect::<Vec<_>>();
    merge(per_start)
}

/// Same as [`find_words`] but on the calling thread
pub fn find_words_sequential(
    grid: &Grid,
    vocab: &Vocabulary,
    min_length: usize,
) -> BTreeMap<String, Vec<Cell>> {
    let per_start = grid
        .cells()
        .map(|start| search_from(grid, vocab, start, min_length))
        .collect::<Vec<_>>();
    merge(per_start)
}

fn merge(per_start: Vec<Vec<WordPath>>) -> BTreeMap<String, Vec<Cell>> {
    let mut words = BTreeMap::new();
    for wp in per_start.into_iter().flatten() {
        words.insert(wp.word, wp.path);
    }
    debug!("Found {} distinct words", words.len());
    words
}
