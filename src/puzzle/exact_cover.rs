use std::collections::{BTreeMap, BTreeSet};

use log::debug;

/// Exact cover problem over dense column ids. Each row lists the columns it
/// covers; a solution picks rows so that every column is covered exactly once.
///
/// Solved with Knuth's Algorithm X. Columns map to the set of rows still able
/// to cover them, and selecting a row removes every conflicting row from
/// those sets. The removed sets are kept as undo records and put back in
/// reverse order when the row is deselected.
#[derive(Debug, Clone)]
pub struct ExactCover {
    /// Columns covered by each row
    rows: Vec<Vec<usize>>,
    /// Rows that can still cover each uncovered column
    columns: BTreeMap<usize, BTreeSet<usize>>,
}

impl ExactCover {
    pub fn new(rows: Vec<Vec<usize>>, n_columns: usize) -> Self {
        let mut columns = (0..n_columns)
            .map(|c| (c, BTreeSet::new()))
            .collect::<BTreeMap<_, _>>();
        for (r, cols) in rows.iter().enumerate() {
            for c in cols.iter() {
                if let Some(set) = columns.get_mut(c) {
                    set.insert(r);
                }
            }
        }
        debug!(
            "Exact cover with {} rows and {} columns",
            rows.len(),
            columns.len()
        );
        Self { rows, columns }
    }

    /// Lazily enumerates every solution. Each solution lists row indices in
    /// the order they were selected.
    pub fn solutions(self) -> Solutions {
        Solutions {
            problem: self,
            stack: Vec::new(),
            solution: Vec::new(),
            status: Status::Fresh,
            explored: 0,
        }
    }

    /// Covers `row`: removes each of its columns and takes every row that
    /// clashes with it out of the remaining columns
    fn select(&mut self, row: usize) -> Undo {
        let mut removed = Vec::with_capacity(self.rows[row].len());
        for &j in self.rows[row].iter() {
            let Some(clashing) = self.columns.remove(&j) else {
                continue;
            };
            for &i in clashing.iter() {
                for &k in self.rows[i].iter() {
                    if k != j {
                        if let Some(col) = self.columns.get_mut(&k) {
                            col.remove(&i);
                        }
                    }
                }
            }
            removed.push((j, clashing));
        }
        Undo { removed }
    }

    /// Exact inverse of [`select`](Self::select)
    fn deselect(&mut self, undo: Undo) {
        for (j, clashing) in undo.removed.into_iter().rev() {
            for &i in clashing.iter() {
                for &k in self.rows[i].iter() {
                    if k != j {
                        if let Some(col) = self.columns.get_mut(&k) {
                            col.insert(i);
                        }
                    }
                }
            }
            self.columns.insert(j, clashing);
        }
    }

    /// Column with the fewest candidate rows. Ties go to the smallest column.
    fn choose_column(&self) -> Option<usize> {
        self.columns
            .iter()
            .min_by_key(|(_, rows)| rows.len())
            .map(|(&c, _)| c)
    }
}

/// Everything taken out of the incidence structure by one selection
#[derive(Debug)]
struct Undo {
    /// Column id and the rows it held, in removal order
    removed: Vec<(usize, BTreeSet<usize>)>,
}

/// One level of the search: the column being covered, the rows that can cover
/// it, and the selection currently applied at this level
#[derive(Debug)]
struct Frame {
    candidates: Vec<usize>,
    next: usize,
    applied: Option<Undo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Fresh,
    Running,
    Done,
}

/// Pull based iterator over the solutions of an [`ExactCover`]. Nothing is
/// searched until the next solution is requested.
#[derive(Debug)]
pub struct Solutions {
    problem: ExactCover,
    stack: Vec<Frame>,
    solution: Vec<usize>,
    status: Status,
    explored: usize,
}

impl Solutions {
    /// Number of rows selected so far
    pub fn explored(&self) -> usize {
        self.explored
    }

    fn push_frame(&mut self) {
        let candidates = match self.problem.choose_column() {
            Some(c) => self.problem.columns[&c].iter().copied().collect(),
            None => Vec::new(),
        };
        self.stack.push(Frame {
            candidates,
            next: 0,
            applied: None,
        });
    }
}

impl Iterator for Solutions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.status {
            Status::Done => return None,
            Status::Fresh => {
                self.status = Status::Running;
                if self.problem.columns.is_empty() {
                    self.status = Status::Done;
                    return Some(Vec::new());
                }
                self.push_frame();
            }
            Status::Running => {}
        }

        loop {
            let depth = match self.stack.len() {
                0 => {
                    self.status = Status::Done;
                    return None;
                }
                n => n - 1,
            };

            // Undo whatever this level selected before trying its next row
            if let Some(undo) = self.stack[depth].applied.take() {
                self.problem.deselect(undo);
                self.solution.pop();
            }

            let frame = &mut self.stack[depth];
            if frame.next >= frame.candidates.len() {
                self.stack.pop();
                continue;
            }
            let row = frame.candidates[frame.next];
            frame.next += 1;

            let undo = self.problem.select(row);
            self.stack[depth].applied = Some(undo);
            self.solution.push(row);
            self.explored += 1;

            if self.problem.columns.is_empty() {
                return Some(self.solution.clone());
            }
            self.push_frame();
        }
    }
}
