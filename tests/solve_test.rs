use std::collections::BTreeSet;

use sanalouhos::puzzle::ExactCover;
use sanalouhos::{Cell, Grid, Puzzle, PuzzleError, Vocabulary};

/// Every string spelled by a simple path of `len` adjacent cells
fn all_path_words(grid: &Grid, len: usize) -> BTreeSet<String> {
    fn walk(grid: &Grid, path: &mut Vec<Cell>, len: usize, out: &mut BTreeSet<String>) {
        if path.len() == len {
            out.insert(path.iter().map(|c| grid.letter_at(*c)).collect());
            return;
        }
        let head = *path.last().unwrap();
        for (cell, _) in grid.neighbors(head) {
            if !path.contains(&cell) {
                path.push(cell);
                walk(grid, path, len, out);
                path.pop();
            }
        }
    }

    let mut out = BTreeSet::new();
    for start in grid.cells() {
        walk(grid, &mut vec![start], len, &mut out);
    }
    out
}

fn abc_puzzle() -> Puzzle {
    let grid = Grid::new("ABCDEFGHI".chars().collect(), 3, 3).unwrap();
    let words = all_path_words(&grid, 3);
    let vocab = Vocabulary::from_words(words.iter()).unwrap();
    Puzzle::with_grid(grid, vocab)
}

#[test]
fn every_solution_is_a_partition() {
    let puzzle = abc_puzzle();
    let mut count = 0;
    for solution in puzzle.solve() {
        assert_eq!(solution.len(), 3);
        assert!(solution.is_partition_of(puzzle.grid()), "{}", solution);
        count += 1;
    }
    assert!(count > 1);
}

#[test]
fn solutions_are_unique_and_deterministic() {
    let collect = || {
        abc_puzzle()
            .solve()
            .map(|s| s.words().map(String::from).collect::<BTreeSet<_>>())
            .collect::<Vec<_>>()
    };
    let first = collect();
    let second = collect();
    assert_eq!(first, second);

    let unique = first.iter().cloned().collect::<BTreeSet<_>>();
    assert_eq!(unique.len(), first.len());
}

#[test]
fn first_solution_does_not_search_everything() {
    let puzzle = abc_puzzle();
    let rows = || {
        puzzle
            .find_words()
            .iter()
            .map(|wp| wp.path.iter().map(|c| puzzle.grid().index_of(*c)).collect())
            .collect::<Vec<Vec<usize>>>()
    };

    let mut lazy = ExactCover::new(rows(), 9).solutions();
    assert!(lazy.next().is_some());
    let after_first = lazy.explored();

    let mut full = ExactCover::new(rows(), 9).solutions();
    let total = full.by_ref().count();
    assert!(total > 1);
    assert!(after_first < full.explored());
}

#[test]
fn dog_has_exactly_one_solution() {
    let vocab = Vocabulary::from_words(["DOG"]).unwrap();
    let puzzle = Puzzle::new(vec!['D', 'O', 'G'], vocab, 3, 1).unwrap();
    let solutions = puzzle.solve().collect::<Vec<_>>();
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].paths()[0].path,
        vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]
    );
}

#[test]
fn unsatisfiable_grid_yields_nothing() {
    // Only two-letter pieces exist but a 1x3 grid needs an odd cover
    let vocab = Vocabulary::from_words(["DO", "OG"]).unwrap();
    let puzzle = Puzzle::new(vec!['D', 'O', 'G'], vocab, 3, 1)
        .unwrap()
        .with_min_length(2);
    assert_eq!(puzzle.solve().count(), 0);
}

#[test]
fn letter_count_must_match_dimensions() {
    let vocab = Vocabulary::from_words(["DOG"]).unwrap();
    let result = Puzzle::new(vec!['D', 'O', 'G'], vocab, 2, 2);
    assert!(matches!(
        result,
        Err(PuzzleError::InvalidDimensions {
            letters: 3,
            ncol: 2,
            nrow: 2
        })
    ));
}

#[test]
fn grid_from_json_file() {
    let path = std::env::temp_dir().join("sanalouhos_grid_test.json");
    std::fs::write(&path, r#"[["D","O","G"]]"#).unwrap();
    let grid = Grid::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let vocab = Vocabulary::from_words(["DOG", "GOD"]).unwrap();
    let puzzle = Puzzle::with_grid(grid, vocab);
    let mut words = puzzle
        .solve()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    words.sort();
    assert_eq!(words, vec!["DOG", "GOD"]);
}
