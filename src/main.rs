use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
#[macro_use]
extern crate text_io;

use sanalouhos::{CandidateCache, Grid, Puzzle, Solution, Vocabulary, DEFAULT_MIN_LENGTH};

#[derive(Parser, Debug)]
#[command(name = "sanalouhos")]
#[command(about = "Split a letter grid into dictionary words that use every cell once")]
struct Args {
    /// Grid letters in row-major order. Read from stdin when omitted
    #[arg(long)]
    letters: Option<String>,

    #[arg(long, default_value_t = 5)]
    ncol: usize,

    #[arg(long, default_value_t = 6)]
    nrow: usize,

    /// JSON grid file, an array of rows of single letters. Overrides the letters and dimensions
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Newline delimited word list
    #[arg(long, default_value = "kotus2024.txt")]
    words: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Stop after this many solutions
    #[arg(long)]
    limit: Option<usize>,

    /// Print the cells of each word
    #[arg(long)]
    paths: bool,

    /// Find words on a single thread
    #[arg(long)]
    sequential: bool,

    /// File used to cache the words found on the grid
    #[arg(long)]
    candidates: Option<PathBuf>,
}

fn read_grid(args: &Args) -> Result<Grid> {
    if let Some(path) = &args.grid {
        return Grid::from_file(path).with_context(|| format!("reading grid {}", path.display()));
    }
    let letters = match &args.letters {
        Some(l) => l.clone(),
        None => {
            println!("Enter Letters:");
            let line: String = read!("{}\n");
            line
        }
    };
    let letters = letters.trim().chars().collect::<Vec<_>>();
    Ok(Grid::new(letters, args.ncol, args.nrow)?)
}

fn format_solution(solution: &Solution, with_paths: bool) -> String {
    if !with_paths {
        return solution.to_string();
    }
    solution
        .paths()
        .iter()
        .map(|wp| {
            let cells = wp.path.iter().map(|c| c.to_string()).collect::<String>();
            format!("{}:{}", wp.word, cells)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let grid = read_grid(&args)?;
    let vocab = Vocabulary::from_file(&args.words)
        .with_context(|| format!("reading word list {}", args.words.display()))?;
    info!("Number of Words: {}", vocab.len());

    let start_time = Instant::now();
    let puzzle = Puzzle::with_grid(grid, vocab)
        .with_min_length(args.min_length)
        .sequential(args.sequential);

    let candidates = match &args.candidates {
        Some(path) => CandidateCache::load_or_build(path, &puzzle)
            .with_context(|| format!("candidate cache {}", path.display()))?
            .into_words(),
        None => puzzle.find_words(),
    };
    info!("Words on the grid: {}", candidates.len());

    let solutions = puzzle.solve_with(candidates);
    let mut found = 0;
    for solution in solutions.take(args.limit.unwrap_or(usize::MAX)) {
        println!("{}", format_solution(&solution, args.paths));
        found += 1;
    }

    info!("Solutions: {}", found);
    println!(
        "Elapsed time: {:.2} seconds.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
