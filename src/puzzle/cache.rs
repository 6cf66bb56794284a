use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::word_search::WordPath;
use super::Puzzle;
use crate::utils::serialization;

/// Word paths found for one grid, saved so repeated solves of the same grid
/// can skip word discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCache {
    letters: String,
    ncol: usize,
    nrow: usize,
    min_length: usize,
    /// Size and fingerprint of the vocabulary the words came from
    vocab_len: usize,
    vocab_fingerprint: u64,
    words: Vec<WordPath>,
}

impl CandidateCache {
    pub fn build(puzzle: &Puzzle) -> Self {
        Self {
            letters: puzzle.grid().letters(),
            ncol: puzzle.grid().ncol(),
            nrow: puzzle.grid().nrow(),
            min_length: puzzle.min_length(),
            vocab_len: puzzle.vocab().len(),
            vocab_fingerprint: puzzle.vocab().fingerprint(),
            words: puzzle.find_words(),
        }
    }

    /// True if the cache was built for the same grid, vocabulary and settings
    pub fn matches(&self, puzzle: &Puzzle) -> bool {
        let grid = puzzle.grid();
        let vocab = puzzle.vocab();
        self.letters == grid.letters()
            && self.ncol == grid.ncol()
            && self.nrow == grid.nrow()
            && self.min_length == puzzle.min_length()
            && self.vocab_len == vocab.len()
            && self.vocab_fingerprint == vocab.fingerprint()
    }

    pub fn words(&self) -> &[WordPath] {
        &self.words
    }

    pub fn into_words(self) -> Vec<WordPath> {
        self.words
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        serialization::save_to_disk(self, path)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(serialization::load_from_disk(path)?)
    }

    /// Loads the cache at `path` if it belongs to this puzzle, otherwise
    /// rebuilds it and overwrites the file
    pub fn load_or_build<P: AsRef<Path>>(path: P, puzzle: &Puzzle) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            match Self::load(path) {
                Ok(cache) if cache.matches(puzzle) => {
                    info!("Loaded {} candidate words from {}", cache.words.len(), path.display());
                    return Ok(cache);
                }
                Ok(_) => debug!("Candidate cache {} is for another grid", path.display()),
                Err(e) => debug!("Ignoring unreadable candidate cache {}: {}", path.display(), e),
            }
        }
        let cache = Self::build(puzzle);
        cache.save(path)?;
        info!("Saved {} candidate words to {}", cache.words.len(), path.display());
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Vocabulary;

    fn puzzle_with(letters: &str, words: &[&str]) -> Puzzle {
        let vocab = Vocabulary::from_words(words.iter()).unwrap();
        Puzzle::new(letters.chars().collect(), vocab, 3, 2).unwrap()
    }

    fn puzzle(letters: &str) -> Puzzle {
        puzzle_with(letters, &["KOI", "SUU", "KUU"])
    }

    #[test]
    fn test_cache_reuse_and_invalidation() {
        let path = std::env::temp_dir().join("sanalouhos_cache_test.bin");
        let _ = std::fs::remove_file(&path);

        let first = puzzle("KOISUU");
        let built = CandidateCache::load_or_build(&path, &first).unwrap();
        assert_eq!(built.words().len(), 3);

        let reloaded = CandidateCache::load_or_build(&path, &first).unwrap();
        assert_eq!(reloaded, built);

        // Different letters invalidate the cache
        let second = puzzle("SUUKOI");
        let rebuilt = CandidateCache::load_or_build(&path, &second).unwrap();
        assert!(rebuilt.matches(&second));
        assert!(!rebuilt.matches(&first));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_vocabulary_change_invalidates() {
        let path = std::env::temp_dir().join("sanalouhos_cache_vocab_test.bin");
        let _ = std::fs::remove_file(&path);

        let old = puzzle_with("KOISUU", &["KOI", "SUU"]);
        let built = CandidateCache::load_or_build(&path, &old).unwrap();
        assert_eq!(built.words().len(), 2);

        // Same grid and word count, different words
        let new = puzzle_with("KOISUU", &["IOK", "UUS"]);
        assert!(!built.matches(&new));
        let rebuilt = CandidateCache::load_or_build(&path, &new).unwrap();
        assert!(rebuilt.matches(&new));
        let mut words = rebuilt.words().iter().map(|wp| wp.word.as_str()).collect::<Vec<_>>();
        words.sort_unstable();
        assert_eq!(words, vec!["IOK", "UUS"]);

        // The stale words never reach the solver
        let solutions = new.solve_with(built.into_words()).count();
        assert_eq!(solutions, 0);
        assert_eq!(new.solve_with(rebuilt.into_words()).count(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_cached_words_solve() {
        let p = puzzle("KOISUU");
        let cache = CandidateCache::build(&p);
        let solutions = p.solve_with(cache.into_words()).collect::<Vec<_>>();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_partition_of(p.grid()));
    }
}
