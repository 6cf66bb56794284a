use std::collections::BTreeSet;
use std::fs::File;
use std::hash::Hasher;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fst::{Automaton, IntoStreamer, Set, Streamer};
use rustc_hash::FxHasher;

use super::error::Result;

/// Read-only word list backed by an FST so prefix queries stay cheap
pub struct Vocabulary {
    set: Set<Vec<u8>>,
}

impl Vocabulary {
    /// Builds the vocabulary from any collection of words. Duplicates are dropped.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // fst needs its keys sorted and unique
        let sorted = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .collect::<BTreeSet<_>>();
        let set = Set::from_iter(sorted)?;
        Ok(Self { set })
    }

    /// Reads a newline delimited word list. Words are kept exactly as written.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            words.push(line.trim_end_matches('\r').to_string());
        }
        Self::from_words(words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Hash of the encoded word set. Equal vocabularies always agree.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write(self.set.as_fst().as_bytes());
        hasher.finish()
    }

    /// Runs the automaton over the vocabulary and collects every accepted word
    /// along with the state it was accepted in
    pub fn search<A>(&self, automaton: A) -> Vec<(String, A::State)>
    where
        A: Automaton,
        A::State: Clone,
    {
        let mut matches = self.set.search_with_state(automaton).into_stream();
        let mut acc = Vec::new();
        while let Some((word, state)) = matches.next() {
            acc.push((String::from_utf8_lossy(word).into_owned(), state));
        }
        acc
    }
}

impl std::fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Vocabulary({} words)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use fst::automaton::{Str, Subsequence};

    use super::*;

    #[test]
    fn test_duplicates_and_order() {
        let vocab = Vocabulary::from_words(["dog", "cat", "dog", "cats"]).unwrap();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("cat"));
        assert!(vocab.contains("cats"));
        assert!(!vocab.contains("ca"));
    }

    #[test]
    fn test_empty() {
        let vocab = Vocabulary::from_words(Vec::<String>::new()).unwrap();
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_fingerprint() {
        let a = Vocabulary::from_words(["dog", "cat"]).unwrap();
        let b = Vocabulary::from_words(["cat", "dog", "cat"]).unwrap();
        let c = Vocabulary::from_words(["cat", "god"]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_automaton_search() {
        let vocab = Vocabulary::from_words(["kala", "kalat", "kissa", "koira"]).unwrap();
        let exact = vocab
            .search(Str::new("kala"))
            .into_iter()
            .map(|(w, _)| w)
            .collect::<Vec<_>>();
        assert_eq!(exact, vec!["kala"]);

        // k followed somewhere by l
        let found = vocab
            .search(Subsequence::new("kl"))
            .into_iter()
            .map(|(w, _)| w)
            .collect::<Vec<_>>();
        assert_eq!(found, vec!["kala", "kalat"]);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("sanalouhos_vocab_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            write!(file, "talo\r\nsää\nTalo\n").unwrap();
        }
        let vocab = Vocabulary::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("talo"));
        assert!(vocab.contains("Talo"));
        assert!(vocab.contains("sää"));
    }
}
