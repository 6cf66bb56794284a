use thiserror::Error;

/// Errors raised while building a puzzle or loading its inputs. The searches
/// themselves cannot fail once a grid and vocabulary exist.
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Invalid number of letters: got {letters}, expected {ncol}x{nrow}")]
    InvalidDimensions {
        letters: usize,
        ncol: usize,
        nrow: usize,
    },

    #[error("Grid cells must hold exactly one letter, got {0:?}")]
    InvalidLetter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] fst::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
