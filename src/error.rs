//! Error types for the textscreen crate.
//!
//! Scoring itself never fails; these errors only surface while loading
//! configuration, stopword resources, or collaborator responses.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for textscreen operations.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Stopword resource could not be read
    #[error("Failed to read stopword resource {path}: {source}")]
    StopwordsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stopword resource is not a valid language -> word list mapping
    #[error("Failed to parse stopword resource {path}: {source}")]
    StopwordsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Stopword resource parsed but holds unusable entries
    #[error("Invalid stopword table: {0}")]
    InvalidStopwords(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Collaborator reply missing required fields or not JSON
    #[error("Malformed judgement: {0}")]
    MalformedJudgement(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for textscreen operations
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Convert screening errors to PyO3 exceptions
#[cfg(feature = "python-ext")]
impl From<ScreenError> for pyo3::PyErr {
    fn from(err: ScreenError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyException, PyIOError, PyValueError};

        match err {
            ScreenError::Io(e) => PyIOError::new_err(e.to_string()),
            ScreenError::StopwordsIo { .. } => PyIOError::new_err(err.to_string()),
            ScreenError::Config(msg) | ScreenError::InvalidStopwords(msg) => {
                PyValueError::new_err(msg)
            }
            _ => PyException::new_err(err.to_string()),
        }
    }
}
