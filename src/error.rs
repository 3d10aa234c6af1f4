//! Error types for the MBTI predictor.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid question catalog: {0}")]
    Catalog(String),

    #[error("Invalid MBTI type: {0:?}")]
    InvalidMbtiType(String),

    #[error("Invalid dataset: {0}")]
    Dataset(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons the trait scoring engine declines to produce a type.
///
/// Only raised when a validity threshold is configured; the default
/// scoring path never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("only {matched} answer(s) matched the questionnaire, need at least {required}")]
    InsufficientAnswers { matched: usize, required: usize },
}
