// src/error.rs
// Standardized error types for reviewsense

use thiserror::Error;

/// Main error type for the reviewsense library
#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("model call timed out after {0}s")]
    Timeout(u64),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Result using SentimentError
pub type Result<T> = std::result::Result<T, SentimentError>;
