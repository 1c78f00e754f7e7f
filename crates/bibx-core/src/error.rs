use thiserror::Error;

/// Validation and contract errors exposed by `bibx-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bibliographic key cannot be empty")]
    EmptyKey,
    #[error("bibliographic key length {len} exceeds max {max}")]
    KeyTooLong { len: usize, max: usize },
    #[error("bibliographic key contains invalid character '{ch}' at index {index}")]
    KeyInvalidChar { ch: char, index: usize },

    #[error("invalid key scheme '{value}', expected one of isbn, oclc, lccn, olid")]
    InvalidScheme { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
