//! Error types for content loading, configuration and category lookup.
//!
//! The drill engine itself never fails: empty answers, empty categories and
//! out-of-order calls all have defined outcomes. Only the edges that touch
//! files or user-supplied identifiers return these errors.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("built-in content file {0} is missing")]
    MissingContent(String),

    #[error("invalid exercise {exercise} in category {category}: {reason}")]
    InvalidContent {
        category: String,
        exercise: String,
        reason: String,
    },

    #[error("duplicate id {id} in {scope}")]
    DuplicateId { id: String, scope: String },

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
