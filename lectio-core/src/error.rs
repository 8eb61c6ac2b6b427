//! Error types for lectio-core

use thiserror::Error;

/// Main error type for the lectio-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Entry failed validation; carries every problem found
    #[error("invalid entry: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// Entry not found
    #[error("entry not found: {0}")]
    EntryNotFound(i64),
}

impl Error {
    /// Validation messages, if this is a validation failure.
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Error::Validation(messages) => Some(messages),
            _ => None,
        }
    }
}

/// Result type alias for lectio-core
pub type Result<T> = std::result::Result<T, Error>;
