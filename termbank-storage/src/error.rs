//! Error types for the persistence layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for persistence operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur loading or saving a dictionary file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not a well-formed snapshot document.
    #[error("malformed dictionary file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Refused to create a dictionary over an existing file.
    #[error("dictionary already exists: {0}")]
    AlreadyExists(PathBuf),
}

impl StorageError {
    /// Whether this is a parse failure (the file exists but could not be
    /// understood), as opposed to an IO-level failure.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
