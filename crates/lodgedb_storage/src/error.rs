//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store content does not have the expected shape.
    #[error("store corrupted: {0}")]
    Corrupted(String),
}

impl StorageError {
    /// Creates a corruption error with context.
    pub fn corrupted(detail: impl Into<String>) -> Self {
        Self::Corrupted(detail.into())
    }

    /// Returns `true` if this error reports corrupted store content
    /// rather than an environmental failure.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }
}
