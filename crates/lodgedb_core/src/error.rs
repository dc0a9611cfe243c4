//! Error types for LodgeDB core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in LodgeDB core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store backend error.
    #[error("storage error: {0}")]
    Storage(#[from] lodgedb_storage::StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Database is already open or locked.
    #[error("database locked: another process has exclusive access")]
    DatabaseLocked,

    /// Invalid database format or content.
    #[error("invalid database format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
