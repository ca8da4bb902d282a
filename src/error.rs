//! Error types for quickdue.

use thiserror::Error;

/// Errors returned by quickdue commands, storage and configuration.
///
/// The temporal parser itself never fails; these cover everything around it.
#[derive(Debug, Error)]
pub enum QuickdueError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for QuickdueError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
