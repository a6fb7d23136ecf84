//! Error types for store operations.

use orchard_core::ValidationError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored document could not be mapped back to its shape.
    #[error("Corrupt document in {collection}: {reason}")]
    Corrupt { collection: String, reason: String },

    /// Document rejected by its validators.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Duplicate `_id`.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Malformed or unsupported connection string.
    #[error("Invalid connection string `{input}`: {reason}")]
    InvalidConnection { input: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
