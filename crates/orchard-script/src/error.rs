//! Error types for orchard-script

use thiserror::Error;

/// Seed loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Person `{person}` names unknown favourite fruit `{fruit}`")]
    UnknownFruit { person: String, fruit: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
