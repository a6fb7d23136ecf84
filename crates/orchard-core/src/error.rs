//! Error types for orchard-core

use std::fmt;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Which validator rejected a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    Min,
    Max,
    Cast,
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `favoriteFruit.name`
    pub path: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Re-root this error under an embedded document path
    pub fn nested(mut self, parent: &str) -> Self {
        self.path = format!("{}.{}", parent, self.path);
        self
    }
}

/// Validation failure for one document
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Model name of the rejected document
    pub model: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Errors reported for a given path
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// Ok when no field was rejected
    pub fn into_result(self) -> std::result::Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed: ", self.model)?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", error.path, error.message)?;
        }
        Ok(())
    }
}
