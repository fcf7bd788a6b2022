//! Errors raised by the disc model.

use std::path::PathBuf;

/// Errors that can occur when loading or saving sessions and preferences.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid session: {message}")]
    ValidationError { message: String },
}

/// Errors raised by title catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Title #{title_number} is not in the catalog")]
    UnknownTitle { title_number: u32 },

    #[error("Title #{title_number} appears more than once in the catalog")]
    DuplicateTitle { title_number: u32 },
}
