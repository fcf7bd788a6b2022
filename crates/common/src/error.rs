//! Error types shared across discjob crates.

use std::path::PathBuf;

/// Top-level error type for discjob operations.
#[derive(Debug, thiserror::Error)]
pub enum DiscjobError {
    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Preferences error: {message}")]
    Preferences { message: String },

    #[error("Job generation error: {message}")]
    JobGeneration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Operation aborted by user")]
    Aborted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using DiscjobError.
pub type DiscjobResult<T> = Result<T, DiscjobError>;

impl DiscjobError {
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn preferences(msg: impl Into<String>) -> Self {
        Self::Preferences {
            message: msg.into(),
        }
    }

    pub fn job_generation(msg: impl Into<String>) -> Self {
        Self::JobGeneration {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// True when the user declined to continue past a warning.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
