//! Error types for label mapping construction and file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, loading or saving a label mapping.
#[derive(Error, Debug)]
pub enum LabelError {
    /// Referenced file does not exist
    #[error("File not found: {path:?}")]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Inconsistent or malformed mapping content
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the validation failure
        message: String,
    },

    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LabelError {
    /// Create a validation error with a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for a path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
