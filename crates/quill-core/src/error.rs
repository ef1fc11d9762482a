//! Error types for Quill operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Quill crates. Uses `thiserror` for derive macros.
//!
//! Malformed markdown is never an error: it produces validation issues or
//! imperfect HTML. The only content-level failure is [`Error::Processing`],
//! raised when rendering hits an unexpected internal fault.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Message shown to readers when a document cannot be rendered.
pub const CONTENT_UNAVAILABLE: &str = "This content is currently unavailable.";

/// Errors that can occur in Quill operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Unexpected internal fault while processing a document.
    #[error("Processing failed: {0}")]
    Processing(String),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Document failed a caller-enforced validation policy.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Create a processing fault.
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// Create an I/O error for a path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this is a processing fault.
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing(_))
    }

    /// A message safe to show to end users.
    ///
    /// Processing faults never leak their internal detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Processing(_) => CONTENT_UNAVAILABLE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using Quill's Error type.
pub type Result<T> = std::result::Result<T, Error>;
