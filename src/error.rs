//! This module defines all error types used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A declaration manifest could not be parsed or failed validation
    #[error("Manifest error in {file:?}: {message}")]
    Manifest { file: PathBuf, message: String },

    /// The requested target type has no declared transitions source
    #[error("The target \"{0}\" does not exist.")]
    UnknownTarget(String),

    /// A transition record is missing a required field
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a manifest error for the given file
    pub fn manifest(file: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Manifest {
            file: file.into(),
            message: msg.into(),
        }
    }

    /// Check if the error is a failure to resolve the requested target
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Error::UnknownTarget(_))
    }
}

// Implement From traits for common external error types

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Manifest {
            file: PathBuf::from("unknown"),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Manifest {
            file: PathBuf::from("unknown"),
            message: format!("JSON error: {}", err),
        }
    }
}
