//! Error types for the scoped configuration export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the query engine itself.
///
/// These abort the whole export; no partial result is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Scope \"{0}\" is not valid. Accepted values: all|default|websites|stores")]
    InvalidScope(String),
}

/// Application-level errors: the engine plus every collaborator around it.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Snapshot error in {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    #[error("Config document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExportError {
    pub(crate) fn snapshot(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ExportError::Snapshot {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ExportError {
    fn from(err: config::ConfigError) -> Self {
        ExportError::ConfigError(err.to_string())
    }
}
