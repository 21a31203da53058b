//! Error types for the `eop-rag` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in retrieval engine operations.
///
/// Only structural ingestion failures surface here. An empty index or a
/// query with no matches is reported through
/// [`ContextStatus`](crate::context::ContextStatus), never as an error.
#[derive(Debug, Error)]
pub enum RagError {
    /// The caller passed a malformed document (for example an empty name).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Content declared as text could not be decoded.
    #[error("Unreadable content in '{name}': {message}")]
    UnreadableContent {
        /// The document name supplied by the caller.
        name: String,
        /// A description of the failure.
        message: String,
    },

    /// A file could not be read during file or directory ingestion.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory ingestion was pointed at something that is not a directory.
    #[error("Invalid document root: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for retrieval engine operations.
pub type Result<T> = std::result::Result<T, RagError>;
