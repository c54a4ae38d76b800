//! Error types for workflow documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading workflow parameter documents.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the document from disk failed.
    #[error("failed to read workflow document at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid JSON or not a parameter list.
    #[error("workflow document syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A parameter violates the schema rules.
    #[error("schema error in parameter '{parameter}': {message}")]
    Schema { parameter: String, message: String },

    /// Two parameters share a name.
    #[error("duplicate workflow parameter '{name}'")]
    DuplicateParameter { name: String },
}

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, Error>;
