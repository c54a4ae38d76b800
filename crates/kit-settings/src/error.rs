//! Error types for settings tree construction and traversal.

use thiserror::Error;

/// Errors produced while building, addressing or merging settings trees.
#[derive(Debug, Error)]
pub enum Error {
    /// A dotted key path could not be parsed.
    #[error("invalid settings path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// An append marker shared its table with other keys.
    #[error("append marker at '{path}' must be the only key in its table")]
    AppendMarkerNotAlone { path: String },

    /// An append marker held something other than an array.
    #[error("append marker at '{path}' must hold an array")]
    AppendMarkerNotArray { path: String },

    /// A value kind the settings tree does not model (e.g. a TOML datetime).
    #[error("unsupported {kind} value at '{path}'")]
    UnsupportedValue { path: String, kind: &'static str },

    /// A path tried to descend through a value that is not a table.
    #[error("cannot descend into non-table value at '{path}'")]
    PathConflict { path: String },
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, Error>;
