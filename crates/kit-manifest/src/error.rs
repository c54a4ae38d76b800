//! Error types for manifest parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading, parsing or rewriting manifests.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a manifest file from disk failed.
    #[error("failed to read manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid TOML. The underlying error names the
    /// offending line and column.
    #[error("manifest syntax error: {0}")]
    Syntax(#[from] toml::de::Error),

    /// The document parsed but a section has the wrong shape.
    #[error("schema error at '{path}': {message}")]
    Schema { path: String, message: String },

    /// The settings tree under `[settings]` could not be built.
    #[error(transparent)]
    Settings(#[from] kit_settings::Error),

    /// A generated-part marker without its counterpart.
    #[error("dangling '{marker}' marker in manifest")]
    DanglingMarker { marker: &'static str },

    /// More than one generated part in a single manifest.
    #[error("manifest contains more than one generated part")]
    MultipleGeneratedParts,

    /// A version string that does not parse, even after normalization.
    #[error("invalid version '{version}' for extension '{name}': {source}")]
    Version {
        name: String,
        version: String,
        source: semver::Error,
    },

    /// A lock entry that cannot be split into name and version.
    #[error("invalid lock entry '{entry}': {reason}")]
    LockEntry { entry: String, reason: String },

    /// Rendering a regenerated part back to TOML failed.
    #[error("failed to serialize generated part: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;
