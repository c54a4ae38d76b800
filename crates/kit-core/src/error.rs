//! Error type for launch composition.

use thiserror::Error;

/// Errors surfaced while composing a launch plan. Mostly wrappers: the
/// underlying crates already name the offending file, key or extension.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Manifest(#[from] kit_manifest::Error),

    #[error(transparent)]
    Settings(#[from] kit_settings::Error),

    #[error(transparent)]
    Resolution(#[from] kit_resolver::Error),

    /// Composition was asked to run with no manifests at all.
    #[error("no manifests to compose")]
    NoManifests,
}

/// Result type for composition.
pub type Result<T> = std::result::Result<T, Error>;
