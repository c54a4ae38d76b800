//! Extension registry lookup.
//!
//! The registry is external to this crate; resolution only ever asks it one
//! question: which versions of a named extension exist. [`ExtensionRegistry`]
//! is the seam for that question, and [`MemoryRegistry`] is the in-process
//! implementation used by tests and local catalogs.

use std::collections::HashMap;

use semver::Version;
use thiserror::Error;

/// Failure of a registry lookup.
///
/// Transient I/O failures are retried once by the resolver; anything else
/// is treated as fatal immediately.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry failure: {message}")]
    Fatal { message: String },
}

impl RegistryError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type for registry lookups.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Source of published extension versions.
pub trait ExtensionRegistry {
    /// All published versions of `name`, in no particular order. An unknown
    /// name is not an error; it simply has no versions.
    fn versions(&self, name: &str) -> RegistryResult<Vec<Version>>;

    /// The highest published version of `name`, if any.
    fn highest(&self, name: &str) -> RegistryResult<Option<Version>> {
        Ok(self.versions(name)?.into_iter().max())
    }
}

/// An in-memory registry of published extensions.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    published: HashMap<String, Vec<Version>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes one version of an extension.
    pub fn publish(&mut self, name: impl Into<String>, version: Version) {
        self.published.entry(name.into()).or_default().push(version);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.published.contains_key(name)
    }

    /// Number of distinct extension names published.
    pub fn len(&self) -> usize {
        self.published.len()
    }

    pub fn is_empty(&self) -> bool {
        self.published.is_empty()
    }

    /// All published extension names, sorted.
    pub fn known_extensions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.published.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ExtensionRegistry for MemoryRegistry {
    fn versions(&self, name: &str) -> RegistryResult<Vec<Version>> {
        Ok(self.published.get(name).cloned().unwrap_or_default())
    }
}
