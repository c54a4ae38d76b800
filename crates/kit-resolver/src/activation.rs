//! Resolved extension activations.

use semver::Version;

/// One extension scheduled for loading: exact version, load-order rank.
/// Produced by resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionActivation {
    pub name: String,
    pub version: Version,
    pub order: i64,
}

impl ExtensionActivation {
    /// The `"name-version"` identifier, matching lock-entry form.
    pub fn id(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

impl std::fmt::Display for ExtensionActivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (order {})", self.id(), self.order)
    }
}
