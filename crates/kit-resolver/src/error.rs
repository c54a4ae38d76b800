//! Resolution errors.
//!
//! Resolution is all-or-nothing: a launch either gets a complete activation
//! list or fails. All failing dependencies are gathered into one error so a
//! single attempt surfaces every problem, not just the first.

use thiserror::Error;

use crate::registry::RegistryError;

/// Why one dependency failed to resolve.
#[derive(Debug)]
pub enum FailureCause {
    /// The registry has no published version of the extension.
    NoVersions,
    /// The registry itself failed, after the retry policy was exhausted.
    Registry(RegistryError),
}

/// One unresolvable dependency.
#[derive(Debug)]
pub struct ResolutionFailure {
    pub name: String,
    pub cause: FailureCause,
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            FailureCause::NoVersions => write!(f, "{}: no available version", self.name),
            FailureCause::Registry(err) => write!(f, "{}: {}", self.name, err),
        }
    }
}

/// Errors produced by dependency resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more dependencies could not be resolved.
    #[error("unresolved extension dependencies: {}", .failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Resolution { failures: Vec<ResolutionFailure> },
}

impl Error {
    /// Names of every failing dependency, in declaration order.
    pub fn failing_names(&self) -> Vec<&str> {
        match self {
            Self::Resolution { failures } => {
                failures.iter().map(|f| f.name.as_str()).collect()
            }
        }
    }
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, Error>;
