//! Extension dependency resolution for Kit applications.
//!
//! Takes the dependencies an app manifest declares, applies the version
//! lock, consults the extension registry for anything unconstrained, and
//! produces the load-ordered activation list the runtime consumes.
//!
//! Resolution runs once per launch, synchronously, and is fatal on failure;
//! there is no partial-activation mode. See [`resolve`] for the precedence
//! rules and [`ExtensionRegistry`] for the registry seam.

mod activation;
mod error;
mod registry;
mod resolve;

pub use activation::ExtensionActivation;
pub use error::{Error, FailureCause, ResolutionFailure, Result};
pub use registry::{ExtensionRegistry, MemoryRegistry, RegistryError, RegistryResult};
pub use resolve::{resolve, DEFAULT_LOAD_ORDER};
