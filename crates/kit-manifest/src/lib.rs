//! Parsing for Kit application manifests.
//!
//! A `.kit` manifest declares what an application is made of: package
//! metadata, the extensions it depends on, and a settings tree consumed by
//! the runtime. This crate turns manifest text into typed values:
//!
//! ```text
//!  manifest text
//!       |
//!       v
//!  ManifestSource ---- split at generated-part markers
//!       |
//!       v
//!  ManifestPart  ----- package / dependencies / settings per part
//!       |
//!       v
//!  AppManifest   ----- parts combined, lock table extracted
//! ```
//!
//! The generated part is machine-owned: it is parsed like any other part
//! but replaced wholesale when locks are rewritten, never hand-merged.

mod dependency;
mod document;
mod error;
mod lock;
mod manifest;
mod version;

pub use dependency::{dependencies_from_table, ExtensionDependency};
pub use document::{ManifestSource, BEGIN_MARKER, END_MARKER};
pub use error::{Error, Result};
pub use lock::{LockEntry, LockTable, LOCK_SETTINGS_PATH};
pub use manifest::{AppManifest, ManifestPart, PackageSection};
pub use version::{normalize_version, parse_version};
