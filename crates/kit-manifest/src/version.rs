//! Version string normalization.
//!
//! Manifests and lock entries frequently write versions with fewer than
//! three components (`"1.5"`, `"2"`). These are padded with zeroes before
//! semver parsing, so `"1.5"` and `"1.5.0"` name the same release.

use semver::Version;

use crate::error::{Error, Result};

/// Pads a dotted version to three components. Strings carrying a
/// prerelease or build suffix are left untouched.
pub fn normalize_version(raw: &str) -> String {
    if raw.contains('-') || raw.contains('+') {
        return raw.to_string();
    }
    match raw.split('.').count() {
        1 => format!("{raw}.0.0"),
        2 => format!("{raw}.0"),
        _ => raw.to_string(),
    }
}

/// Parses a version string after normalization. `name` identifies the
/// extension the version belongs to, so failures point at a document entry.
pub fn parse_version(name: &str, raw: &str) -> Result<Version> {
    Version::parse(&normalize_version(raw)).map_err(|source| Error::Version {
        name: name.to_string(),
        version: raw.to_string(),
        source,
    })
}
