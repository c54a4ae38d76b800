//! Extension dependency declarations.
//!
//! Dependencies live under `[dependencies]`, one table per extension:
//!
//! ```toml
//! [dependencies]
//! "omni.warp.core" = {}
//! "omni.kit.renderer.core" = { version = "1.5", order = -10 }
//! "omni.kit.profiler" = { optional = true, enabled = false }
//! ```
//!
//! An empty table means "any version, resolver's choice". Declaration order
//! is preserved because it breaks ties when activations are load-ordered.

use semver::Version;
use serde::Deserialize;

use kit_settings::SettingsPath;

use crate::error::{Error, Result};
use crate::version::parse_version;

/// One declared extension dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionDependency {
    pub name: String,
    /// Exact pinned version, normalized. `None` means latest available.
    pub version: Option<Version>,
    /// Optional dependencies do not fail the launch when no version exists.
    pub optional: bool,
    /// Disabled dependencies stay declared but are never activated.
    pub enabled: bool,
    /// Load-order priority; lower loads first. `None` falls back to the
    /// resolver's default.
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyEntry {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default = "enabled_default")]
    enabled: bool,
    #[serde(default)]
    order: Option<i64>,
}

fn enabled_default() -> bool {
    true
}

impl ExtensionDependency {
    /// An unconstrained, enabled dependency on `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            optional: false,
            enabled: true,
            order: None,
        }
    }

    /// Builds a dependency from its manifest entry.
    pub fn from_toml(name: &str, value: toml::Value) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::Schema {
                path: "dependencies".to_string(),
                message: "extension name must not be empty".to_string(),
            });
        }
        let entry: DependencyEntry = value.try_into().map_err(|err| Error::Schema {
            path: entry_path(name),
            message: err.to_string(),
        })?;
        let version = entry
            .version
            .as_deref()
            .map(|raw| parse_version(name, raw))
            .transpose()?;
        Ok(Self {
            name: name.to_string(),
            version,
            optional: entry.optional,
            enabled: entry.enabled,
            order: entry.order,
        })
    }

    /// Renders the dependency back to its manifest entry. Fields at their
    /// defaults are omitted.
    pub fn to_toml(&self) -> toml::Value {
        let mut entry = toml::value::Table::new();
        if let Some(version) = &self.version {
            entry.insert(
                "version".to_string(),
                toml::Value::String(version.to_string()),
            );
        }
        if self.optional {
            entry.insert("optional".to_string(), toml::Value::Boolean(true));
        }
        if !self.enabled {
            entry.insert("enabled".to_string(), toml::Value::Boolean(false));
        }
        if let Some(order) = self.order {
            entry.insert("order".to_string(), toml::Value::Integer(order));
        }
        toml::Value::Table(entry)
    }
}

/// Converts a `[dependencies]` table, keeping declaration order.
pub fn dependencies_from_table(table: toml::value::Table) -> Result<Vec<ExtensionDependency>> {
    table
        .into_iter()
        .map(|(name, value)| ExtensionDependency::from_toml(&name, value))
        .collect()
}

fn entry_path(name: &str) -> String {
    format!("dependencies.{}", SettingsPath::display_segment(name))
}
