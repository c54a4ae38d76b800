//! Application manifests.
//!
//! An app manifest is a TOML document with three sections of interest:
//! `[package]` metadata, `[dependencies]` declaring extensions, and
//! `[settings]` holding the app's configuration tree. A manifest may also
//! carry a machine-written generated part (see [`crate::document`]) which is
//! parsed exactly like the hand part and overlaid on top of it.
//!
//! ```toml
//! [package]
//! title = "Warp Viewer"
//! version = "1.0.0"
//!
//! [dependencies]
//! "omni.warp.core" = {}
//!
//! [settings.app.window]
//! title = "Warp Viewer"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use kit_settings::{merge_all, SettingsNode};

use crate::dependency::{dependencies_from_table, ExtensionDependency};
use crate::document::{render_with_generated, ManifestSource};
use crate::error::{Error, Result};
use crate::lock::LockTable;
use crate::version::parse_version;

/// `[package]` metadata. All fields are optional; extension manifests in
/// the wild range from a bare title to full publication records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl PackageSection {
    /// Checks that the declared version, if any, parses as a version
    /// number after normalization.
    pub fn validate(&self) -> Result<()> {
        if let Some(raw) = &self.version {
            let name = self.title.as_deref().unwrap_or("package");
            parse_version(name, raw)?;
        }
        Ok(())
    }
}

/// One parsed region of a manifest, hand-written or generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestPart {
    pub package: Option<PackageSection>,
    pub dependencies: Vec<ExtensionDependency>,
    pub settings: SettingsNode,
}

impl ManifestPart {
    /// Parses one region of manifest text.
    pub fn parse(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text)?;
        Self::from_table(table)
    }

    fn from_table(mut table: toml::value::Table) -> Result<Self> {
        let package = match table.remove("package") {
            Some(value) => {
                let section: PackageSection = value.try_into().map_err(|err| Error::Schema {
                    path: "package".to_string(),
                    message: err.to_string(),
                })?;
                section.validate()?;
                Some(section)
            }
            None => None,
        };

        let dependencies = match table.remove("dependencies") {
            Some(toml::Value::Table(deps)) => dependencies_from_table(deps)?,
            Some(other) => {
                return Err(Error::Schema {
                    path: "dependencies".to_string(),
                    message: format!("expected a table, found {}", other.type_str()),
                });
            }
            None => Vec::new(),
        };

        let settings = match table.remove("settings") {
            Some(toml::Value::Table(tree)) => SettingsNode::from_toml_table(tree)?,
            Some(other) => {
                return Err(Error::Schema {
                    path: "settings".to_string(),
                    message: format!("expected a table, found {}", other.type_str()),
                });
            }
            None => SettingsNode::new(),
        };

        if let Some(unknown) = table.keys().next() {
            return Err(Error::Schema {
                path: unknown.clone(),
                message: "unknown top-level section".to_string(),
            });
        }

        Ok(Self {
            package,
            dependencies,
            settings,
        })
    }

    /// Renders the part back to a TOML table. Empty sections are omitted.
    pub fn to_toml_table(&self) -> Result<toml::value::Table> {
        let mut table = toml::value::Table::new();
        if let Some(package) = &self.package {
            table.insert("package".to_string(), toml::Value::try_from(package)?);
        }
        if !self.dependencies.is_empty() {
            let mut deps = toml::value::Table::new();
            for dep in &self.dependencies {
                deps.insert(dep.name.clone(), dep.to_toml());
            }
            table.insert("dependencies".to_string(), toml::Value::Table(deps));
        }
        if !self.settings.is_empty() {
            table.insert(
                "settings".to_string(),
                toml::Value::Table(self.settings.to_toml_table()),
            );
        }
        Ok(table)
    }
}

/// A fully parsed application manifest: hand part, optional generated part,
/// and the raw source they were split from.
#[derive(Debug, Clone, PartialEq)]
pub struct AppManifest {
    source: ManifestSource,
    hand: ManifestPart,
    generated: Option<ManifestPart>,
}

impl AppManifest {
    /// Parses manifest text, splitting off the generated part first.
    pub fn parse(text: &str) -> Result<Self> {
        let source = ManifestSource::split(text)?;
        let hand = ManifestPart::parse(source.hand())?;
        let generated = match source.generated() {
            Some(body) => Some(ManifestPart::parse(body)?),
            None => None,
        };
        tracing::debug!(
            "Parsed manifest: {} hand dependencies, generated part: {}",
            hand.dependencies.len(),
            generated.is_some()
        );
        Ok(Self {
            source,
            hand,
            generated,
        })
    }

    /// Reads and parses a manifest file.
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::debug!("Loading app manifest from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Package metadata; the hand part's section wins over a generated one.
    pub fn package(&self) -> Option<&PackageSection> {
        self.hand
            .package
            .as_ref()
            .or_else(|| self.generated.as_ref()?.package.as_ref())
    }

    pub fn hand(&self) -> &ManifestPart {
        &self.hand
    }

    pub fn generated(&self) -> Option<&ManifestPart> {
        self.generated.as_ref()
    }

    pub fn source(&self) -> &ManifestSource {
        &self.source
    }

    /// Dependencies from both parts, in declaration order.
    ///
    /// When both parts declare the same extension, the later declaration's
    /// fields win but the dependency keeps its first position, so load-order
    /// tie-breaking is stable under regeneration.
    pub fn dependencies(&self) -> Vec<ExtensionDependency> {
        let mut combined: Vec<ExtensionDependency> = Vec::new();
        let generated_deps = self
            .generated
            .iter()
            .flat_map(|part| part.dependencies.iter());
        for dep in self.hand.dependencies.iter().chain(generated_deps) {
            match combined.iter_mut().find(|existing| existing.name == dep.name) {
                Some(existing) => *existing = dep.clone(),
                None => combined.push(dep.clone()),
            }
        }
        combined
    }

    /// The manifest's own settings: hand part overlaid by the generated
    /// part. Append markers are consumed.
    pub fn settings(&self) -> SettingsNode {
        let mut layers = vec![self.hand.settings.clone()];
        if let Some(generated) = &self.generated {
            layers.push(generated.settings.clone());
        }
        merge_all(layers)
    }

    /// The version lock table, read from the merged settings tree. The lock
    /// normally lives in the generated part, but because that part is just
    /// a higher-precedence overlay, a hand-written lock is honored too.
    pub fn lock(&self) -> Result<Option<LockTable>> {
        LockTable::from_settings(&self.settings())
    }

    /// Renders the manifest with its generated part's lock array replaced.
    /// Other generated content survives; comments in the generated part do
    /// not, since it is machine-owned and rewritten wholesale.
    pub fn with_lock(&self, lock: &LockTable) -> Result<String> {
        let mut table: toml::value::Table = match self.source.generated() {
            Some(body) => toml::from_str(body)?,
            None => toml::value::Table::new(),
        };

        let mut path = String::new();
        let mut current = &mut table;
        for key in ["settings", "app", "exts"] {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(key);
            let entry = current
                .entry(key.to_string())
                .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
            current = entry.as_table_mut().ok_or_else(|| Error::Schema {
                path: path.clone(),
                message: "expected a table in the generated part".to_string(),
            })?;
        }
        current.insert(
            "locked".to_string(),
            toml::Value::Array(
                lock.to_strings()
                    .into_iter()
                    .map(toml::Value::String)
                    .collect(),
            ),
        );

        let body = toml::to_string(&toml::Value::Table(table))?;
        Ok(self.source.with_generated(&body))
    }

    /// Renders the parsed manifest back to TOML text, generated part and
    /// markers included. Comments are not preserved; reparsing the output
    /// yields the same parts.
    pub fn to_toml(&self) -> Result<String> {
        let hand = toml::to_string(&toml::Value::Table(self.hand.to_toml_table()?))?;
        match &self.generated {
            None => Ok(hand),
            Some(part) => {
                let body = toml::to_string(&toml::Value::Table(part.to_toml_table()?))?;
                Ok(render_with_generated(&hand, &body))
            }
        }
    }
}
