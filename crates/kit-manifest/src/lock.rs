//! The version lock table.
//!
//! Resolved versions are recorded in the generated part of the app manifest
//! as an array of `"name-version"` strings:
//!
//! ```toml
//! [settings.app.exts]
//! locked = ["omni.warp.core-1.5.0", "omni.kit.renderer.core-2.0.0"]
//! ```
//!
//! Entries are split on the last `-`, since extension names routinely
//! contain dashes of their own. Locks are authoritative during resolution:
//! a locked version beats any constraint in the declarations.

use semver::Version;

use kit_settings::{SettingsNode, SettingsValue};

use crate::error::{Error, Result};
use crate::version::parse_version;

/// Dotted path of the lock array inside a settings tree.
pub const LOCK_SETTINGS_PATH: &str = "app.exts.locked";

/// One locked extension version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    pub name: String,
    pub version: Version,
}

impl LockEntry {
    /// Parses a `"name-version"` string, splitting on the last `-`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (name, version) = raw.rsplit_once('-').ok_or_else(|| Error::LockEntry {
            entry: raw.to_string(),
            reason: "missing '-' separator".to_string(),
        })?;
        if name.is_empty() {
            return Err(Error::LockEntry {
                entry: raw.to_string(),
                reason: "empty extension name".to_string(),
            });
        }
        let version = parse_version(name, version)?;
        Ok(Self {
            name: name.to_string(),
            version,
        })
    }

    /// Renders the entry back to its `"name-version"` form.
    pub fn render(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// An ordered set of locked versions, one per extension name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockTable {
    entries: Vec<LockEntry>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the lock array out of a settings tree, if one is present.
    ///
    /// Duplicate names keep the last entry, matching overlay precedence.
    pub fn from_settings(settings: &SettingsNode) -> Result<Option<Self>> {
        match settings.get_path(LOCK_SETTINGS_PATH)? {
            None => Ok(None),
            Some(SettingsValue::Array(items)) => {
                let mut table = Self::new();
                for item in items {
                    let raw = item.as_str().ok_or_else(|| Error::Schema {
                        path: LOCK_SETTINGS_PATH.to_string(),
                        message: format!("lock entries must be strings, found {}", item.kind()),
                    })?;
                    let entry = LockEntry::parse(raw)?;
                    table.insert(entry.name, entry.version);
                }
                Ok(Some(table))
            }
            Some(other) => Err(Error::Schema {
                path: LOCK_SETTINGS_PATH.to_string(),
                message: format!("expected an array of lock strings, found {}", other.kind()),
            }),
        }
    }

    /// The locked version for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Version> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.version)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Locks `name` to `version`, replacing any previous entry in place.
    pub fn insert(&mut self, name: impl Into<String>, version: Version) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.version = version,
            None => self.entries.push(LockEntry { name, version }),
        }
    }

    pub fn entries(&self) -> &[LockEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders all entries as `"name-version"` strings, in table order.
    pub fn to_strings(&self) -> Vec<String> {
        self.entries.iter().map(LockEntry::render).collect()
    }

    /// The lock array as a settings value, ready to place at
    /// [`LOCK_SETTINGS_PATH`].
    pub fn to_settings_value(&self) -> SettingsValue {
        SettingsValue::Array(
            self.to_strings()
                .into_iter()
                .map(SettingsValue::String)
                .collect(),
        )
    }
}

impl FromIterator<LockEntry> for LockTable {
    fn from_iter<T: IntoIterator<Item = LockEntry>>(iter: T) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry.name, entry.version);
        }
        table
    }
}
