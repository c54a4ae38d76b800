//! The settings tree: string-keyed tables of [`SettingsValue`]s.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::path::SettingsPath;
use crate::value::{child_path, SettingsValue};

/// A table of settings, keyed by string. Keys iterate in sorted order, so a
/// tree serializes the same way every time regardless of how it was built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsNode {
    entries: BTreeMap<String, SettingsValue>,
}

impl SettingsNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a parsed TOML table, detecting append markers in
    /// nested values. An append marker at the document root is rejected
    /// because there is nothing for it to append onto.
    pub fn from_toml_table(table: toml::value::Table) -> Result<Self> {
        match SettingsValue::from_toml(toml::Value::Table(table), "")? {
            SettingsValue::Table(node) => Ok(node),
            other => Err(Error::UnsupportedValue {
                path: String::new(),
                kind: other.kind(),
            }),
        }
    }

    /// Table conversion without the root marker check; callers guarantee the
    /// table's own keys have already been vetted.
    pub(crate) fn from_toml_table_at(table: toml::value::Table, base: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, value) in table {
            let path = child_path(base, &key);
            let converted = SettingsValue::from_toml(value, &path)?;
            entries.insert(key, converted);
        }
        Ok(Self { entries })
    }

    /// Renders the tree back into a TOML table.
    pub fn to_toml_table(&self) -> toml::value::Table {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_toml()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SettingsValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SettingsValue> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SettingsValue) -> Option<SettingsValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingsValue> {
        self.entries.remove(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingsValue)> {
        self.entries.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut SettingsValue> {
        self.entries.values_mut()
    }

    /// Looks up a value by dotted path.
    ///
    /// Returns `Ok(None)` when any segment is absent. Descending through a
    /// value that exists but is not a table is an error, since the path and
    /// the tree genuinely disagree about the data's shape.
    pub fn get_path(&self, raw: &str) -> Result<Option<&SettingsValue>> {
        let path = SettingsPath::parse(raw)?;
        let segments = path.segments();
        // parse rejects empty paths
        let Some((last, parents)) = segments.split_last() else {
            return Ok(None);
        };

        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            match current.get(segment) {
                None => return Ok(None),
                Some(SettingsValue::Table(node)) => current = node,
                Some(_) => {
                    return Err(Error::PathConflict {
                        path: SettingsPath::from_segments(&segments[..=depth]).to_string(),
                    });
                }
            }
        }
        Ok(current.get(last))
    }

    /// Inserts a value at a dotted path, creating intermediate tables.
    ///
    /// Fails if an intermediate segment already holds a non-table value.
    pub fn set_path(&mut self, raw: &str, value: SettingsValue) -> Result<()> {
        let path = SettingsPath::parse(raw)?;
        let segments = path.segments();
        // parse rejects empty paths
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            let entry = current
                .entries
                .entry(segment.clone())
                .or_insert_with(|| SettingsValue::Table(SettingsNode::new()));
            match entry {
                SettingsValue::Table(node) => current = node,
                _ => {
                    return Err(Error::PathConflict {
                        path: SettingsPath::from_segments(&segments[..=depth]).to_string(),
                    });
                }
            }
        }
        current.entries.insert(last.clone(), value);
        Ok(())
    }

    /// The per-extension override table at `exts."<name>"`, if present.
    pub fn extension_settings(&self, name: &str) -> Option<&SettingsNode> {
        self.get("exts")?.as_table()?.get(name)?.as_table()
    }
}

impl IntoIterator for SettingsNode {
    type Item = (String, SettingsValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, SettingsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, SettingsValue)> for SettingsNode {
    fn from_iter<T: IntoIterator<Item = (String, SettingsValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
