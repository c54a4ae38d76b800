//! Settings values and their TOML representation.

use crate::error::{Error, Result};
use crate::node::SettingsNode;
use crate::path::SettingsPath;
use crate::APPEND_KEY;

/// A single value in a settings tree.
///
/// The variants mirror what manifest files can express: scalars, arrays,
/// nested tables, and the append marker used by overlays to extend an array
/// instead of replacing it. `Append` only ever appears in freshly parsed
/// trees; [`merge`](crate::merge) consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<SettingsValue>),
    Table(SettingsNode),
    /// An array-append request parsed from a `"++"` marker table.
    Append(Vec<SettingsValue>),
}

impl SettingsValue {
    /// Converts a TOML value, detecting append markers.
    ///
    /// A table whose only key is `"++"` becomes [`SettingsValue::Append`]; a
    /// table that mixes the marker with other keys is rejected, as is a
    /// marker holding anything but an array. `path` is only used to report
    /// where in the tree a conversion failed.
    pub(crate) fn from_toml(value: toml::Value, path: &str) -> Result<Self> {
        match value {
            toml::Value::String(s) => Ok(Self::String(s)),
            toml::Value::Integer(i) => Ok(Self::Integer(i)),
            toml::Value::Float(f) => Ok(Self::Float(f)),
            toml::Value::Boolean(b) => Ok(Self::Bool(b)),
            toml::Value::Datetime(_) => Err(Error::UnsupportedValue {
                path: path.to_string(),
                kind: "datetime",
            }),
            toml::Value::Array(items) => Ok(Self::Array(convert_items(items, path)?)),
            toml::Value::Table(table) => {
                if table.contains_key(APPEND_KEY) {
                    if table.len() != 1 {
                        return Err(Error::AppendMarkerNotAlone {
                            path: path.to_string(),
                        });
                    }
                    let (_, marker_value) = table
                        .into_iter()
                        .next()
                        .ok_or_else(|| Error::AppendMarkerNotArray {
                            path: path.to_string(),
                        })?;
                    match marker_value {
                        toml::Value::Array(items) => {
                            Ok(Self::Append(convert_items(items, path)?))
                        }
                        _ => Err(Error::AppendMarkerNotArray {
                            path: path.to_string(),
                        }),
                    }
                } else {
                    Ok(Self::Table(SettingsNode::from_toml_table_at(table, path)?))
                }
            }
        }
    }

    /// Renders the value back into TOML. Append markers round-trip to their
    /// `"++"` table form.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            Self::String(s) => toml::Value::String(s.clone()),
            Self::Integer(i) => toml::Value::Integer(*i),
            Self::Float(f) => toml::Value::Float(*f),
            Self::Bool(b) => toml::Value::Boolean(*b),
            Self::Array(items) => {
                toml::Value::Array(items.iter().map(SettingsValue::to_toml).collect())
            }
            Self::Table(node) => toml::Value::Table(node.to_toml_table()),
            Self::Append(items) => {
                let mut table = toml::value::Table::new();
                table.insert(
                    APPEND_KEY.to_string(),
                    toml::Value::Array(items.iter().map(SettingsValue::to_toml).collect()),
                );
                toml::Value::Table(table)
            }
        }
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Array(_) => "array",
            Self::Table(_) => "table",
            Self::Append(_) => "append",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[SettingsValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&SettingsNode> {
        match self {
            Self::Table(node) => Some(node),
            _ => None,
        }
    }
}

fn convert_items(items: Vec<toml::Value>, path: &str) -> Result<Vec<SettingsValue>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| SettingsValue::from_toml(item, &format!("{path}[{i}]")))
        .collect()
}

/// Joins a child key onto a rendered path, quoting dotted keys.
pub(crate) fn child_path(base: &str, key: &str) -> String {
    let rendered = SettingsPath::display_segment(key);
    if base.is_empty() {
        rendered
    } else {
        format!("{base}.{rendered}")
    }
}

impl From<&str> for SettingsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for SettingsValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SettingsValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SettingsValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<SettingsValue>> for SettingsValue {
    fn from(value: Vec<SettingsValue>) -> Self {
        Self::Array(value)
    }
}
