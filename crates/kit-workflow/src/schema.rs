//! Workflow parameter documents.
//!
//! A workflow document is a JSON array of parameter records, one per input
//! the conditioning pipeline exposes in the UI:
//!
//! ```json
//! [
//!   { "name": "prompt", "type": "string", "default": "" },
//!   { "name": "strength", "type": "float", "default": 0.75 },
//!   {
//!     "name": "color_input",
//!     "label": "Color",
//!     "type": "image",
//!     "buffer": "LdrColor",
//!     "path": "/Render/Vars/color",
//!     "visibility": "hideothers"
//!   }
//! ]
//! ```
//!
//! There is exactly one document per workflow; nothing is merged or
//! overlaid. Validation is strict: names are unique, and a parameter's
//! type decides which fields it must carry.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Declared type of a workflow parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Float,
    #[serde(alias = "int")]
    Integer,
    /// Bound to a render buffer captured from the viewport.
    Image,
}

impl ParameterKind {
    /// Whether `value` is an acceptable default for this kind. Image
    /// parameters default to a path string.
    fn accepts_default(self, value: &serde_json::Value) -> bool {
        match self {
            Self::String | Self::Image => value.is_string(),
            Self::Float => value.is_number(),
            Self::Integer => value.is_i64(),
        }
    }
}

/// What happens to the rest of the scene while an image parameter's
/// binding is captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum VisibilityRule {
    /// Capture the scene as-is.
    #[default]
    #[serde(rename = "showall")]
    ShowAll,
    /// Hide the bound subtree during capture.
    #[serde(rename = "hideme")]
    HideSelf,
    /// Hide everything except the bound subtree.
    #[serde(rename = "hideothers")]
    HideOthers,
}

/// One UI-exposed input of a conditioning workflow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowParameter {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    /// Render buffer the image is captured from. Image parameters only.
    #[serde(default)]
    pub buffer: Option<String>,
    /// Scene path the capture is bound to. Image parameters only.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub visibility: VisibilityRule,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl WorkflowParameter {
    /// The label shown in the UI; falls back to the parameter name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The default as text, for string and image parameters.
    pub fn default_text(&self) -> Option<&str> {
        self.default.as_ref()?.as_str()
    }

    /// The default as a number, for float and integer parameters.
    pub fn default_number(&self) -> Option<f64> {
        self.default.as_ref()?.as_f64()
    }

    fn schema_error(&self, message: impl Into<String>) -> Error {
        Error::Schema {
            parameter: self.name.clone(),
            message: message.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Schema {
                parameter: "<unnamed>".to_string(),
                message: "parameter name must not be empty".to_string(),
            });
        }

        if self.kind == ParameterKind::Image {
            if self.buffer.as_deref().is_none_or(str::is_empty) {
                return Err(self.schema_error("image parameter requires a buffer binding"));
            }
            if self.path.as_deref().is_none_or(str::is_empty) {
                return Err(self.schema_error("image parameter requires a scene path"));
            }
        } else if self.buffer.is_some() || self.path.is_some() {
            tracing::warn!(
                "Parameter {} is not image-typed; buffer/path bindings are ignored",
                self.name
            );
        }

        if let Some(default) = &self.default {
            if !self.kind.accepts_default(default) {
                return Err(self.schema_error(format!(
                    "default value does not match declared type {:?}",
                    self.kind
                )));
            }
        }
        Ok(())
    }
}

/// A parsed, validated workflow document.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDocument {
    parameters: Vec<WorkflowParameter>,
}

impl WorkflowDocument {
    /// Parses and validates a JSON parameter list.
    pub fn parse(text: &str) -> Result<Self> {
        let parameters: Vec<WorkflowParameter> = serde_json::from_str(text)?;
        let document = Self { parameters };
        document.validate()?;
        tracing::debug!("Loaded workflow document with {} parameters", document.len());
        Ok(document)
    }

    /// Reads and parses a workflow document file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            parameter.validate()?;
            if !seen.insert(parameter.name.as_str()) {
                return Err(Error::DuplicateParameter {
                    name: parameter.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Parameters in document order.
    pub fn parameters(&self) -> &[WorkflowParameter] {
        &self.parameters
    }

    pub fn get(&self, name: &str) -> Option<&WorkflowParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
