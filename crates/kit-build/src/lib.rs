//! Packaging declarations.
//!
//! The build step needs to know two things: which manifests constitute
//! shippable apps, and which directories get linked or copied into the
//! package layout. Both are pure declarations gathered into a [`BuildPlan`]
//! that the packaging tooling consumes; nothing here touches the
//! filesystem.
//!
//! ```
//! use kit_build::{BuildPlan, LinkKind};
//!
//! let mut plan = BuildPlan::new();
//! plan.register_app("warp_viewer", "apps/warp_viewer.kit").unwrap();
//! plan.declare_link("exts", "_build/exts", LinkKind::Link);
//! assert_eq!(plan.apps().len(), 1);
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Two apps registered under the same name.
    #[error("app '{name}' is already registered")]
    DuplicateApp { name: String },

    /// Rendering the plan to TOML failed.
    #[error("failed to serialize build plan: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a directory enters the package layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Symlink into the build tree; edits show up without repackaging.
    Link,
    /// Copy into the build tree.
    Copy,
}

/// A named app and the manifest that defines it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub name: String,
    pub manifest: PathBuf,
}

/// A directory mapping into the package layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: LinkKind,
}

/// Everything the packaging step consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    apps: Vec<AppEntry>,
    links: Vec<LinkEntry>,
}

impl BuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named app by its manifest path. Names are unique.
    pub fn register_app(&mut self, name: impl Into<String>, manifest: impl AsRef<Path>) -> Result<()> {
        let name = name.into();
        if self.apps.iter().any(|app| app.name == name) {
            return Err(Error::DuplicateApp { name });
        }
        self.apps.push(AppEntry {
            name,
            manifest: manifest.as_ref().to_path_buf(),
        });
        Ok(())
    }

    /// Declares a directory link or copy into the package layout.
    pub fn declare_link(
        &mut self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        kind: LinkKind,
    ) {
        self.links.push(LinkEntry {
            source: source.as_ref().to_path_buf(),
            target: target.as_ref().to_path_buf(),
            kind,
        });
    }

    /// Registered apps, in registration order.
    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    /// Declared directory mappings, in declaration order.
    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    pub fn app(&self, name: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// Renders the plan as TOML for the packaging tooling.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
