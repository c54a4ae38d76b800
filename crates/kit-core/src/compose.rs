//! Launch composition.
//!
//! Composition gathers every settings source and dependency declaration
//! for a launch, merges them in precedence order, and resolves the result
//! into a [`LaunchPlan`]. Sources, lowest precedence first:
//!
//! 1. each manifest in the order given, its generated part already
//!    overlaid on its hand part;
//! 2. the per-user overlay file, if one exists.
//!
//! The first manifest is the app itself; later ones are add-on overlays.
//! The user overlay is a manifest part like any other, so a user can
//! override settings or disable an extension without touching the app.
//!
//! The version lock is read from the final merged tree rather than from
//! any single file. In practice it comes from the app manifest's generated
//! part, but an overlay that rewrites `app.exts.locked` is honored, which
//! keeps the lock an ordinary setting instead of a special case.

use std::path::PathBuf;

use kit_manifest::{AppManifest, ExtensionDependency, LockTable, ManifestPart};
use kit_resolver::{resolve, ExtensionRegistry};
use kit_settings::{merge_all, SettingsNode};

use crate::error::{Error, Result};
use crate::plan::LaunchPlan;

/// Name of the per-user overlay file, looked up under the platform config
/// directory.
const USER_OVERLAY_FILE: &str = "user.kit";
const USER_OVERLAY_DIR: &str = "kit";

/// Composes manifests, overlays and the user file into launch plans.
#[derive(Debug, Clone, Default)]
pub struct AppComposer {
    user_config_dir: Option<PathBuf>,
}

impl AppComposer {
    /// A composer using the platform config directory for the user overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// A composer reading the user overlay from under `dir` instead of the
    /// platform config directory. Keeps composition hermetic in tests.
    pub fn with_user_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            user_config_dir: Some(dir.into()),
        }
    }

    /// Composes a launch plan from `manifests`, lowest precedence first.
    /// The first manifest is the primary app; its package metadata names
    /// the plan.
    pub fn compose(
        &self,
        manifests: &[AppManifest],
        registry: &dyn ExtensionRegistry,
    ) -> Result<LaunchPlan> {
        let Some(primary) = manifests.first() else {
            return Err(Error::NoManifests);
        };

        let mut layers: Vec<SettingsNode> = Vec::new();
        let mut declared: Vec<ExtensionDependency> = Vec::new();
        for manifest in manifests {
            layers.push(manifest.settings());
            declared.extend(manifest.dependencies());
        }

        if let Some(user) = self.load_user_overlay()? {
            declared.extend(user.dependencies);
            layers.push(user.settings);
        }

        let settings = merge_all(layers);
        let lock = LockTable::from_settings(&settings)?;
        tracing::debug!(
            "Composing launch plan: {} manifests, {} declared dependencies, lock entries: {}",
            manifests.len(),
            declared.len(),
            lock.as_ref().map_or(0, LockTable::len)
        );

        let activations = resolve(&declared, lock.as_ref(), registry)?;

        let package = primary.package();
        Ok(LaunchPlan::new(
            package.and_then(|p| p.title.clone()),
            package.and_then(|p| p.version.clone()),
            settings,
            activations,
        ))
    }

    fn user_overlay_path(&self) -> Option<PathBuf> {
        let base = self.user_config_dir.clone().or_else(dirs::config_dir)?;
        Some(base.join(USER_OVERLAY_DIR).join(USER_OVERLAY_FILE))
    }

    fn load_user_overlay(&self) -> Result<Option<ManifestPart>> {
        let Some(path) = self.user_overlay_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!("No user overlay at {}", path.display());
            return Ok(None);
        }
        tracing::debug!("Loading user overlay from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|source| {
            kit_manifest::Error::Io {
                path: path.clone(),
                source,
            }
        })?;
        Ok(Some(ManifestPart::parse(&text)?))
    }
}
