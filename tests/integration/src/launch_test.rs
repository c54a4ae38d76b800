//! End-to-end integration tests for the launch flow
//!
//! These tests exercise the complete flow on disk: manifest parsing ->
//! settings composition -> dependency resolution -> lock write-back.

use kit_build::{BuildPlan, LinkKind};
use kit_core::AppComposer;
use kit_manifest::AppManifest;
use kit_resolver::MemoryRegistry;
use semver::Version;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Set up an app directory with a hand-written manifest and a generated
/// part carrying a version lock.
fn setup_app_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let apps_dir = temp.path().join("apps");
    fs::create_dir(&apps_dir).unwrap();

    let manifest_path = apps_dir.join("warp_viewer.kit");
    fs::write(
        &manifest_path,
        r#"
[package]
title = "Warp Viewer"
version = "1.0.0"

[dependencies]
"omni.warp.core" = {}
"omni.kit.renderer.core" = { version = "2.0", order = -100 }

[settings.app.window]
title = "Warp Viewer"
width = 1920

[settings.app.exts]
folders = ["${app}/../exts"]

# BEGIN GENERATED PART (Remove from file once you want to edit it)
[dependencies]
"omni.kit.telemetry" = {}

[settings.app.exts]
locked = ["omni.warp.core-1.5.0"]
# END GENERATED PART
"#,
    )
    .unwrap();

    (temp, manifest_path)
}

/// A registry publishing the versions the fixture manifest needs. The
/// locked extension is deliberately absent: locked versions must activate
/// without a registry lookup.
fn setup_registry() -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    registry.publish("omni.kit.telemetry", Version::new(0, 5, 0));
    registry.publish("omni.kit.telemetry", Version::new(1, 0, 0));
    registry
}

#[test]
fn test_compose_launch_plan_from_disk() {
    let (temp, manifest_path) = setup_app_dir();
    let manifest = AppManifest::from_path(&manifest_path).unwrap();
    let registry = setup_registry();

    let composer = AppComposer::with_user_config_dir(temp.path().join("config"));
    let plan = composer.compose(&[manifest], &registry).unwrap();

    assert_eq!(plan.title(), Some("Warp Viewer"));
    assert_eq!(plan.version(), Some("1.0.0"));

    // Settings merge the hand part with the generated part
    let width = plan.settings().get_path("app.window.width").unwrap().unwrap();
    assert_eq!(width.as_integer(), Some(1920));

    // Renderer first (order -100), then the default-order extensions in
    // declaration order
    let names: Vec<&str> = plan.activations().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        ["omni.kit.renderer.core", "omni.warp.core", "omni.kit.telemetry"]
    );

    // The locked version wins even though the registry never published it
    assert_eq!(
        plan.activation("omni.warp.core").unwrap().version,
        Version::new(1, 5, 0)
    );
    // Declared two-part versions normalize to three parts
    assert_eq!(
        plan.activation("omni.kit.renderer.core").unwrap().version,
        Version::new(2, 0, 0)
    );
    // Unpinned extensions take the highest published version
    assert_eq!(
        plan.activation("omni.kit.telemetry").unwrap().version,
        Version::new(1, 0, 0)
    );
}

#[test]
fn test_user_overlay_merges_last() {
    let (temp, manifest_path) = setup_app_dir();
    let manifest = AppManifest::from_path(&manifest_path).unwrap();
    let registry = setup_registry();

    let config_dir = temp.path().join("config");
    fs::create_dir_all(config_dir.join("kit")).unwrap();
    fs::write(
        config_dir.join("kit/user.kit"),
        r#"
[dependencies]
"omni.kit.telemetry" = { enabled = false }

[settings.app.window]
width = 3840

[settings.app.exts]
folders = { "++" = ["/home/user/exts"] }
"#,
    )
    .unwrap();

    let composer = AppComposer::with_user_config_dir(&config_dir);
    let plan = composer.compose(&[manifest], &registry).unwrap();

    // Scalar overrides win, appends extend the app's array
    let width = plan.settings().get_path("app.window.width").unwrap().unwrap();
    assert_eq!(width.as_integer(), Some(3840));
    let folders = plan.settings().get_path("app.exts.folders").unwrap().unwrap();
    let folders = folders.as_array().unwrap();
    assert_eq!(folders.len(), 2);
    assert_eq!(folders[1].as_str(), Some("/home/user/exts"));

    // The disabled extension stays declared but is never activated
    assert!(plan.activation("omni.kit.telemetry").is_none());
    assert_eq!(plan.activations().len(), 2);
}

#[test]
fn test_lock_write_back_pins_versions() {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("editor.kit");
    fs::write(
        &manifest_path,
        r#"
[package]
title = "Editor"
version = "0.1.0"

[dependencies]
"omni.warp.core" = {}
"#,
    )
    .unwrap();

    let mut registry = MemoryRegistry::new();
    registry.publish("omni.warp.core", Version::new(1, 5, 0));
    let composer = AppComposer::with_user_config_dir(temp.path().join("config"));

    // 1. First launch resolves from the registry
    let manifest = AppManifest::from_path(&manifest_path).unwrap();
    let plan = composer.compose(&[manifest.clone()], &registry).unwrap();
    assert_eq!(
        plan.activation("omni.warp.core").unwrap().version,
        Version::new(1, 5, 0)
    );

    // 2. Write the resolved versions back as the generated lock
    let rendered = manifest.with_lock(&plan.lock_table()).unwrap();
    fs::write(&manifest_path, &rendered).unwrap();
    assert!(rendered.contains("BEGIN GENERATED PART"));

    // 3. The registry moves on
    registry.publish("omni.warp.core", Version::new(2, 0, 0));

    // 4. The next launch reads the lock from disk and stays pinned
    let manifest = AppManifest::from_path(&manifest_path).unwrap();
    let plan = composer.compose(&[manifest], &registry).unwrap();
    assert_eq!(
        plan.activation("omni.warp.core").unwrap().version,
        Version::new(1, 5, 0)
    );
}

#[test]
fn test_unresolved_dependencies_fail_together() {
    let temp = TempDir::new().unwrap();
    let manifest = AppManifest::parse(
        r#"
[dependencies]
"omni.missing.a" = {}
"omni.missing.b" = {}
"#,
    )
    .unwrap();

    let composer = AppComposer::with_user_config_dir(temp.path());
    let err = composer
        .compose(&[manifest], &MemoryRegistry::new())
        .unwrap_err();

    // Both failures surface in one error
    let message = err.to_string();
    assert!(message.contains("omni.missing.a"));
    assert!(message.contains("omni.missing.b"));
    match err {
        kit_core::Error::Resolution(inner) => {
            assert_eq!(inner.failing_names(), ["omni.missing.a", "omni.missing.b"]);
        }
        other => panic!("expected resolution error, got {other}"),
    }
}

#[test]
fn test_full_launch_slice() {
    let (temp, manifest_path) = setup_app_dir();
    let registry = setup_registry();

    // 1. Parse the manifest from disk
    let manifest = AppManifest::from_path(&manifest_path).unwrap();
    assert_eq!(manifest.dependencies().len(), 3);

    // 2. Compose the launch plan
    let composer = AppComposer::with_user_config_dir(temp.path().join("config"));
    let plan = composer.compose(&[manifest.clone()], &registry).unwrap();
    assert_eq!(plan.activations().len(), 3);

    // 3. Refresh the lock on disk from the resolved plan
    let rendered = manifest.with_lock(&plan.lock_table()).unwrap();
    fs::write(&manifest_path, &rendered).unwrap();
    let reread = AppManifest::from_path(&manifest_path).unwrap();
    let lock = reread.lock().unwrap().unwrap();
    assert_eq!(lock.get("omni.kit.telemetry"), Some(&Version::new(1, 0, 0)));
    assert_eq!(lock.get("omni.warp.core"), Some(&Version::new(1, 5, 0)));

    // 4. Describe the packaged layout
    let mut build = BuildPlan::new();
    build.register_app("warp_viewer", &manifest_path).unwrap();
    build.declare_link("_build/exts", "exts", LinkKind::Link);
    let rendered = build.to_toml().unwrap();
    assert!(rendered.contains("[[apps]]"));
    assert!(rendered.contains("warp_viewer"));
    assert!(rendered.contains("[[links]]"));
}
