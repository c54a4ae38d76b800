//! Integration tests for workflow parameter loading
//!
//! These tests exercise the on-disk flow: parameter document loading ->
//! validation -> capture planning.

use kit_workflow::{CapturePlan, Error, VisibilityRule, WorkflowDocument};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Set up a workflow directory with an uplift parameter document.
fn setup_workflow_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let params_path = temp.path().join("uplift_params.json");
    fs::write(
        &params_path,
        r#"[
    { "name": "prompt", "type": "string", "default": "" },
    { "name": "strength", "type": "float", "default": 0.75 },
    { "name": "seed", "type": "int", "default": 42 },
    {
        "name": "color_input",
        "label": "Color",
        "type": "image",
        "buffer": "LdrColor",
        "path": "/Render/Vars/color"
    },
    {
        "name": "normal_input",
        "type": "image",
        "buffer": "SmoothNormal",
        "path": "/Render/Vars/normal",
        "visibility": "hideothers"
    },
    {
        "name": "motion_input",
        "type": "image",
        "buffer": "MotionVectors",
        "path": "/Render/Vars/motion"
    }
]"#,
    )
    .unwrap();

    (temp, params_path)
}

#[test]
fn test_load_workflow_from_disk() {
    let (_temp, params_path) = setup_workflow_dir();
    let document = WorkflowDocument::from_path(&params_path).unwrap();

    assert_eq!(document.len(), 6);
    assert_eq!(document.get("color_input").unwrap().display_label(), "Color");
    assert_eq!(
        document.get("seed").unwrap().kind,
        kit_workflow::ParameterKind::Integer
    );
}

#[test]
fn test_capture_plan_covers_supported_buffers() {
    let (_temp, params_path) = setup_workflow_dir();
    let document = WorkflowDocument::from_path(&params_path).unwrap();
    let plan = CapturePlan::from_document(&document);

    // The MotionVectors binding is dropped; the rest capture in order
    let buffers: Vec<&str> = plan.requests().iter().map(|r| r.buffer.as_str()).collect();
    assert_eq!(buffers, ["LdrColor", "SmoothNormal"]);

    let normal = &plan.requests()[1];
    assert_eq!(normal.label, "normal_input");
    assert_eq!(normal.path, "/Render/Vars/normal");
    assert_eq!(normal.visibility, VisibilityRule::HideOthers);
}

#[test]
fn test_invalid_workflow_file_fails_loudly() {
    let temp = TempDir::new().unwrap();

    // Duplicate parameter names
    let path = temp.path().join("duplicates.json");
    fs::write(
        &path,
        r#"[
    { "name": "prompt", "type": "string" },
    { "name": "prompt", "type": "float" }
]"#,
    )
    .unwrap();
    let err = WorkflowDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::DuplicateParameter { name } if name == "prompt"));

    // Image parameter missing its buffer binding
    let path = temp.path().join("unbound.json");
    fs::write(
        &path,
        r#"[{ "name": "img", "type": "image", "path": "/Render/Vars/color" }]"#,
    )
    .unwrap();
    let err = WorkflowDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
}
