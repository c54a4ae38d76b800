//! Workflow parameter schemas.
//!
//! AI-conditioning workflows expose a handful of typed inputs: prompt
//! strings, numeric strengths, and images captured from the viewport's
//! render buffers. Each workflow ships a JSON document describing those
//! inputs; this crate parses and validates it, and derives the capture
//! plan the viewport executes before inference.
//!
//! The document format is independent of app manifests and settings: one
//! file per workflow, no overlays, loaded once and handed to the external
//! UI/inference layer.

mod capture;
mod error;
mod schema;

pub use capture::{CapturePlan, CaptureRequest, SUPPORTED_BUFFERS};
pub use error::{Error, Result};
pub use schema::{ParameterKind, VisibilityRule, WorkflowDocument, WorkflowParameter};
