//! Viewport capture planning.
//!
//! Image parameters bind a render buffer to a scene path; before a
//! conditioning pass runs, every such binding becomes one capture request.
//! Only a fixed set of buffers can actually be captured from the viewport;
//! bindings to anything else are logged and dropped rather than failing
//! the whole workflow, since the remaining inputs are still usable.

use crate::schema::{ParameterKind, VisibilityRule, WorkflowDocument};

/// Render buffers the viewport can capture.
pub const SUPPORTED_BUFFERS: [&str; 3] = ["LdrColor", "DepthLinearized", "SmoothNormal"];

/// One buffer capture to perform before inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub buffer: String,
    pub label: String,
    pub path: String,
    pub visibility: VisibilityRule,
}

/// The ordered capture list derived from a workflow document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturePlan {
    requests: Vec<CaptureRequest>,
}

impl CapturePlan {
    /// Collects capture requests from a document's image parameters, in
    /// document order.
    pub fn from_document(document: &WorkflowDocument) -> Self {
        let mut requests = Vec::new();
        for parameter in document.parameters() {
            if parameter.kind != ParameterKind::Image {
                continue;
            }
            // validation guarantees image parameters carry both bindings
            let (Some(buffer), Some(path)) = (&parameter.buffer, &parameter.path) else {
                continue;
            };
            if !SUPPORTED_BUFFERS.contains(&buffer.as_str()) {
                tracing::error!(
                    "Unsupported capture buffer {} for parameter {}, skipping",
                    buffer,
                    parameter.name
                );
                continue;
            }
            requests.push(CaptureRequest {
                buffer: buffer.clone(),
                label: parameter.display_label().to_string(),
                path: path.clone(),
                visibility: parameter.visibility,
            });
        }
        Self { requests }
    }

    pub fn requests(&self) -> &[CaptureRequest] {
        &self.requests
    }

    /// Distinct buffers to capture, in first-seen order. Two parameters may
    /// bind the same buffer; it is only captured once.
    pub fn buffers(&self) -> Vec<&str> {
        let mut buffers: Vec<&str> = Vec::new();
        for request in &self.requests {
            if !buffers.contains(&request.buffer.as_str()) {
                buffers.push(request.buffer.as_str());
            }
        }
        buffers
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
