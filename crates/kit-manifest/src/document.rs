//! Splitting manifests into their hand-written and generated parts.
//!
//! Tooling appends a machine-owned region to application manifests,
//! delimited by comment lines carrying literal markers:
//!
//! ```text
//! [package]
//! title = "My App"
//!
//! # BEGIN GENERATED PART
//! [settings.app.exts]
//! locked = ["omni.warp.core-1.5.0"]
//! # END GENERATED PART
//! ```
//!
//! The generated region is replaced wholesale when regenerated, never merged
//! key by key with hand edits. Marker detection is tolerant of decoration
//! (banner lines of `#`, trailing parentheticals) as long as the line is a
//! comment containing the marker text; writing always emits the canonical
//! bare form at the end of the file.

use crate::error::{Error, Result};

/// Text carried by a begin marker line.
pub const BEGIN_MARKER: &str = "BEGIN GENERATED PART";
/// Text carried by an end marker line.
pub const END_MARKER: &str = "END GENERATED PART";

/// A manifest's raw text, split at the generated-part markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSource {
    hand: String,
    generated: Option<String>,
}

fn is_marker(line: &str, marker: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('#') && trimmed.contains(marker)
}

impl ManifestSource {
    /// Splits raw manifest text at the generated-part markers.
    ///
    /// A manifest may carry at most one generated part. An unmatched begin
    /// or end marker is an error rather than a guess at the writer's intent.
    pub fn split(text: &str) -> Result<Self> {
        let mut hand_lines: Vec<&str> = Vec::new();
        let mut generated_lines: Vec<&str> = Vec::new();
        let mut in_generated = false;
        let mut seen_part = false;

        for line in text.lines() {
            if is_marker(line, BEGIN_MARKER) {
                if in_generated || seen_part {
                    return Err(Error::MultipleGeneratedParts);
                }
                in_generated = true;
            } else if is_marker(line, END_MARKER) {
                if !in_generated {
                    return Err(Error::DanglingMarker { marker: END_MARKER });
                }
                in_generated = false;
                seen_part = true;
            } else if in_generated {
                generated_lines.push(line);
            } else {
                hand_lines.push(line);
            }
        }

        if in_generated {
            return Err(Error::DanglingMarker {
                marker: BEGIN_MARKER,
            });
        }

        Ok(Self {
            hand: hand_lines.join("\n"),
            generated: seen_part.then(|| generated_lines.join("\n")),
        })
    }

    /// The hand-written text, markers and generated content removed.
    pub fn hand(&self) -> &str {
        &self.hand
    }

    /// The generated part's body, if the manifest has one.
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// Renders the full manifest with `body` as the generated part, placed
    /// at the end of the file behind canonical markers.
    pub fn with_generated(&self, body: &str) -> String {
        render_with_generated(&self.hand, body)
    }
}

/// Renders hand-written text followed by a canonical generated part.
pub(crate) fn render_with_generated(hand: &str, body: &str) -> String {
    let mut out = hand.trim_end().to_string();
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str("# ");
    out.push_str(BEGIN_MARKER);
    out.push('\n');
    let body = body.trim();
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out.push_str("# ");
    out.push_str(END_MARKER);
    out.push('\n');
    out
}
