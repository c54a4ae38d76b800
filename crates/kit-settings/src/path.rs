//! Dotted key paths with quoted segments.
//!
//! Settings keys are addressed with dotted paths. Because extension names
//! themselves contain dots (`omni.kit.renderer.core`), a path segment may be
//! wrapped in double quotes to keep it intact:
//!
//! ```text
//! exts."omni.kit.renderer.core".enabled
//! ```
//!
//! parses into the three segments `exts`, `omni.kit.renderer.core` and
//! `enabled`.

use crate::error::{Error, Result};

/// A parsed dotted key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingsPath {
    segments: Vec<String>,
}

impl SettingsPath {
    /// Parses a dotted path, honouring double-quoted segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use kit_settings::SettingsPath;
    ///
    /// let path = SettingsPath::parse("exts.\"omni.warp.core\".enabled").unwrap();
    /// assert_eq!(path.segments(), ["exts", "omni.warp.core", "enabled"]);
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty".to_string(),
            });
        }

        let mut segments = Vec::new();
        let mut chars = raw.chars().peekable();

        loop {
            let segment = if chars.peek() == Some(&'"') {
                chars.next();
                let mut quoted = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => quoted.push(c),
                        None => {
                            return Err(Error::InvalidPath {
                                path: raw.to_string(),
                                reason: "unterminated quoted segment".to_string(),
                            });
                        }
                    }
                }
                quoted
            } else {
                let mut bare = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '.' {
                        break;
                    }
                    if c == '"' {
                        return Err(Error::InvalidPath {
                            path: raw.to_string(),
                            reason: "quote inside unquoted segment".to_string(),
                        });
                    }
                    bare.push(c);
                    chars.next();
                }
                bare
            };

            if segment.is_empty() {
                return Err(Error::InvalidPath {
                    path: raw.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }
            segments.push(segment);

            match chars.next() {
                None => break,
                Some('.') => {
                    if chars.peek().is_none() {
                        return Err(Error::InvalidPath {
                            path: raw.to_string(),
                            reason: "trailing dot".to_string(),
                        });
                    }
                }
                Some(c) => {
                    return Err(Error::InvalidPath {
                        path: raw.to_string(),
                        reason: format!("unexpected character '{c}' after segment"),
                    });
                }
            }
        }

        Ok(Self { segments })
    }

    /// Builds a path from pre-split segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The individual key segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Appends a segment, returning the extended path.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Renders a single segment, quoting it when it contains a dot.
    pub fn display_segment(segment: &str) -> String {
        if segment.contains('.') || segment.is_empty() {
            format!("\"{segment}\"")
        } else {
            segment.to_string()
        }
    }
}

impl std::fmt::Display for SettingsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .segments
            .iter()
            .map(|s| Self::display_segment(s))
            .collect();
        write!(f, "{}", rendered.join("."))
    }
}
