//! Settings tree model and overlay merge for Kit applications.
//!
//! Every configuration file in a Kit application ultimately contributes to a
//! single settings tree: string-keyed tables nested to arbitrary depth, with
//! scalar and array leaves. This crate owns that tree ([`SettingsNode`]) and
//! the overlay semantics used when several files target the same keys.
//!
//! Overlay files may request array concatenation instead of replacement by
//! wrapping the value in an append marker:
//!
//! ```toml
//! [settings.app.folders]
//! "++" = ["${app}/extra"]
//! ```
//!
//! Merging an overlay that carries the marker onto a base array appends the
//! new elements after the existing ones. The marker is consumed by the merge,
//! so the result of [`merge`] is always a plain tree that can be serialized
//! back out or merged again as a base.
//!
//! Dotted key paths such as `exts."omni.kit.renderer.core".enabled` address
//! individual values inside the tree; [`SettingsPath`] handles the quoting
//! rules needed for key segments that themselves contain dots.

mod error;
mod merge;
mod node;
mod path;
mod value;

pub use error::{Error, Result};
pub use merge::{merge, merge_all, normalize};
pub use node::SettingsNode;
pub use path::SettingsPath;
pub use value::SettingsValue;

/// Key that marks a table as an array-append request in an overlay.
pub const APPEND_KEY: &str = "++";
