//! Launch composition for Kit applications.
//!
//! This crate ties the configuration stack together. Manifests are parsed
//! by `kit-manifest`, overlaid through `kit-settings`, resolved against a
//! registry by `kit-resolver`, and come out the other end as a
//! [`LaunchPlan`]:
//!
//! ```text
//!   app manifest ─┐
//!   add-on overlays ─┤→ settings layers ─→ merged tree ─┐
//!   user overlay ─┘                                     │
//!        │                                              ├─→ LaunchPlan
//!        └→ declared dependencies ─→ lock ─→ resolve ───┘
//! ```
//!
//! The plan is an immutable value handed to whatever runs the app; nothing
//! here keeps global state, so composition is fully testable in isolation.

mod compose;
mod error;
mod plan;

pub use compose::AppComposer;
pub use error::{Error, Result};
pub use plan::LaunchPlan;
