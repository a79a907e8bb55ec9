//! The fitting engine.
//!
//! Responsibilities:
//!
//! - refine a composite curve against observed data (`optimize_fit`)
//! - propose a fresh composite from raw data (`estimate_fit`)
//! - expose the error taxonomy callers must branch on (`FitError`)

pub mod error;
pub mod estimate;
pub mod optimize;

pub use error::*;
pub use estimate::*;
pub use optimize::*;
