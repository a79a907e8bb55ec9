//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded dataset (`Trace`) and its summary stats (`TraceStats`)
//! - parameter-table rows (`PeakRow`)
//! - the saved-curve JSON schema (`CurveFile`, `CurveGrid`)

pub mod types;

pub use types::*;
