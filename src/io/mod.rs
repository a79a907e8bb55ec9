//! Input/output helpers.
//!
//! - CSV trace ingest + validation (`ingest`)
//! - flat CSV exports, appended across sessions (`export`)
//! - curve JSON write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
