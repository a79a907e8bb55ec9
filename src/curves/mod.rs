//! The curve model: baseline + peaks, evaluated and fit as one unit.
//!
//! - `Curve` is a closed tagged union (`Constant`, `Gaussian`) exposing
//!   parameter access, evaluation and analytic partial derivatives
//! - `CompositeCurve` is an ordered collection fit over a single flat
//!   parameter vector

pub mod composite;
pub mod curve;

pub use composite::*;
pub use curve::*;
