//! Mathematical utilities: smoothing, numerical derivatives, least squares.

pub mod deriv;
pub mod lsq;
pub mod savgol;

pub use deriv::*;
pub use lsq::*;
pub use savgol::*;
