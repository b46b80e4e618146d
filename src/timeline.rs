//! Timeline derivation: stage status, shipment assembly, and recalculation.

mod build;
mod classify;
mod recalc;

pub use build::build_all;
pub use recalc::recalculate;
