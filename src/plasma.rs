//! Thermodynamic state of the absorbing gas.

pub mod populations;

/// Floating-point precision to use for plasma physics.
#[allow(non_camel_case_types)]
pub type fpl = f64;
