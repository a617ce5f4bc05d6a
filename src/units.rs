//! Physical units and conversions between them.

pub mod spectroscopic;

/// Floating-point precision to use for units.
#[allow(non_camel_case_types)]
pub type fun = f64;
