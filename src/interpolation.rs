//! Interpolation of tabulated one-dimensional functions.

use num::Float;

/// Evaluates the piecewise linear interpolant of the tabulated function at the given coordinate.
///
/// Coordinates outside the tabulated range give the boundary value of the nearest end.
/// A NaN coordinate gives NaN.
///
/// # Parameters
///
/// - `coords`: Strictly increasing coordinates of the tabulated values.
/// - `values`: Tabulated function values.
/// - `interp_coord`: Coordinate where the interpolated value should be computed.
///
/// # Returns
///
/// The interpolated function value.
///
/// # Type parameters
///
/// - `F`: Floating point type of the data.
///
/// # Panics
///
/// If the tables are empty or have different lengths.
pub fn interp_linear_clamped<F: Float>(coords: &[F], values: &[F], interp_coord: F) -> F {
    assert_eq!(
        coords.len(),
        values.len(),
        "Number of coordinates and values differ"
    );
    assert!(!coords.is_empty(), "No tabulated values to interpolate");

    if interp_coord.is_nan() {
        return F::nan();
    }
    let last = coords.len() - 1;
    if interp_coord <= coords[0] {
        return values[0];
    }
    if interp_coord >= coords[last] {
        return values[last];
    }

    // Index of the first coordinate above the interpolation coordinate
    let upper = coords.partition_point(|&coord| coord <= interp_coord);
    let lower = upper - 1;

    let weight = (interp_coord - coords[lower]) / (coords[upper] - coords[lower]);
    values[lower] + weight * (values[upper] - values[lower])
}

/// Whether the given coordinates are strictly increasing.
pub fn is_strictly_increasing<F: Float>(coords: &[F]) -> bool {
    coords.windows(2).all(|pair| pair[0] < pair[1])
}
