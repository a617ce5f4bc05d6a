//! Physical and mathematical constants.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Mathematical constants

pub const PI: fcn = std::f64::consts::PI;

// Physical constants (CGS-Gaussian)

/// Speed of light in vacuum [cm/s].
pub const CLIGHT: fcn = 2.997_924_58e10;
/// Electron charge [esu].
pub const Q_ELECTRON: fcn = 4.803_204_5e-10;
/// Electron mass [g].
pub const M_ELECTRON: fcn = 9.109_383_56e-28;
/// Boltzmann constant [erg/K].
pub const KBOLTZMANN: fcn = 1.380_648_52e-16;
/// Second radiation constant hc/k [cm K].
pub const C2_RADIATION: fcn = 1.438_777_353_827_720_2;
/// Inverse Boltzmann constant in spectroscopic units, k/hc rounded as
/// conventionally used for level populations [cm^-1/K].
pub const KBOLTZMANN_WAVENUMBER: fcn = 0.695;

// Unit conversion factors

/// Conversion factor from nanometers to Ångström.
pub const NM_TO_ANGSTROM: fcn = 10.0;
/// Conversion factor from Ångström to micrometers.
pub const ANGSTROM_TO_MICRON: fcn = 1e-4;
/// Wavenumber [cm^-1] of a wavelength of one Ångström.
pub const ANGSTROM_TO_WAVENUMBER: fcn = 1e8;
/// Conversion factor from electron volts to wavenumbers [cm^-1].
pub const EV_TO_WAVENUMBER: fcn = 8_065.543_937;
/// Conversion factor from atmospheres to bar.
pub const ATM_TO_BAR: fcn = 1.013_25;
/// Conversion factor from bar to dynes per square centimeter.
pub const BAR_TO_DYNE_CM2: fcn = 1e6;

// Line list conventions

/// Reference temperature for tabulated line strengths [K].
pub const T_REF: fcn = 296.0;
/// Placeholder temperature exponent of pressure broadening (not a measured value).
pub const DEFAULT_TDPAIR: fcn = 0.68;
/// Air wavelengths [nm] below this limit are tabulated as vacuum wavelengths.
pub const VACUUM_WAVELENGTH_LIMIT_NM: fcn = 200.0;
