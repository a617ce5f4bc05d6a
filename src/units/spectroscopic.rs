//! Conversions between spectroscopic wavelength, wavenumber and energy units.

use super::fun;
use crate::constants::{
    ANGSTROM_TO_MICRON, ANGSTROM_TO_WAVENUMBER, EV_TO_WAVENUMBER, NM_TO_ANGSTROM,
    VACUUM_WAVELENGTH_LIMIT_NM,
};

/// Range of vacuum wavelengths [Å] where the dispersion formula of Ciddor (1996) is valid.
pub const CIDDOR_VALID_RANGE: (fun, fun) = (2300.0, 16900.0);

/// Computes the refractive index of standard air for the given wavelength [Å],
/// using the dispersion formula of Ciddor (1996).
pub fn air_refractive_index(wavelength: fun) -> fun {
    let sigma2 = (1.0 / (wavelength * ANGSTROM_TO_MICRON)).powi(2);
    1.0 + 0.057_921_05 / (238.0185 - sigma2) + 0.001_679_17 / (57.362 - sigma2)
}

/// Converts the given wavelength in air [Å] to the corresponding wavelength in vacuum [Å].
pub fn air_to_vacuum_wavelength(air_wavelength: fun) -> fun {
    air_wavelength * air_refractive_index(air_wavelength)
}

/// Converts a tabulated wavelength [nm] to a vacuum wavelength [Å].
///
/// Wavelengths below 200 nm are tabulated in vacuum already and are only rescaled.
pub fn tabulated_nm_to_vacuum_angstrom(wavelength_nm: fun) -> fun {
    let wavelength = wavelength_nm * NM_TO_ANGSTROM;
    if wavelength_nm < VACUUM_WAVELENGTH_LIMIT_NM {
        wavelength
    } else {
        air_to_vacuum_wavelength(wavelength)
    }
}

/// Whether the air-to-vacuum correction is applied to the given tabulated wavelength [nm]
/// outside the validity range of the dispersion formula.
pub fn refraction_is_extrapolated(wavelength_nm: fun) -> bool {
    let wavelength = wavelength_nm * NM_TO_ANGSTROM;
    wavelength_nm >= VACUUM_WAVELENGTH_LIMIT_NM
        && (wavelength < CIDDOR_VALID_RANGE.0 || wavelength > CIDDOR_VALID_RANGE.1)
}

/// Converts a wavelength [Å] to a wavenumber [cm^-1].
pub fn angstrom_to_wavenumber(wavelength: fun) -> fun {
    ANGSTROM_TO_WAVENUMBER / wavelength
}

/// Converts an energy [eV] to a wavenumber [cm^-1].
pub fn ev_to_wavenumber(energy: fun) -> fun {
    energy * EV_TO_WAVENUMBER
}
