//! Conversion of decoded line list data into normalized line tables.

use super::{fln, LineColumns, LineTable};
use crate::{
    constants::{fcn, CLIGHT, DEFAULT_TDPAIR, M_ELECTRON, PI, Q_ELECTRON},
    io::kurucz::RawLineList,
    reference::ionization::IonizationEnergyTable,
    units::spectroscopic::{
        angstrom_to_wavenumber, ev_to_wavenumber, refraction_is_extrapolated,
        tabulated_nm_to_vacuum_angstrom,
    },
};
use ndarray::{Array1, Zip};
use std::io;

/// Physical constants entering the derived line quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Speed of light [cm/s].
    pub speed_of_light: fcn,
    /// Elementary charge [esu].
    pub electron_charge: fcn,
    /// Electron mass [g].
    pub electron_mass: fcn,
}

impl PhysicalConstants {
    /// Constants in the CGS-Gaussian system.
    pub const CGS: Self = Self {
        speed_of_light: CLIGHT,
        electron_charge: Q_ELECTRON,
        electron_mass: M_ELECTRON,
    };

    /// Computes the Einstein coefficient for spontaneous emission [1/s] of a line.
    ///
    /// # Parameters
    ///
    /// - `log_gf`: Base-10 logarithm of the weighted oscillator strength.
    /// - `upper_weight`: Statistical weight of the upper level.
    /// - `wavenumber`: Vacuum wavenumber of the line [1/cm].
    pub fn einstein_coefficient(&self, log_gf: fln, upper_weight: fln, wavenumber: fln) -> fln {
        let c = self.speed_of_light;
        let e = self.electron_charge;
        fln::powf(10.0, log_gf) / upper_weight * (c * wavenumber).powi(2)
            * (8.0 * PI * PI * e * e)
            / (self.electron_mass * c.powi(3))
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::CGS
    }
}

/// Unit of the level energies in a line list file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LevelEnergyUnit {
    /// Wavenumbers [1/cm], as in the Kurucz files.
    #[default]
    Wavenumber,
    ElectronVolt,
}

/// Converter of decoded line lists into line tables.
#[derive(Clone, Debug, Default)]
pub struct LineNormalizer {
    constants: PhysicalConstants,
    level_energy_unit: LevelEnergyUnit,
}

impl LineNormalizer {
    pub fn new(constants: PhysicalConstants, level_energy_unit: LevelEnergyUnit) -> Self {
        Self {
            constants,
            level_energy_unit,
        }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Derives a normalized line table from the given decoded line list.
    ///
    /// Levels are ordered so that the lower level has the lower energy, tabulated
    /// wavelengths are converted to vacuum wavenumbers, and the lines are ordered
    /// by descending wavenumber.
    ///
    /// The lines are sorted by wavenumber rather than reversed from file order,
    /// so the result does not depend on how the file is ordered.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains the new `LineTable`.
    /// - `Err`: The ionization energy of the species could not be determined.
    pub fn normalize(
        &self,
        raw_lines: &RawLineList,
        ionization_energies: &IonizationEnergyTable,
    ) -> io::Result<LineTable> {
        let ionization_energy = ionization_energies
            .lookup(raw_lines.element_code(), raw_lines.ionization_stage())?;

        let to_wavenumber = |energy: fln| match self.level_energy_unit {
            LevelEnergyUnit::Wavenumber => energy,
            LevelEnergyUnit::ElectronVolt => ev_to_wavenumber(energy),
        };
        let mut lower_energies = raw_lines.lower_energies.mapv(to_wavenumber);
        let mut upper_energies = raw_lines.upper_energies.mapv(to_wavenumber);
        let mut lower_j = raw_lines.lower_j.clone();
        let mut upper_j = raw_lines.upper_j.clone();

        Zip::from(&mut lower_energies)
            .and(&mut upper_energies)
            .and(&mut lower_j)
            .and(&mut upper_j)
            .for_each(|el, eu, jl, ju| {
                if !(*eu - *el > 0.0) {
                    std::mem::swap(el, eu);
                    std::mem::swap(jl, ju);
                }
            });

        let n_extrapolated = raw_lines
            .air_wavelengths
            .iter()
            .filter(|&&wavelength| refraction_is_extrapolated(wavelength))
            .count();
        if n_extrapolated > 0 {
            log::warn!(
                "Air to vacuum conversion applied outside its validity range for {} lines",
                n_extrapolated
            );
        }
        let wavenumbers = raw_lines
            .air_wavelengths
            .mapv(|wavelength| angstrom_to_wavenumber(tabulated_nm_to_vacuum_angstrom(wavelength)));

        let upper_weights = upper_j.mapv(|j| 2.0 * j + 1.0);

        let mut einstein_coefficients = Array1::zeros(raw_lines.len());
        Zip::from(&mut einstein_coefficients)
            .and(&raw_lines.log_gf)
            .and(&upper_weights)
            .and(&wavenumbers)
            .for_each(|a, &log_gf, &gu, &nu| {
                *a = self.constants.einstein_coefficient(log_gf, gu, nu);
            });

        let table = LineTable::new(
            LineColumns {
                einstein_coefficients,
                wavenumbers,
                lower_energies,
                upper_energies,
                upper_weights,
                lower_j,
                upper_j,
                air_wavelengths: raw_lines.air_wavelengths.clone(),
                log_gf: raw_lines.log_gf.clone(),
                species_codes: raw_lines.species_codes.clone(),
                isotope_numbers: raw_lines.isotope_numbers.clone(),
                log_gamma_rad: raw_lines.log_gamma_rad.clone(),
                log_gamma_stark: raw_lines.log_gamma_stark.clone(),
                log_gamma_vdw: raw_lines.log_gamma_vdw.clone(),
            },
            raw_lines.element_code(),
            ionization_energy,
            DEFAULT_TDPAIR,
        );

        Ok(table.reordered_rows(&descending_wavenumber_order(table.wavenumbers())))
    }
}

/// Returns the row order giving descending wavenumbers.
///
/// Lines with equal wavenumbers end up in reverse file order.
fn descending_wavenumber_order(wavenumbers: &Array1<fln>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..wavenumbers.len()).rev().collect();
    indices.sort_by(|&a, &b| wavenumbers[b].total_cmp(&wavenumbers[a]));
    indices
}
