//! Tables of atomic spectral line data.

pub mod broadening;
pub mod normalization;

use crate::constants::{CLIGHT, C2_RADIATION, PI, T_REF};
use ndarray::{Array1, Zip};
use std::borrow::Cow;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Floating-point precision to use for line data.
#[allow(non_camel_case_types)]
pub type fln = f64;

/// Names of the columns every line table provides.
pub const REQUIRED_COLUMN_NAMES: [&str; 15] = [
    "A", "wav", "El", "eupper", "gu", "jlower", "ju", "id", "ionE", "iso", "gamRad", "gamSta",
    "gamvdW", "Tdpair", "shft",
];

/// Names of columns of richer line list formats that Kurucz files do not fill.
///
/// They are provided as zeros.
pub const AUXILIARY_COLUMN_NAMES: [&str; 19] = [
    "labellower",
    "labelupper",
    "ref",
    "NLTElower",
    "NLTEupper",
    "hyperfrac",
    "isonumdi",
    "isofrac",
    "hypershiftlower",
    "hypershiftupper",
    "hyperFlower",
    "hypernotelower",
    "hyperFupper",
    "hypternoteupper",
    "strenclass",
    "auto",
    "landeglower",
    "landegupper",
    "isoshiftmA",
];

/// Line data for a single atomic species, ordered by descending wavenumber.
///
/// All per-line columns have the same length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct LineTable {
    einstein_coefficients: Array1<fln>,
    wavenumbers: Array1<fln>,
    lower_energies: Array1<fln>,
    upper_energies: Array1<fln>,
    upper_weights: Array1<fln>,
    lower_j: Array1<fln>,
    upper_j: Array1<fln>,
    air_wavelengths: Array1<fln>,
    log_gf: Array1<fln>,
    species_codes: Vec<String>,
    isotope_numbers: Array1<i32>,
    log_gamma_rad: Array1<fln>,
    log_gamma_stark: Array1<fln>,
    log_gamma_vdw: Array1<fln>,
    shifts: Array1<fln>,
    atomic_number: u32,
    ionization_energy: fln,
    tdpair: fln,
    air_broadening: Option<Array1<fln>>,
    lorentzian_hwhm: Option<Array1<fln>>,
}

/// Per-line columns of a line table, used to construct one.
#[derive(Clone, Debug)]
pub struct LineColumns {
    pub einstein_coefficients: Array1<fln>,
    pub wavenumbers: Array1<fln>,
    pub lower_energies: Array1<fln>,
    pub upper_energies: Array1<fln>,
    pub upper_weights: Array1<fln>,
    pub lower_j: Array1<fln>,
    pub upper_j: Array1<fln>,
    pub air_wavelengths: Array1<fln>,
    pub log_gf: Array1<fln>,
    pub species_codes: Vec<String>,
    pub isotope_numbers: Array1<i32>,
    pub log_gamma_rad: Array1<fln>,
    pub log_gamma_stark: Array1<fln>,
    pub log_gamma_vdw: Array1<fln>,
}

impl LineTable {
    /// Creates a new line table from the given columns and per-species values.
    ///
    /// Rows are kept in the given order and no line shifts are assigned.
    ///
    /// # Panics
    ///
    /// If the columns have different lengths.
    pub fn new(columns: LineColumns, atomic_number: u32, ionization_energy: fln, tdpair: fln) -> Self {
        let n_lines = columns.wavenumbers.len();
        let lengths = [
            columns.einstein_coefficients.len(),
            columns.lower_energies.len(),
            columns.upper_energies.len(),
            columns.upper_weights.len(),
            columns.lower_j.len(),
            columns.upper_j.len(),
            columns.air_wavelengths.len(),
            columns.log_gf.len(),
            columns.species_codes.len(),
            columns.isotope_numbers.len(),
            columns.log_gamma_rad.len(),
            columns.log_gamma_stark.len(),
            columns.log_gamma_vdw.len(),
        ];
        assert!(
            lengths.iter().all(|&len| len == n_lines),
            "Line table columns have different lengths"
        );

        Self {
            einstein_coefficients: columns.einstein_coefficients,
            wavenumbers: columns.wavenumbers,
            lower_energies: columns.lower_energies,
            upper_energies: columns.upper_energies,
            upper_weights: columns.upper_weights,
            lower_j: columns.lower_j,
            upper_j: columns.upper_j,
            air_wavelengths: columns.air_wavelengths,
            log_gf: columns.log_gf,
            species_codes: columns.species_codes,
            isotope_numbers: columns.isotope_numbers,
            log_gamma_rad: columns.log_gamma_rad,
            log_gamma_stark: columns.log_gamma_stark,
            log_gamma_vdw: columns.log_gamma_vdw,
            shifts: Array1::zeros(n_lines),
            atomic_number,
            ionization_energy,
            tdpair,
            air_broadening: None,
            lorentzian_hwhm: None,
        }
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.wavenumbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Einstein coefficients for spontaneous emission [1/s].
    pub fn einstein_coefficients(&self) -> &Array1<fln> {
        &self.einstein_coefficients
    }

    /// Vacuum wavenumbers [1/cm].
    pub fn wavenumbers(&self) -> &Array1<fln> {
        &self.wavenumbers
    }

    /// Energies of the lower levels [1/cm].
    pub fn lower_energies(&self) -> &Array1<fln> {
        &self.lower_energies
    }

    /// Energies of the upper levels [1/cm].
    pub fn upper_energies(&self) -> &Array1<fln> {
        &self.upper_energies
    }

    /// Statistical weights of the upper levels.
    pub fn upper_weights(&self) -> &Array1<fln> {
        &self.upper_weights
    }

    pub fn lower_j(&self) -> &Array1<fln> {
        &self.lower_j
    }

    pub fn upper_j(&self) -> &Array1<fln> {
        &self.upper_j
    }

    /// Wavelengths as tabulated in the line list [nm].
    pub fn air_wavelengths(&self) -> &Array1<fln> {
        &self.air_wavelengths
    }

    pub fn log_gf(&self) -> &Array1<fln> {
        &self.log_gf
    }

    pub fn species_codes(&self) -> &[String] {
        &self.species_codes
    }

    pub fn isotope_numbers(&self) -> &Array1<i32> {
        &self.isotope_numbers
    }

    pub fn log_gamma_rad(&self) -> &Array1<fln> {
        &self.log_gamma_rad
    }

    pub fn log_gamma_stark(&self) -> &Array1<fln> {
        &self.log_gamma_stark
    }

    pub fn log_gamma_vdw(&self) -> &Array1<fln> {
        &self.log_gamma_vdw
    }

    /// Line shifts [1/cm].
    pub fn shifts(&self) -> &Array1<fln> {
        &self.shifts
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    /// Ionization energy of the species [eV].
    pub fn ionization_energy(&self) -> fln {
        self.ionization_energy
    }

    /// Temperature exponent of pressure broadening.
    pub fn tdpair(&self) -> fln {
        self.tdpair
    }

    pub fn air_broadening(&self) -> Option<&Array1<fln>> {
        self.air_broadening.as_ref()
    }

    /// Lorentzian half widths at half maximum [1/cm].
    pub fn lorentzian_hwhm(&self) -> Option<&Array1<fln>> {
        self.lorentzian_hwhm.as_ref()
    }

    /// Returns the numerical column with the given name.
    ///
    /// Per-species values are repeated for every line, and integer columns are
    /// converted to floating point.
    pub fn column(&self, name: &str) -> Option<Cow<'_, Array1<fln>>> {
        let n_lines = self.len();
        let filled = |value: fln| Some(Cow::Owned(Array1::from_elem(n_lines, value)));
        match name {
            "A" => Some(Cow::Borrowed(&self.einstein_coefficients)),
            "wav" => Some(Cow::Borrowed(&self.wavenumbers)),
            "El" => Some(Cow::Borrowed(&self.lower_energies)),
            "eupper" => Some(Cow::Borrowed(&self.upper_energies)),
            "gu" => Some(Cow::Borrowed(&self.upper_weights)),
            "jlower" => Some(Cow::Borrowed(&self.lower_j)),
            "ju" => Some(Cow::Borrowed(&self.upper_j)),
            "orig_wavelen" | "wlnmair" => Some(Cow::Borrowed(&self.air_wavelengths)),
            "loggf" => Some(Cow::Borrowed(&self.log_gf)),
            "iso" | "isonum" => Some(Cow::Owned(self.isotope_numbers.mapv(fln::from))),
            "gamRad" => Some(Cow::Borrowed(&self.log_gamma_rad)),
            "gamSta" => Some(Cow::Borrowed(&self.log_gamma_stark)),
            "gamvdW" => Some(Cow::Borrowed(&self.log_gamma_vdw)),
            "shft" => Some(Cow::Borrowed(&self.shifts)),
            "id" => filled(fln::from(self.atomic_number)),
            "ionE" => filled(self.ionization_energy),
            "Tdpair" => filled(self.tdpair),
            "airbrd" => self.air_broadening.as_ref().map(Cow::Borrowed),
            "hwhm_lorentz" => self.lorentzian_hwhm.as_ref().map(Cow::Borrowed),
            name if AUXILIARY_COLUMN_NAMES.contains(&name) => filled(0.0),
            _ => None,
        }
    }

    /// Whether `column` provides a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Returns the indices of the lines satisfying the given predicate.
    pub fn row_indices_where<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(&Self, usize) -> bool,
    {
        (0..self.len())
            .filter(|&idx| predicate(self, idx))
            .collect()
    }

    /// Creates a new table with the lines at the given indices.
    ///
    /// Lines keep their relative order, so the new table is also ordered by
    /// descending wavenumber. Repeated indices select a line once.
    ///
    /// # Panics
    ///
    /// If any index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut sorted_indices = indices.to_vec();
        sorted_indices.sort_unstable();
        sorted_indices.dedup();
        self.reordered_rows(&sorted_indices)
    }

    /// Creates a new table with the lines at the given indices, in the given order.
    ///
    /// # Panics
    ///
    /// If any index is out of bounds.
    pub(crate) fn reordered_rows(&self, indices: &[usize]) -> Self {
        let select = |values: &Array1<fln>| -> Array1<fln> {
            indices.iter().map(|&idx| values[idx]).collect()
        };
        Self {
            einstein_coefficients: select(&self.einstein_coefficients),
            wavenumbers: select(&self.wavenumbers),
            lower_energies: select(&self.lower_energies),
            upper_energies: select(&self.upper_energies),
            upper_weights: select(&self.upper_weights),
            lower_j: select(&self.lower_j),
            upper_j: select(&self.upper_j),
            air_wavelengths: select(&self.air_wavelengths),
            log_gf: select(&self.log_gf),
            species_codes: indices
                .iter()
                .map(|&idx| self.species_codes[idx].clone())
                .collect(),
            isotope_numbers: indices.iter().map(|&idx| self.isotope_numbers[idx]).collect(),
            log_gamma_rad: select(&self.log_gamma_rad),
            log_gamma_stark: select(&self.log_gamma_stark),
            log_gamma_vdw: select(&self.log_gamma_vdw),
            shifts: select(&self.shifts),
            atomic_number: self.atomic_number,
            ionization_energy: self.ionization_energy,
            tdpair: self.tdpair,
            air_broadening: self.air_broadening.as_ref().map(select),
            lorentzian_hwhm: self.lorentzian_hwhm.as_ref().map(select),
        }
    }

    /// Creates a new table with the lines inside the given wavenumber interval [1/cm].
    pub fn select_wavenumber_range(&self, min_wavenumber: fln, max_wavenumber: fln) -> Self {
        let indices = self.row_indices_where(|table, idx| {
            let wavenumber = table.wavenumbers[idx];
            wavenumber >= min_wavenumber && wavenumber <= max_wavenumber
        });
        self.select_rows(&indices)
    }

    /// Computes line strengths at the reference temperature of 296 K.
    ///
    /// # Parameters
    ///
    /// - `partition_function`: Partition function of the species at 296 K.
    ///
    /// # Returns
    ///
    /// The line strength of each line [cm/molecule].
    pub fn reference_line_strengths(&self, partition_function: fln) -> Array1<fln> {
        let mut strengths = Array1::zeros(self.len());
        Zip::from(&mut strengths)
            .and(&self.einstein_coefficients)
            .and(&self.upper_weights)
            .and(&self.wavenumbers)
            .and(&self.lower_energies)
            .for_each(|strength, &a, &g, &nu, &el| {
                *strength = -a
                    * g
                    * fln::exp(-C2_RADIATION * el / T_REF)
                    * fln::exp_m1(-C2_RADIATION * nu / T_REF)
                    / (8.0 * PI * CLIGHT * nu * nu * partition_function);
            });
        strengths
    }

    pub(crate) fn set_air_broadening(&mut self, air_broadening: Array1<fln>) {
        assert_eq!(air_broadening.len(), self.len());
        self.air_broadening = Some(air_broadening);
    }

    pub(crate) fn set_lorentzian_broadening(
        &mut self,
        hwhm: Array1<fln>,
        shifts: Option<Array1<fln>>,
    ) {
        assert_eq!(hwhm.len(), self.len());
        self.lorentzian_hwhm = Some(hwhm);
        if let Some(shifts) = shifts {
            assert_eq!(shifts.len(), self.len());
            self.shifts = shifts;
        }
    }
}
