//! Pressure broadening parameters of spectral lines.

use super::{fln, LineTable};
use crate::constants::{ATM_TO_BAR, BAR_TO_DYNE_CM2, CLIGHT, KBOLTZMANN, PI, T_REF};
use ndarray::{Array1, Zip};
use std::{collections::HashMap, io};

/// Number density of neutral hydrogen entering the air broadening estimate.
///
/// Placeholder until the perturber density is taken from the gas state.
pub const NEUTRAL_HYDROGEN_NUMBER: fln = 1.0;

/// Scaling of the air broadening estimate for helium lines.
pub const HELIUM_BROADENING_COEFFICIENT: fln = 0.42;

/// Returns the species dependent factor of the air broadening estimate.
pub fn air_broadening_coefficient(element_symbol: &str) -> fln {
    match element_symbol {
        "He" => HELIUM_BROADENING_COEFFICIENT,
        _ => 1.0,
    }
}

/// Adds an estimate of the air broadening coefficient to the line table, unless
/// the table already has one.
///
/// The estimate is the van der Waals damping constant scaled with the
/// temperature exponent and a species dependent factor. This is a rough
/// approximation rather than a model of air broadening.
pub fn add_air_broadening(table: &mut LineTable, element_symbol: &str) {
    if table.air_broadening().is_some() {
        return;
    }
    let coefficient = air_broadening_coefficient(element_symbol);
    let tdpair = table.tdpair();
    let air_broadening = table
        .log_gamma_vdw()
        .mapv(|log_gamma| fln::powf(10.0, log_gamma) * tdpair * NEUTRAL_HYDROGEN_NUMBER * coefficient);
    table.set_air_broadening(air_broadening);
}

/// State of the gas in which the lines are formed.
#[derive(Clone, Debug, PartialEq)]
pub struct GasConditions {
    temperature: fln,
    pressure_atm: fln,
    diluent: HashMap<String, fln>,
}

impl GasConditions {
    /// Creates a new description of the gas state.
    ///
    /// # Parameters
    ///
    /// - `temperature`: Gas temperature [K].
    /// - `pressure_atm`: Total pressure [atm].
    /// - `diluent`: Mole fractions of the perturbing species, keyed by name
    /// (`"H"` for atomic hydrogen, `"e-"` for free electrons).
    pub fn new(
        temperature: fln,
        pressure_atm: fln,
        diluent: HashMap<String, fln>,
    ) -> io::Result<Self> {
        if !(temperature > 0.0) || !(pressure_atm >= 0.0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Invalid gas state with temperature {} K and pressure {} atm",
                    temperature, pressure_atm
                ),
            ));
        }
        Ok(Self {
            temperature,
            pressure_atm,
            diluent,
        })
    }

    pub fn temperature(&self) -> fln {
        self.temperature
    }

    pub fn pressure_atm(&self) -> fln {
        self.pressure_atm
    }

    /// Returns the mole fraction of the given diluent, if specified.
    pub fn diluent_fraction(&self, name: &str) -> Option<fln> {
        self.diluent.get(name).copied()
    }

    /// Computes the total number density of the gas [1/cm^3] from the ideal gas law.
    pub fn total_number_density(&self) -> fln {
        self.pressure_atm * ATM_TO_BAR * BAR_TO_DYNE_CM2 / (KBOLTZMANN * self.temperature)
    }
}

/// Lorentzian broadening of a set of lines.
#[derive(Clone, Debug, PartialEq)]
pub struct LorentzianBroadening {
    /// Half widths at half maximum [1/cm].
    pub hwhm: Array1<fln>,
    /// Line shifts [1/cm], if the model produces them.
    pub shifts: Option<Array1<fln>>,
}

/// Defines the properties of a model for the Lorentzian broadening of lines.
pub trait BroadeningModel {
    /// Computes the Lorentzian widths and shifts of the given lines in the given gas.
    fn compute_broadening(
        &self,
        conditions: &GasConditions,
        lines: &LineTable,
    ) -> io::Result<LorentzianBroadening>;
}

impl LineTable {
    /// Computes the Lorentzian broadening of the lines with the given model and stores
    /// the half widths (and the shifts, if produced) in the table.
    pub fn apply_broadening<M: BroadeningModel + ?Sized>(
        &mut self,
        model: &M,
        conditions: &GasConditions,
    ) -> io::Result<()> {
        let LorentzianBroadening { hwhm, shifts } = model.compute_broadening(conditions, self)?;
        if hwhm.len() != self.len() || shifts.as_ref().map_or(false, |s| s.len() != self.len()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Broadening model produced a wrong number of values",
            ));
        }
        self.set_lorentzian_broadening(hwhm, shifts);
        Ok(())
    }
}

/// Broadening model with the same width for all lines, scaling as a power of temperature.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerLawBroadening {
    reference_hwhm: fln,
    reference_temperature: fln,
    temperature_exponent: fln,
}

impl PowerLawBroadening {
    pub fn new(reference_hwhm: fln, reference_temperature: fln, temperature_exponent: fln) -> Self {
        Self {
            reference_hwhm,
            reference_temperature,
            temperature_exponent,
        }
    }
}

impl Default for PowerLawBroadening {
    fn default() -> Self {
        Self::new(1.0, T_REF, 0.8)
    }
}

impl BroadeningModel for PowerLawBroadening {
    fn compute_broadening(
        &self,
        conditions: &GasConditions,
        lines: &LineTable,
    ) -> io::Result<LorentzianBroadening> {
        let hwhm = self.reference_hwhm
            * fln::powf(
                self.reference_temperature / conditions.temperature(),
                self.temperature_exponent,
            );
        Ok(LorentzianBroadening {
            hwhm: Array1::from_elem(lines.len(), hwhm),
            shifts: None,
        })
    }
}

/// Broadening model summing radiative, Stark and van der Waals damping, using
/// the damping constants of the line list.
///
/// Tabulated Stark constants are per electron and van der Waals constants per
/// hydrogen atom, at 10000 K. A tabulated value of zero means the constant is unknown
/// and the corresponding damping is left out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vald3Broadening;

impl Vald3Broadening {
    /// Temperature at which the tabulated van der Waals constants apply [K].
    pub const VDW_REFERENCE_TEMPERATURE: fln = 1e4;
    /// Temperature exponent of van der Waals damping.
    pub const VDW_TEMPERATURE_EXPONENT: fln = 0.3;

    fn damping(log_gamma: fln) -> fln {
        if log_gamma == 0.0 {
            0.0
        } else {
            fln::powf(10.0, log_gamma)
        }
    }
}

impl BroadeningModel for Vald3Broadening {
    fn compute_broadening(
        &self,
        conditions: &GasConditions,
        lines: &LineTable,
    ) -> io::Result<LorentzianBroadening> {
        let total_density = conditions.total_number_density();
        let electron_fraction = conditions.diluent_fraction("e-").unwrap_or(0.0);
        let hydrogen_fraction = conditions
            .diluent_fraction("H")
            .unwrap_or(1.0 - electron_fraction);

        let electron_density = electron_fraction * total_density;
        let hydrogen_density = hydrogen_fraction * total_density;
        let vdw_temperature_scale = fln::powf(
            conditions.temperature() / Self::VDW_REFERENCE_TEMPERATURE,
            Self::VDW_TEMPERATURE_EXPONENT,
        );
        // Damping constant [1/s] to half width [1/cm]
        let to_hwhm = 1.0 / (4.0 * PI * CLIGHT);

        let mut hwhm = Array1::zeros(lines.len());
        let mut shifts = Array1::zeros(lines.len());
        Zip::from(&mut hwhm)
            .and(&mut shifts)
            .and(lines.log_gamma_rad())
            .and(lines.log_gamma_stark())
            .and(lines.log_gamma_vdw())
            .for_each(|hwhm, shift, &log_rad, &log_stark, &log_vdw| {
                let gamma_rad = Self::damping(log_rad);
                let gamma_stark = Self::damping(log_stark) * electron_density;
                let gamma_vdw = Self::damping(log_vdw) * hydrogen_density * vdw_temperature_scale;
                *hwhm = (gamma_rad + gamma_stark + gamma_vdw) * to_hwhm;
                *shift = (2.0 / 3.0) * gamma_vdw * to_hwhm;
            });

        Ok(LorentzianBroadening {
            hwhm,
            shifts: Some(shifts),
        })
    }
}

#[cfg(test)]
mod tests {

    use super::{super::tests::example_table, *};
    use approx::assert_relative_eq;

    #[test]
    fn air_broadening_is_added_once() {
        let mut table = example_table();
        assert!(!table.has_column("airbrd"));
        add_air_broadening(&mut table, "Fe");
        let first = table.air_broadening().unwrap().clone();
        assert_relative_eq!(first[0], 10f64.powf(-7.5) * 0.68);

        add_air_broadening(&mut table, "He");
        assert_eq!(table.air_broadening().unwrap(), &first);
    }

    #[test]
    fn helium_lines_are_scaled() {
        let mut hydrogen = example_table();
        let mut helium = example_table();
        add_air_broadening(&mut hydrogen, "H");
        add_air_broadening(&mut helium, "He");
        assert_relative_eq!(
            helium.air_broadening().unwrap()[1],
            0.42 * hydrogen.air_broadening().unwrap()[1]
        );
    }

    #[test]
    fn invalid_gas_conditions_are_rejected() {
        assert!(GasConditions::new(0.0, 1.0, HashMap::new()).is_err());
        assert!(GasConditions::new(1000.0, -1.0, HashMap::new()).is_err());
    }

    #[test]
    fn power_law_broadening_scales_with_temperature() {
        let mut table = example_table();
        let conditions = GasConditions::new(2.0 * T_REF, 1.0, HashMap::new()).unwrap();
        table
            .apply_broadening(&PowerLawBroadening::default(), &conditions)
            .unwrap();
        let hwhm = table.lorentzian_hwhm().unwrap();
        assert_relative_eq!(hwhm[0], 0.5f64.powf(0.8));
        assert_eq!(table.shifts().sum(), 0.0);
    }

    #[test]
    fn vald3_broadening_sums_damping_constants() {
        let mut table = example_table();
        let diluent = vec![("H".to_string(), 1.0)].into_iter().collect();
        let conditions = GasConditions::new(1e4, 1.0, diluent).unwrap();
        table
            .apply_broadening(&Vald3Broadening, &conditions)
            .unwrap();

        let density = conditions.total_number_density();
        let to_hwhm = 1.0 / (4.0 * PI * CLIGHT);
        let expected_vdw = 10f64.powf(-7.5) * density * to_hwhm;
        let expected = 10f64.powf(8.0) * to_hwhm + expected_vdw;

        let hwhm = table.lorentzian_hwhm().unwrap();
        assert_relative_eq!(hwhm[0], expected, max_relative = 1e-12);
        assert_relative_eq!(table.shifts()[0], 2.0 / 3.0 * expected_vdw, max_relative = 1e-12);
        // All constants unknown for the last line
        assert_eq!(hwhm[2], 0.0);
    }

    #[test]
    fn models_can_be_used_as_trait_objects() {
        let models: Vec<Box<dyn BroadeningModel>> =
            vec![Box::new(PowerLawBroadening::default()), Box::new(Vald3Broadening)];
        let conditions = GasConditions::new(T_REF, 1.0, HashMap::new()).unwrap();
        for model in &models {
            let mut table = example_table();
            table.apply_broadening(model.as_ref(), &conditions).unwrap();
            assert_eq!(table.lorentzian_hwhm().unwrap().len(), table.len());
        }
    }
}
