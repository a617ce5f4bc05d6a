//! Sessions for reading and processing the Kurucz line list of a single species.

use crate::{
    constants::T_REF,
    io::{kurucz::RawLineList, Verbose},
    lines::{
        broadening::{self, BroadeningModel, GasConditions},
        fln,
        normalization::{LevelEnergyUnit, LineNormalizer, PhysicalConstants},
        LineTable,
    },
    plasma::populations,
    reference::{ReferenceData, ReferenceDataPaths},
    species::Species,
};
use ndarray::Array1;
use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Environment variable specifying the directory of the reference data files.
pub const DATA_DIR_ENV_VAR: &str = "KURUCZ_DATA_DIR";

/// Directory of the reference data files when the environment does not specify one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Root of the remote Kurucz atomic line list archive.
pub const KURUCZ_ATOMS_URL: &str = "http://kurucz.harvard.edu/atoms";

/// Returns the code identifying a species in the Kurucz archive,
/// e.g. `2601` for `Fe_II`.
pub fn kurucz_code(atomic_number: u32, ionization_state: u32) -> String {
    format!("{}{:02}", atomic_number, ionization_state)
}

/// Returns the name of the line list file of the given species.
pub fn line_list_file_name(atomic_number: u32, ionization_state: u32) -> String {
    format!("gf{}.all", kurucz_code(atomic_number, ionization_state))
}

/// Returns the URL the line list of the given species can be downloaded from.
pub fn line_list_url(atomic_number: u32, ionization_state: u32) -> String {
    format!(
        "{}/{}/{}",
        KURUCZ_ATOMS_URL,
        kurucz_code(atomic_number, ionization_state),
        line_list_file_name(atomic_number, ionization_state)
    )
}

/// Configuration parameters for Kurucz line list sessions.
#[derive(Clone, Debug)]
pub struct KuruczConfig {
    data_dir: PathBuf,
    reference_paths: ReferenceDataPaths,
    level_energy_unit: LevelEnergyUnit,
    verbose: Verbose,
}

impl KuruczConfig {
    /// Creates a new configuration using the default reference file names
    /// in the given data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P, verbose: Verbose) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            reference_paths: ReferenceDataPaths::in_directory(&data_dir),
            data_dir,
            level_energy_unit: LevelEnergyUnit::default(),
            verbose,
        }
    }

    /// Creates a new configuration with the data directory taken from the
    /// `KURUCZ_DATA_DIR` environment variable, or `./data` if it is not set.
    pub fn from_env(verbose: Verbose) -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::new(data_dir, verbose)
    }

    /// Uses the given reference data files instead of the defaults.
    pub fn with_reference_paths(mut self, reference_paths: ReferenceDataPaths) -> Self {
        self.reference_paths = reference_paths;
        self
    }

    /// Sets the unit of the level energies in the line list files.
    pub fn with_level_energy_unit(mut self, level_energy_unit: LevelEnergyUnit) -> Self {
        self.level_energy_unit = level_energy_unit;
        self
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    pub fn reference_paths(&self) -> &ReferenceDataPaths {
        &self.reference_paths
    }

    pub fn level_energy_unit(&self) -> LevelEnergyUnit {
        self.level_energy_unit
    }

    pub fn verbose(&self) -> Verbose {
        self.verbose
    }
}

impl Default for KuruczConfig {
    fn default() -> Self {
        Self::from_env(Verbose::No)
    }
}

/// Session holding the line data of one species together with the reference
/// data needed to process it.
///
/// The most recently read line table and computed populations are cached in the session.
#[derive(Clone, Debug)]
pub struct KuruczDatabase {
    config: KuruczConfig,
    species: Species,
    reference_data: ReferenceData,
    normalizer: LineNormalizer,
    data: Option<LineTable>,
    populations: Option<Array1<fln>>,
}

impl KuruczDatabase {
    /// Creates a new session for the given species, loading the reference data
    /// files specified in the configuration.
    ///
    /// # Parameters
    ///
    /// - `species_token`: Species to handle, e.g. `Fe_II`.
    /// - `config`: Configuration parameters for the session.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains a new `KuruczDatabase`.
    /// - `Err`: The species could not be identified or the reference data could not be read.
    pub fn new(species_token: &str, config: KuruczConfig) -> io::Result<Self> {
        let species = Species::from_token(species_token)?;
        let reference_data = ReferenceData::load(config.reference_paths(), config.verbose())?;
        Ok(Self::with_species_and_reference_data(
            species,
            reference_data,
            config,
        ))
    }

    /// Creates a new session for the given species using already loaded reference data.
    pub fn with_reference_data(
        species_token: &str,
        reference_data: ReferenceData,
        config: KuruczConfig,
    ) -> io::Result<Self> {
        let species = Species::from_token(species_token)?;
        Ok(Self::with_species_and_reference_data(
            species,
            reference_data,
            config,
        ))
    }

    fn with_species_and_reference_data(
        species: Species,
        reference_data: ReferenceData,
        config: KuruczConfig,
    ) -> Self {
        let normalizer = LineNormalizer::new(PhysicalConstants::CGS, config.level_energy_unit());
        Self {
            config,
            species,
            reference_data,
            normalizer,
            data: None,
            populations: None,
        }
    }

    pub fn config(&self) -> &KuruczConfig {
        &self.config
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.reference_data
    }

    /// Returns the most recently read line table, if any.
    pub fn data(&self) -> Option<&LineTable> {
        self.data.as_ref()
    }

    /// Returns the most recently computed populations, if any.
    pub fn populations(&self) -> Option<&Array1<fln>> {
        self.populations.as_ref()
    }

    /// Returns the URL of the remote line list of the session species.
    pub fn line_list_url(&self) -> String {
        line_list_url(
            self.species.atomic_number(),
            self.species.ionization_state(),
        )
    }

    /// Returns the path where the line list of the session species is stored locally.
    pub fn local_line_list_path(&self) -> PathBuf {
        self.config.data_dir().join(line_list_file_name(
            self.species.atomic_number(),
            self.species.ionization_state(),
        ))
    }

    /// Whether the line list of the session species is already present locally.
    pub fn has_local_line_list(&self) -> bool {
        self.local_line_list_path().is_file()
    }

    /// Reads and normalizes the line list file at the given path, replacing
    /// any previously read line table.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains a reference to the new `LineTable`.
    /// - `Err`: The file could not be read or decoded, or the ionization energy
    /// of its species is not available.
    pub fn read_line_list<P: AsRef<Path>>(&mut self, file_path: P) -> io::Result<&LineTable> {
        let raw_lines = RawLineList::read(file_path, self.config.verbose())?;

        if raw_lines.element_code() != self.species.atomic_number()
            || raw_lines.ionization_stage() != self.species.ionization_state() + 1
        {
            log::warn!(
                "Line list holds element {} in ionization stage {}, which is not {}",
                raw_lines.element_code(),
                raw_lines.ionization_stage(),
                self.species
            );
        }

        let table = self
            .normalizer
            .normalize(&raw_lines, self.reference_data.ionization_energies())?;
        self.populations = None;
        Ok(self.data.insert(table))
    }

    /// Reads and normalizes the local line list of the session species.
    pub fn read_local_line_list(&mut self) -> io::Result<&LineTable> {
        let file_path = self.local_line_list_path();
        self.read_line_list(file_path)
    }

    /// Adds air broadening coefficients to the current line table, unless it already has them.
    pub fn add_air_broadening(&mut self) -> io::Result<&LineTable> {
        let element_symbol = self.species.element_symbol();
        let table = Self::loaded_data_mut(&mut self.data)?;
        broadening::add_air_broadening(table, element_symbol);
        Ok(table)
    }

    /// Computes Lorentzian broadening of the current lines with the given model.
    pub fn apply_broadening<M: BroadeningModel + ?Sized>(
        &mut self,
        model: &M,
        conditions: &GasConditions,
    ) -> io::Result<&LineTable> {
        let table = Self::loaded_data_mut(&mut self.data)?;
        table.apply_broadening(model, conditions)?;
        Ok(table)
    }

    /// Evaluates the partition function of the session species at the given temperature [K].
    pub fn partition_function(&self, temperature: fln) -> io::Result<fln> {
        self.reference_data
            .partition_functions()
            .evaluate(self.species.token(), temperature)
    }

    /// Computes the Boltzmann populations of the lower levels of the current
    /// lines at the given temperature [K], replacing any previous populations.
    pub fn calculate_populations(&mut self, temperature: fln) -> io::Result<&Array1<fln>> {
        let table = Self::loaded_data(&self.data)?;
        let populations = populations::calculate_populations(
            self.reference_data.partition_functions(),
            self.species.token(),
            temperature,
            table,
        )?;
        Ok(self.populations.insert(populations))
    }

    /// Computes the strengths of the current lines at the reference temperature of 296 K.
    pub fn reference_line_strengths(&self) -> io::Result<Array1<fln>> {
        let table = Self::loaded_data(&self.data)?;
        let partition_function = self.partition_function(T_REF)?;
        Ok(table.reference_line_strengths(partition_function))
    }

    fn loaded_data(data: &Option<LineTable>) -> io::Result<&LineTable> {
        data.as_ref().ok_or_else(Self::no_data_error)
    }

    fn loaded_data_mut(data: &mut Option<LineTable>) -> io::Result<&mut LineTable> {
        data.as_mut().ok_or_else(Self::no_data_error)
    }

    fn no_data_error() -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, "No line list has been read")
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn remote_locations_follow_kurucz_naming() {
        assert_eq!(kurucz_code(26, 1), "2601");
        assert_eq!(kurucz_code(1, 0), "100");
        assert_eq!(line_list_file_name(26, 0), "gf2600.all");
        assert_eq!(
            line_list_url(26, 1),
            "http://kurucz.harvard.edu/atoms/2601/gf2601.all"
        );
    }

    #[test]
    fn config_uses_default_file_names() {
        let config = KuruczConfig::new("reference", Verbose::No)
            .with_level_energy_unit(LevelEnergyUnit::ElectronVolt);
        assert_eq!(config.data_dir(), Path::new("reference"));
        assert_eq!(
            config.reference_paths().partition_values,
            Path::new("reference").join("kuruczpartfn.txt")
        );
        assert_eq!(config.level_energy_unit(), LevelEnergyUnit::ElectronVolt);
        assert!(!config.verbose().is_yes());
    }
}
