//! Static reference data needed for processing line lists.

pub mod ionization;
pub mod partition;

use crate::io::Verbose;
use ionization::IonizationEnergyTable;
use partition::PartitionFunctionTable;
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Default name of the ionization energy table file.
pub const IONIZATION_ENERGY_FILE_NAME: &str = "NIST_Atomic_Ionization_Energies.txt";
/// Default name of the partition function temperature grid file.
pub const PARTITION_TEMPERATURE_FILE_NAME: &str = "pfTKurucz_values.txt";
/// Default name of the partition function value file.
pub const PARTITION_VALUE_FILE_NAME: &str = "kuruczpartfn.txt";

/// Locations of the reference data files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceDataPaths {
    pub ionization_energies: PathBuf,
    pub partition_temperatures: PathBuf,
    pub partition_values: PathBuf,
}

impl ReferenceDataPaths {
    /// Uses the default file names in the given directory.
    pub fn in_directory<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            ionization_energies: data_dir.join(IONIZATION_ENERGY_FILE_NAME),
            partition_temperatures: data_dir.join(PARTITION_TEMPERATURE_FILE_NAME),
            partition_values: data_dir.join(PARTITION_VALUE_FILE_NAME),
        }
    }
}

/// Reference tables shared read-only between line list sessions.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    ionization_energies: Arc<IonizationEnergyTable>,
    partition_functions: Arc<PartitionFunctionTable>,
}

impl ReferenceData {
    pub fn new(
        ionization_energies: IonizationEnergyTable,
        partition_functions: PartitionFunctionTable,
    ) -> Self {
        Self {
            ionization_energies: Arc::new(ionization_energies),
            partition_functions: Arc::new(partition_functions),
        }
    }

    /// Loads all reference tables from the given files.
    pub fn load(paths: &ReferenceDataPaths, verbose: Verbose) -> io::Result<Self> {
        if verbose.is_yes() {
            println!(
                "Reading ionization energies from {}",
                paths.ionization_energies.to_string_lossy()
            );
        }
        let ionization_energies = IonizationEnergyTable::from_file(&paths.ionization_energies)?;

        if verbose.is_yes() {
            println!(
                "Reading partition functions from {}",
                paths.partition_values.to_string_lossy()
            );
        }
        let partition_functions = PartitionFunctionTable::from_files(
            &paths.partition_temperatures,
            &paths.partition_values,
        )?;

        Ok(Self::new(ionization_energies, partition_functions))
    }

    pub fn ionization_energies(&self) -> &IonizationEnergyTable {
        &self.ionization_energies
    }

    pub fn partition_functions(&self) -> &PartitionFunctionTable {
        &self.partition_functions
    }
}
