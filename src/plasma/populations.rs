//! Boltzmann populations of the lower levels of spectral lines.

use super::fpl;
use crate::{
    constants::KBOLTZMANN_WAVENUMBER, lines::LineTable,
    reference::partition::PartitionFunctionTable,
};
use ndarray::Array1;
use std::io;

/// Computes the fraction of atoms in each of the given lower levels, assuming
/// thermal equilibrium.
///
/// # Parameters
///
/// - `lower_energies`: Energies of the lower levels [1/cm].
/// - `temperature`: Temperature [K].
/// - `partition_function`: Partition function of the species at the given temperature.
///
/// # Returns
///
/// The population of each level, in the order of the given energies.
pub fn compute_boltzmann_populations(
    lower_energies: &Array1<fpl>,
    temperature: fpl,
    partition_function: fpl,
) -> Array1<fpl> {
    let thermal_energy = KBOLTZMANN_WAVENUMBER * temperature;
    lower_energies.mapv(|energy| fpl::exp(-energy / thermal_energy) / partition_function)
}

/// Computes the Boltzmann populations of the lower levels of all lines in the table.
///
/// # Parameters
///
/// - `partition_functions`: Table to evaluate the partition function from.
/// - `species_key`: Key of the species in the partition function table (e.g. `Fe_I`).
/// - `temperature`: Temperature [K].
/// - `lines`: Lines to compute populations for.
///
/// # Returns
///
/// A `Result` which is either:
///
/// - `Ok`: Contains one population per line.
/// - `Err`: The temperature is not positive or the species has no partition function.
pub fn calculate_populations(
    partition_functions: &PartitionFunctionTable,
    species_key: &str,
    temperature: fpl,
    lines: &LineTable,
) -> io::Result<Array1<fpl>> {
    if !(temperature > 0.0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Temperature must be positive, got {} K", temperature),
        ));
    }
    let partition_function = partition_functions.evaluate(species_key, temperature)?;
    Ok(compute_boltzmann_populations(
        lines.lower_energies(),
        temperature,
        partition_function,
    ))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::lines::tests::example_table;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn partition_functions() -> PartitionFunctionTable {
        PartitionFunctionTable::from_text(
            "pfT_str 1000.0 5000.0 10000.0\n",
            "Fe_II 30.0 40.0 80.0\nFe_I 20.0 30.0 60.0\n",
        )
        .unwrap()
    }

    #[test]
    fn ground_level_population_is_inverse_partition_function() {
        let populations = compute_boltzmann_populations(&array![0.0, 695.0], 1000.0, 4.0);
        assert_relative_eq!(populations[0], 0.25);
        assert_relative_eq!(populations[1], 0.25 * (-1.0f64).exp());
    }

    #[test]
    fn populations_are_bounded_and_decrease_with_energy() {
        let table = example_table();
        let populations =
            calculate_populations(&partition_functions(), "Fe_II", 5000.0, &table).unwrap();
        assert_eq!(populations.len(), table.len());
        assert!(populations.iter().all(|&p| p > 0.0 && p <= 1.0));
        assert!(populations[0] > populations[1] && populations[1] > populations[2]);
        assert_relative_eq!(populations[0], 1.0 / 40.0);
    }

    #[test]
    fn invalid_queries_fail() {
        let table = example_table();
        assert_eq!(
            calculate_populations(&partition_functions(), "Fe_II", 0.0, &table)
                .unwrap_err()
                .kind(),
            io::ErrorKind::InvalidInput
        );
        assert_eq!(
            calculate_populations(&partition_functions(), "Ni_I", 5000.0, &table)
                .unwrap_err()
                .kind(),
            io::ErrorKind::NotFound
        );
    }
}
