mod common;

use approx::assert_relative_eq;
use common::{Test, FE_II_LINES, FE_I_LINE};
use kurucz::{
    database::KuruczDatabase,
    lines::{
        broadening::{GasConditions, Vald3Broadening},
        REQUIRED_COLUMN_NAMES,
    },
};
use std::{collections::HashMap, io};

#[test]
fn fe_ii_line_list_is_normalized() {
    #![allow(clippy::float_cmp)]
    let test = Test::new();
    let file_path = test.write_line_list("gf2601.all", &FE_II_LINES);
    let mut database = test.database("Fe_II");
    let table = database.read_line_list(file_path).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.atomic_number(), 26);
    assert_eq!(table.ionization_energy(), 16.199163);

    assert_eq!(table.lower_energies().to_vec(), vec![0.0, 0.0, 1000.0]);
    assert_eq!(
        table.upper_energies().to_vec(),
        vec![67114.094, 38660.043, 20994.0]
    );
    assert_eq!(table.lower_j().to_vec(), vec![4.5, 4.5, 2.5]);
    assert_eq!(table.upper_j().to_vec(), vec![3.5, 3.5, 1.5]);
    assert_eq!(table.upper_weights().to_vec(), vec![8.0, 8.0, 4.0]);
    assert_eq!(table.isotope_numbers().to_vec(), vec![0, 56, 0]);

    let wavenumbers = table.wavenumbers();
    assert_relative_eq!(wavenumbers[0], 1e8 / 1490.0);
    // Air wavelengths are shorter than vacuum wavelengths
    assert!(wavenumbers[1] < 1e8 / 2585.876);
    assert_relative_eq!(wavenumbers[1], 38660.043, max_relative = 1e-4);
    assert!(wavenumbers[2] < 1e8 / 5000.0);
}

#[test]
fn normalized_table_satisfies_invariants() {
    let test = Test::new();
    let file_path = test.write_line_list("lines.all", &FE_II_LINES);
    let mut database = test.database("Fe_II");
    let table = database.read_line_list(file_path).unwrap();

    for idx in 0..table.len() {
        assert!(table.lower_energies()[idx] <= table.upper_energies()[idx]);
        assert_relative_eq!(table.upper_weights()[idx], 2.0 * table.upper_j()[idx] + 1.0);
        assert!(table.einstein_coefficients()[idx] > 0.0);
    }
    for pair in table.wavenumbers().to_vec().windows(2) {
        assert!(pair[0] >= pair[1]);
    }
    for name in REQUIRED_COLUMN_NAMES {
        assert_eq!(table.column(name).unwrap().len(), table.len(), "column {}", name);
    }
}

#[test]
fn neutral_line_with_reversed_levels_is_decoded() {
    #![allow(clippy::float_cmp)]
    let test = Test::new();
    let file_path = test.write_line_list("gf2600.all", &[FE_I_LINE]);
    let mut database = test.database("Fe_I");
    let table = database.read_line_list(file_path).unwrap();

    assert_eq!(table.log_gf()[0], -0.432);
    assert_eq!(table.lower_energies()[0], 1000.25);
    assert_eq!(table.upper_energies()[0], 41000.5);
    assert_eq!(table.lower_j()[0], 3.0);
    assert_eq!(table.upper_weights()[0], 9.0);
    assert_eq!(table.log_gamma_vdw()[0], -7.77);
    assert_eq!(table.isotope_numbers()[0], 56);
    assert_eq!(table.ionization_energy(), 7.9024681);
}

#[test]
fn line_list_with_multiple_species_is_rejected() {
    let test = Test::new();
    let mut lines = FE_II_LINES.to_vec();
    lines.push(FE_I_LINE);
    let file_path = test.write_line_list("mixed.all", &lines);
    let mut database = test.database("Fe_II");
    let err = database.read_line_list(file_path).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(database.data().is_none());
}

#[test]
fn line_list_with_blank_line_is_rejected() {
    let test = Test::new();
    let file_path = test.write_line_list("blank.all", &[FE_II_LINES[0], "", FE_II_LINES[1]]);
    let mut database = test.database("Fe_II");
    assert_eq!(
        database.read_line_list(file_path).unwrap_err().kind(),
        io::ErrorKind::InvalidData
    );
}

#[test]
fn air_broadening_is_idempotent() {
    let test = Test::new();
    let file_path = test.write_line_list("gf2601.all", &FE_II_LINES);
    let mut database = test.database("Fe_II");
    assert_eq!(
        database.add_air_broadening().unwrap_err().kind(),
        io::ErrorKind::InvalidInput
    );
    database.read_line_list(file_path).unwrap();

    let first = database
        .add_air_broadening()
        .unwrap()
        .air_broadening()
        .unwrap()
        .clone();
    assert_relative_eq!(first[0], 10f64.powf(-7.8) * 0.68);
    let second = database
        .add_air_broadening()
        .unwrap()
        .air_broadening()
        .unwrap()
        .clone();
    assert_eq!(first, second);
}

#[test]
fn partition_functions_are_interpolated_and_clamped() {
    #![allow(clippy::float_cmp)]
    let test = Test::new();
    let database = test.database("Fe_II");
    assert_eq!(database.partition_function(296.0).unwrap(), 21.0);
    assert_eq!(database.partition_function(3000.0).unwrap(), 36.5);
    assert_eq!(database.partition_function(50.0).unwrap(), 20.0);
    assert_eq!(database.partition_function(1e6).unwrap(), 70.0);

    assert_eq!(
        database.partition_function(f64::NAN).unwrap_err().kind(),
        io::ErrorKind::InvalidInput
    );

    let database = test.database("He_II");
    assert_eq!(
        database.partition_function(5000.0).unwrap_err().kind(),
        io::ErrorKind::NotFound
    );
}

#[test]
fn populations_replace_previous_results() {
    let test = Test::new();
    let file_path = test.write_line_list("gf2601.all", &FE_II_LINES);
    let mut database = test.database("Fe_II");
    database.read_line_list(file_path).unwrap();

    let hot = database.calculate_populations(5000.0).unwrap().clone();
    assert_relative_eq!(hot[0], 1.0 / 45.0);
    assert_relative_eq!(hot[2], f64::exp(-1000.0 / (0.695 * 5000.0)) / 45.0);
    assert!(hot.iter().all(|&p| p > 0.0 && p <= 1.0));
    assert!(hot[0] >= hot[1] && hot[1] > hot[2]);

    let cool = database.calculate_populations(1000.0).unwrap().clone();
    assert_relative_eq!(cool[0], 1.0 / 28.0);
    assert_eq!(database.populations(), Some(&cool));

    assert_eq!(
        database.calculate_populations(-10.0).unwrap_err().kind(),
        io::ErrorKind::InvalidInput
    );
}

#[test]
fn reference_line_strengths_are_positive() {
    let test = Test::new();
    let file_path = test.write_line_list("gf2601.all", &FE_II_LINES);
    let mut database = test.database("Fe_II");
    database.read_line_list(file_path).unwrap();
    let strengths = database.reference_line_strengths().unwrap();
    assert_eq!(strengths.len(), 3);
    assert!(strengths.iter().all(|&s| s.is_finite() && s > 0.0));
}

#[test]
fn broadening_model_is_applied_to_session_data() {
    let test = Test::new();
    let file_path = test.write_line_list("gf2601.all", &FE_II_LINES);
    let mut database = test.database("Fe_II");
    database.read_line_list(file_path).unwrap();

    let diluent: HashMap<String, f64> = vec![("H".to_string(), 0.9), ("e-".to_string(), 0.1)]
        .into_iter()
        .collect();
    let conditions = GasConditions::new(5000.0, 1.0, diluent).unwrap();
    let table = database
        .apply_broadening(&Vald3Broadening, &conditions)
        .unwrap();

    let hwhm = table.lorentzian_hwhm().unwrap();
    assert!(hwhm[0] > 0.0);
    // All damping constants of the last line are unknown
    assert_eq!(hwhm[2], 0.0);
    assert!(table.shifts()[0] > 0.0);
    assert!(table.has_column("hwhm_lorentz"));
}

#[test]
fn local_line_list_is_located_by_species() {
    let test = Test::new();
    let mut database = test.database("Fe_II");
    assert_eq!(
        database.line_list_url(),
        "http://kurucz.harvard.edu/atoms/2601/gf2601.all"
    );
    assert!(!database.has_local_line_list());

    test.write_line_list("gf2601.all", &FE_II_LINES);
    assert!(database.has_local_line_list());
    assert_eq!(database.read_local_line_list().unwrap().len(), 3);
}

#[test]
fn invalid_species_are_rejected() {
    let test = Test::new();
    assert_eq!(
        KuruczDatabase::new("Xx_I", test.config())
            .unwrap_err()
            .kind(),
        io::ErrorKind::NotFound
    );
    assert_eq!(
        KuruczDatabase::new("Fe_VII", test.config())
            .unwrap_err()
            .kind(),
        io::ErrorKind::InvalidInput
    );
}
