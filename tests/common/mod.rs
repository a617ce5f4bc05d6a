#![allow(dead_code)]

use kurucz::{
    database::{KuruczConfig, KuruczDatabase},
    io::Verbose,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub const IONIZATION_ENERGY_TEXT: &str = "\
NIST Atomic Spectra Database
Ionization Energies Data

Generated for testing


At. num | Sp. Name | Ion Charge | El. name |      Ionization Energy (a) (eV)      |
      1 | H        |          0 | Hydrogen |              13.598434599702         |
      2 | He       |          0 | Helium   |             24.587389011             |
     26 | Fe       |          0 | Iron     |              7.9024681               |
     26 | Fe       |          1 | Iron     |            [16.199163]               |
";

pub const PARTITION_TEMPERATURE_TEXT: &str = "pfT_str 200.0 296.0 1000.0 5000.0 10000.0\n";

pub const PARTITION_VALUE_TEXT: &str = "\
# Partition functions on the temperature grid
H_I    2.00  2.00  2.00  2.00  2.00
He_I   1.00  1.00  1.00  1.00  1.00
Fe_I   9.50 10.00 15.00 32.00 64.00
Fe_II 20.00 21.00 28.00 45.00 70.00
";

/// Fe II lines in increasing wavelength order, with the levels of the second line swapped.
pub const FE_II_LINES: [&str; 3] = [
    "   149.0000 -2.000 26.01       0.000  4.5 a6D          67114.094  3.5 z6Fo        8.30 -5.50 -7.80K88  0 0  0 0.000  0 0.000    0    0           0    0",
    "   258.5876 -0.192 26.01   38660.043  3.5 z6Do             0.000  4.5 a6D         8.58 -6.53 -7.87K88  0 0 56 0.000  0 0.000    0    0           0    0",
    "   500.0000 -3.000 26.01    1000.000  2.5 a4F          20994.000  1.5 z4Do        0.00  0.00  0.00K88  0 0  0 0.000  0 0.000    0    0           0    0",
];

/// A line of neutral iron.
pub const FE_I_LINE: &str = "   249.3182 -0.432 26.00   41000.500  4.0 x             1000.250  3.0 y           8.27 -5.61 -7.77K88  0 0 56 0.000  0 0.000    0    0           0    0";

/// Temporary directory populated with reference data and line list files.
#[derive(Debug)]
pub struct Test {
    dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Could not create temporary directory");
        let test = Self { dir };
        test.write_file("NIST_Atomic_Ionization_Energies.txt", IONIZATION_ENERGY_TEXT);
        test.write_file("pfTKurucz_values.txt", PARTITION_TEMPERATURE_TEXT);
        test.write_file("kuruczpartfn.txt", PARTITION_VALUE_TEXT);
        test
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.data_dir().join(file_name.as_ref())
    }

    pub fn write_file<S: AsRef<str>>(&self, file_name: S, content: &str) -> PathBuf {
        let file_path = self.path(file_name);
        fs::write(&file_path, content).unwrap_or_else(|err| {
            panic!(
                "Could not write {}: {}",
                file_path.to_string_lossy(),
                err
            )
        });
        file_path
    }

    pub fn write_line_list<S: AsRef<str>>(&self, file_name: S, lines: &[&str]) -> PathBuf {
        let mut content = lines.join("\n");
        content.push('\n');
        self.write_file(file_name, &content)
    }

    pub fn config(&self) -> KuruczConfig {
        KuruczConfig::new(self.data_dir(), Verbose::No)
    }

    pub fn database(&self, species_token: &str) -> KuruczDatabase {
        KuruczDatabase::new(species_token, self.config()).expect("Could not create database")
    }
}
