//! Table of atomic ionization energies in the pipe-delimited NIST format.

use crate::io::utils;
use lazy_static::lazy_static;
use regex::Regex;
use std::{io, path::Path};

/// Floating-point precision to use for ionization energies.
#[allow(non_camel_case_types)]
pub type fie = f64;

/// Number of lines preceding the header line of the table.
pub const HEADER_LINES_SKIPPED: usize = 6;

/// Column names, including their whitespace padding.
pub const ATOMIC_NUMBER_COLUMN: &str = "At. num ";
pub const ION_CHARGE_COLUMN: &str = " Ion Charge ";
pub const IONIZATION_ENERGY_COLUMN: &str = "      Ionization Energy (a) (eV)      ";

lazy_static! {
    /// Brackets and parentheses marking theoretical or derived values.
    static ref VALUE_DECORATION_REGEX: Regex = Regex::new(r"[()\[\]]").unwrap();
}

#[derive(Clone, Debug)]
struct IonizationEnergyRow {
    atomic_number: u32,
    ion_charge: u32,
    energy: String,
}

/// Ionization energies indexed by atomic number and ion charge.
#[derive(Clone, Debug)]
pub struct IonizationEnergyTable {
    rows: Vec<IonizationEnergyRow>,
}

impl IonizationEnergyTable {
    /// Reads the table from the file at the given path.
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> io::Result<Self> {
        let text = utils::read_text_file(file_path)?;
        Self::from_text(&text)
    }

    /// Parses the table from the full text of a table file.
    ///
    /// Rows where the atomic number or ion charge is not an integer (like
    /// separator lines) are not part of the table.
    pub fn from_text(text: &str) -> io::Result<Self> {
        let mut lines = text.lines().skip(HEADER_LINES_SKIPPED);
        let header = lines.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "No header line in ionization energy table",
            )
        })?;
        let column_names: Vec<&str> = header.split('|').collect();
        let atomic_number_idx = Self::find_column(&column_names, ATOMIC_NUMBER_COLUMN)?;
        let ion_charge_idx = Self::find_column(&column_names, ION_CHARGE_COLUMN)?;
        let energy_idx = Self::find_column(&column_names, IONIZATION_ENERGY_COLUMN)?;

        let rows = lines
            .filter_map(|line| {
                let fields: Vec<&str> = line.split('|').collect();
                let atomic_number = fields.get(atomic_number_idx)?.trim().parse().ok()?;
                let ion_charge = fields.get(ion_charge_idx)?.trim().parse().ok()?;
                let energy = fields.get(energy_idx)?.to_string();
                Some(IonizationEnergyRow {
                    atomic_number,
                    ion_charge,
                    energy,
                })
            })
            .collect();

        Ok(Self { rows })
    }

    /// Returns the number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the ionization energy [eV] of the given species.
    ///
    /// # Parameters
    ///
    /// - `atomic_number`: Atomic number of the element (e.g. 26 for Fe).
    /// - `ionization_stage`: Spectroscopic ionization stage (1 for neutral atoms).
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains the ionization energy.
    /// - `Err`: The table does not hold exactly one row for the species, or the
    /// value of the row is not a number.
    pub fn lookup(&self, atomic_number: u32, ionization_stage: u32) -> io::Result<fie> {
        let ion_charge = ionization_stage.checked_sub(1).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "Ionization stage must be at least 1",
            )
        })?;

        let mut matches = self
            .rows
            .iter()
            .filter(|row| row.atomic_number == atomic_number && row.ion_charge == ion_charge);

        match (matches.next(), matches.count()) {
            (Some(row), 0) => Self::parse_energy(&row.energy, atomic_number, ion_charge),
            (None, _) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "No ionization energy for atomic number {} with charge {}",
                    atomic_number, ion_charge
                ),
            )),
            (Some(_), n_more) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Found {} ionization energies for atomic number {} with charge {}, expected one",
                    n_more + 1,
                    atomic_number,
                    ion_charge
                ),
            )),
        }
    }

    fn find_column(column_names: &[&str], name: &str) -> io::Result<usize> {
        column_names
            .iter()
            .position(|&column_name| column_name == name)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Column `{}` not found in ionization energy table", name),
                )
            })
    }

    fn parse_energy(energy: &str, atomic_number: u32, ion_charge: u32) -> io::Result<fie> {
        let cleaned = VALUE_DECORATION_REGEX.replace_all(energy, "");
        let cleaned = cleaned.trim();
        // Blank entries count as zero
        let cleaned = if cleaned.is_empty() { "0" } else { cleaned };
        cleaned.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Failed parsing ionization energy `{}` for atomic number {} with charge {}: {}",
                    energy.trim(),
                    atomic_number,
                    ion_charge,
                    err
                ),
            )
        })
    }
}
