//! Tabulated partition functions of atomic species.

use crate::{interpolation, io::utils};
use std::{collections::BTreeMap, io, path::Path};

/// Floating-point precision to use for partition functions.
#[allow(non_camel_case_types)]
pub type fpf = f64;

/// Partition functions of atomic species, tabulated on a shared temperature grid.
#[derive(Clone, Debug)]
pub struct PartitionFunctionTable {
    temperatures: Vec<fpf>,
    values: BTreeMap<String, Vec<fpf>>,
}

impl PartitionFunctionTable {
    /// Reads the temperature grid and partition function values from the given files.
    ///
    /// # Parameters
    ///
    /// - `temperature_file_path`: Path to a file whose first line holds a label
    /// followed by the grid temperatures [K].
    /// - `value_file_path`: Path to a file where each line holds a species key
    /// followed by the partition function at each grid temperature.
    pub fn from_files<P1, P2>(temperature_file_path: P1, value_file_path: P2) -> io::Result<Self>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
    {
        let temperature_text = utils::read_text_file(temperature_file_path)?;
        let value_text = utils::read_text_file(value_file_path)?;
        Self::from_text(&temperature_text, &value_text)
    }

    /// Parses the temperature grid and partition function values from the given texts.
    pub fn from_text(temperature_text: &str, value_text: &str) -> io::Result<Self> {
        let temperatures = Self::parse_temperature_grid(temperature_text)?;
        let mut values = BTreeMap::new();

        for (idx, line) in value_text.lines().enumerate() {
            // Anything after `#` is a comment
            let content = line.split('#').next().unwrap_or_default();
            let mut tokens = content.split_whitespace();
            let key = match tokens.next() {
                Some(key) => key,
                None => continue,
            };
            let row = tokens
                .map(|token| parse_value(token, "partition function", idx + 1))
                .collect::<io::Result<Vec<fpf>>>()?;

            if row.len() != temperatures.len() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Partition functions for {} have {} values, but the temperature grid has {}",
                        key,
                        row.len(),
                        temperatures.len()
                    ),
                ));
            }
            if values.insert(key.to_string(), row).is_some() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Partition functions for {} given more than once", key),
                ));
            }
        }
        Ok(Self {
            temperatures,
            values,
        })
    }

    /// Returns the temperatures [K] of the grid.
    pub fn temperatures(&self) -> &[fpf] {
        &self.temperatures
    }

    /// Returns the tabulated partition functions of the given species, if present.
    pub fn values(&self, key: &str) -> Option<&[fpf]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Returns the species keys present in the table.
    pub fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Computes the partition function of the given species at the given temperature
    /// by linear interpolation in the table.
    ///
    /// Temperatures outside the grid give the value at the nearest grid end.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains the partition function.
    /// - `Err`: The temperature is not a finite number or the species is not
    /// present in the table.
    pub fn evaluate(&self, key: &str, temperature: fpf) -> io::Result<fpf> {
        if !temperature.is_finite() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Invalid temperature {} K for partition function of {}",
                    temperature, key
                ),
            ));
        }
        match self.values(key) {
            Some(values) => Ok(interpolation::interp_linear_clamped(
                &self.temperatures,
                values,
                temperature,
            )),
            None => {
                log::error!(
                    "Key {} not found in partition function table. Available keys: {:?}",
                    key,
                    self.keys()
                );
                Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No partition function for {}", key),
                ))
            }
        }
    }

    fn parse_temperature_grid(temperature_text: &str) -> io::Result<Vec<fpf>> {
        let (idx, line) = temperature_text
            .lines()
            .enumerate()
            .find(|(_, line)| !line.trim().is_empty())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    "No temperature grid in partition function temperature file",
                )
            })?;

        // The first token labels the row
        let temperatures = line
            .split_whitespace()
            .skip(1)
            .map(|token| parse_value(token, "temperature", idx + 1))
            .collect::<io::Result<Vec<fpf>>>()?;

        if temperatures.is_empty() || !interpolation::is_strictly_increasing(&temperatures) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Partition function temperatures must be a non-empty increasing sequence",
            ));
        }
        Ok(temperatures)
    }
}

fn parse_value(token: &str, value_name: &str, line_number: usize) -> io::Result<fpf> {
    token.parse().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Failed parsing {} `{}` on line {}: {}",
                value_name, token, line_number, err
            ),
        )
    })
}
