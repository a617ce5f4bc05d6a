//! Reading of line lists in the fixed-width format of the Kurucz `gfall` files.
//!
//! Each line of a file holds one transition. Only the columns needed for
//! spectrum synthesis are decoded; the remaining columns of the format
//! (level labels, references, hyperfine and isotope data, Landé factors) are
//! not read.

use super::{utils, Verbose};
use ndarray::Array1;
use std::{collections::BTreeSet, io, path::Path, str::FromStr};

/// Floating-point precision to use for decoded line data.
#[allow(non_camel_case_types)]
pub type fkz = f64;

/// A named byte range of a fixed-width record.
#[derive(Clone, Copy, Debug)]
pub struct FixedWidthField {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FixedWidthField {
    const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    /// Returns the text of the field in the given line.
    ///
    /// Lines ending inside the field give the part that is present.
    fn text<'a>(&self, line: &'a str, line_number: usize) -> io::Result<&'a str> {
        let end = usize::min(self.end, line.len());
        let start = usize::min(self.start, end);
        line.get(start..end).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Non-ASCII content in field {} on line {} of line list",
                    self.name, line_number
                ),
            )
        })
    }

    /// Parses the whitespace-trimmed text of the field in the given line.
    fn parse<T>(&self, line: &str, line_number: usize) -> io::Result<T>
    where
        T: FromStr,
        T::Err: ToString,
    {
        let text = self.text(line, line_number)?;
        parse_trimmed(text, self.name, line_number)
    }
}

pub const AIR_WAVELENGTH: FixedWidthField = FixedWidthField::new("wavelength", 0, 11);
pub const LOG_GF: FixedWidthField = FixedWidthField::new("log(gf)", 11, 18);
pub const SPECIES_CODE: FixedWidthField = FixedWidthField::new("species code", 18, 24);
pub const LOWER_ENERGY: FixedWidthField = FixedWidthField::new("lower energy", 24, 36);
pub const LOWER_J: FixedWidthField = FixedWidthField::new("lower J", 36, 41);
pub const UPPER_ENERGY: FixedWidthField = FixedWidthField::new("upper energy", 52, 64);
pub const UPPER_J: FixedWidthField = FixedWidthField::new("upper J", 64, 69);
pub const LOG_GAMMA_RAD: FixedWidthField = FixedWidthField::new("log(gamma_rad)", 80, 86);
pub const LOG_GAMMA_STARK: FixedWidthField = FixedWidthField::new("log(gamma_Stark)", 86, 92);
pub const LOG_GAMMA_VDW: FixedWidthField = FixedWidthField::new("log(gamma_vdW)", 92, 98);
pub const ISOTOPE_NUMBER: FixedWidthField = FixedWidthField::new("isotope number", 106, 109);

/// A single transition as decoded from one line of a line list.
///
/// Energies are in the units of the file, and the first and second level of
/// the line are not yet ordered by energy.
#[derive(Clone, Debug, PartialEq)]
pub struct RawLineRecord {
    /// Tabulated wavelength [nm].
    pub air_wavelength: fkz,
    pub log_gf: fkz,
    pub species_code: String,
    pub element_code: u32,
    /// Charge of the ion (0 for neutral atoms).
    pub ionization_code: u32,
    pub lower_energy: fkz,
    pub lower_j: fkz,
    pub upper_energy: fkz,
    pub upper_j: fkz,
    pub log_gamma_rad: fkz,
    pub log_gamma_stark: fkz,
    pub log_gamma_vdw: fkz,
    pub isotope_number: i32,
}

impl RawLineRecord {
    /// Decodes the fixed-width fields of the given line.
    ///
    /// # Parameters
    ///
    /// - `line`: Text of the line, with or without line terminator.
    /// - `line_number`: One-based line number, used in error messages.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains the decoded `RawLineRecord`.
    /// - `Err`: A field could not be converted to a number.
    pub fn parse(line: &str, line_number: usize) -> io::Result<Self> {
        let species_code = SPECIES_CODE.text(line, line_number)?.to_string();
        let (element_code, ionization_code) = split_species_code(&species_code, line_number)?;

        Ok(Self {
            air_wavelength: AIR_WAVELENGTH.parse(line, line_number)?,
            log_gf: LOG_GF.parse(line, line_number)?,
            species_code,
            element_code,
            ionization_code,
            lower_energy: LOWER_ENERGY.parse(line, line_number)?,
            lower_j: LOWER_J.parse(line, line_number)?,
            upper_energy: UPPER_ENERGY.parse(line, line_number)?,
            upper_j: UPPER_J.parse(line, line_number)?,
            log_gamma_rad: LOG_GAMMA_RAD.parse(line, line_number)?,
            log_gamma_stark: LOG_GAMMA_STARK.parse(line, line_number)?,
            log_gamma_vdw: LOG_GAMMA_VDW.parse(line, line_number)?,
            isotope_number: ISOTOPE_NUMBER.parse(line, line_number)?,
        })
    }
}

/// Columns of decoded line data for a file holding lines of a single species.
///
/// Rows are in file order.
#[derive(Clone, Debug)]
pub struct RawLineList {
    pub air_wavelengths: Array1<fkz>,
    pub log_gf: Array1<fkz>,
    pub species_codes: Vec<String>,
    pub lower_energies: Array1<fkz>,
    pub lower_j: Array1<fkz>,
    pub upper_energies: Array1<fkz>,
    pub upper_j: Array1<fkz>,
    pub log_gamma_rad: Array1<fkz>,
    pub log_gamma_stark: Array1<fkz>,
    pub log_gamma_vdw: Array1<fkz>,
    pub isotope_numbers: Array1<i32>,
    element_code: u32,
    ionization_stage: u32,
}

impl RawLineList {
    /// Reads the line list file at the given path.
    ///
    /// Every line of the file is decoded, so the file must not contain blank lines.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains a new `RawLineList`.
    /// - `Err`: The file could not be read, a field could not be decoded, or the
    /// file does not hold lines of exactly one species.
    pub fn read<P: AsRef<Path>>(file_path: P, verbose: Verbose) -> io::Result<Self> {
        let file_path = file_path.as_ref();
        if verbose.is_yes() {
            println!("Reading line list from {}", file_path.to_string_lossy());
        }
        let lines = utils::read_text_file_lines(file_path)?;
        let raw_lines = Self::from_lines(lines.iter().map(String::as_str))?;
        if verbose.is_yes() {
            println!(
                "Read {} lines of element {} in ionization stage {}",
                raw_lines.len(),
                raw_lines.element_code(),
                raw_lines.ionization_stage()
            );
        }
        Ok(raw_lines)
    }

    /// Decodes the given lines of a line list.
    pub fn from_lines<'a, I>(lines: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let records = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| RawLineRecord::parse(line, idx + 1))
            .collect::<io::Result<Vec<_>>>()?;
        Self::from_records(records)
    }

    /// Gathers the given records into columns, verifying that they all belong to the same species.
    pub fn from_records(records: Vec<RawLineRecord>) -> io::Result<Self> {
        let element_code = single_code(records.iter().map(|r| r.element_code), "element")?;
        let ionization_code =
            single_code(records.iter().map(|r| r.ionization_code), "ionization")?;

        let column = |get: fn(&RawLineRecord) -> fkz| -> Array1<fkz> {
            records.iter().map(get).collect()
        };

        Ok(Self {
            air_wavelengths: column(|r: &RawLineRecord| r.air_wavelength),
            log_gf: column(|r: &RawLineRecord| r.log_gf),
            lower_energies: column(|r: &RawLineRecord| r.lower_energy),
            lower_j: column(|r: &RawLineRecord| r.lower_j),
            upper_energies: column(|r: &RawLineRecord| r.upper_energy),
            upper_j: column(|r: &RawLineRecord| r.upper_j),
            log_gamma_rad: column(|r: &RawLineRecord| r.log_gamma_rad),
            log_gamma_stark: column(|r: &RawLineRecord| r.log_gamma_stark),
            log_gamma_vdw: column(|r: &RawLineRecord| r.log_gamma_vdw),
            isotope_numbers: records.iter().map(|r| r.isotope_number).collect(),
            species_codes: records.into_iter().map(|r| r.species_code).collect(),
            element_code,
            // The file gives the ion charge, the spectroscopic stage is one higher
            ionization_stage: ionization_code + 1,
        })
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.air_wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the atomic number shared by all lines.
    pub fn element_code(&self) -> u32 {
        self.element_code
    }

    /// Returns the spectroscopic ionization stage shared by all lines (1 for neutral atoms).
    pub fn ionization_stage(&self) -> u32 {
        self.ionization_stage
    }
}

fn parse_trimmed<T>(text: &str, field_name: &str, line_number: usize) -> io::Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    let trimmed = text.trim();
    trimmed.parse::<T>().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Failed parsing {} `{}` on line {} of line list: {}",
                field_name,
                trimmed,
                line_number,
                err.to_string()
            ),
        )
    })
}

/// Splits a species code like `26.01` into the atomic number and ion charge.
fn split_species_code(species_code: &str, line_number: usize) -> io::Result<(u32, u32)> {
    let mut parts = species_code.split('.');
    match (parts.next(), parts.next()) {
        (Some(element), Some(ionization)) => Ok((
            parse_trimmed(element, "element code", line_number)?,
            parse_trimmed(ionization, "ionization code", line_number)?,
        )),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Invalid species code `{}` on line {} of line list",
                species_code.trim(),
                line_number
            ),
        )),
    }
}

/// Returns the only distinct code among the given codes.
fn single_code<I: Iterator<Item = u32>>(codes: I, code_name: &str) -> io::Result<u32> {
    let distinct: BTreeSet<u32> = codes.collect();
    match distinct.iter().next() {
        Some(&code) if distinct.len() == 1 => Ok(code),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Line list must contain exactly one {} code, found {:?}",
                code_name, distinct
            ),
        )),
    }
}
