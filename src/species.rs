//! Identification of atomic species from tokens like `Fe_II`.

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt, io};

/// Chemical symbols of the elements, ordered by atomic number.
pub const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Highest ionization stage (as a Roman numeral) that can be identified.
pub const MAX_IONIZATION_NUMERAL: i32 = 6;

/// Ionization state returned for numerals that can not be identified.
pub const UNKNOWN_IONIZATION_STATE: i32 = -1;

lazy_static! {
    static ref ATOMIC_NUMBERS: HashMap<&'static str, u32> = ELEMENT_SYMBOLS
        .iter()
        .enumerate()
        .map(|(idx, &symbol)| (symbol, (idx + 1) as u32))
        .collect();
}

/// An atomic species in a given ionization state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Species {
    token: String,
    atomic_number: u32,
    ionization_state: u32,
    element_symbol: &'static str,
}

impl Species {
    /// Identifies the species described by a token of the form `<symbol>_<roman numeral>`.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains the identified `Species`.
    /// - `Err`: The token is malformed, the symbol is not a chemical element
    /// or the ionization numeral is not recognized.
    pub fn from_token(token: &str) -> io::Result<Self> {
        let (symbol, _) = split_token(token)?;
        let (element_symbol, atomic_number) = lookup_element(symbol)?;

        let ionization_state = get_ionization_state(token)?;
        if ionization_state == UNKNOWN_IONIZATION_STATE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Unrecognized ionization numeral in species {}, must be one of I to {}",
                    token,
                    roman::to(MAX_IONIZATION_NUMERAL).unwrap_or_default()
                ),
            ));
        }

        Ok(Self {
            token: token.to_string(),
            atomic_number,
            ionization_state: ionization_state as u32,
            element_symbol,
        })
    }

    /// Returns the token the species was identified from.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    /// Returns the ionization state, where 0 is the neutral atom.
    pub fn ionization_state(&self) -> u32 {
        self.ionization_state
    }

    pub fn element_symbol(&self) -> &'static str {
        self.element_symbol
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// Returns the atomic number of the element in the given species token.
pub fn get_atomic_number(token: &str) -> io::Result<u32> {
    let (symbol, _) = split_token(token)?;
    lookup_element(symbol).map(|(_, atomic_number)| atomic_number)
}

/// Returns the chemical symbol of the element in the given species token.
pub fn get_element_symbol(token: &str) -> io::Result<&'static str> {
    let (symbol, _) = split_token(token)?;
    lookup_element(symbol).map(|(element_symbol, _)| element_symbol)
}

/// Returns the ionization state encoded by the Roman numeral in the given species token.
///
/// The numerals `I` to `VI` map to 0 to 5. Any other numeral gives
/// `UNKNOWN_IONIZATION_STATE`, which callers must treat as invalid input.
pub fn get_ionization_state(token: &str) -> io::Result<i32> {
    let (_, numeral) = split_token(token)?;
    Ok(ionization_state_from_numeral(numeral))
}

fn ionization_state_from_numeral(numeral: &str) -> i32 {
    match roman::from(numeral) {
        // Only canonical numerals, so that e.g. `IIII` is not taken as `IV`
        Some(value)
            if (1..=MAX_IONIZATION_NUMERAL).contains(&value)
                && roman::to(value).as_deref() == Some(numeral) =>
        {
            value - 1
        }
        _ => UNKNOWN_IONIZATION_STATE,
    }
}

fn split_token(token: &str) -> io::Result<(&str, &str)> {
    let mut parts = token.split('_');
    match (parts.next(), parts.next()) {
        (Some(symbol), Some(numeral)) if !symbol.is_empty() => Ok((symbol, numeral)),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Invalid format for species {}, must be <element>_<ionization stage>, e.g. Fe_II",
                token
            ),
        )),
    }
}

fn lookup_element(symbol: &str) -> io::Result<(&'static str, u32)> {
    match ATOMIC_NUMBERS.get_key_value(symbol) {
        Some((&element_symbol, &atomic_number)) => Ok((element_symbol, atomic_number)),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a recognized chemical element", symbol),
        )),
    }
}
