//! File input/output.

pub mod kurucz;
pub mod utils;

/// Whether or not to print non-critical status messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verbose {
    Yes,
    #[default]
    No,
}

impl Verbose {
    pub fn is_yes(&self) -> bool {
        match self {
            Verbose::Yes => true,
            Verbose::No => false,
        }
    }
}

impl From<bool> for Verbose {
    fn from(verbose: bool) -> Self {
        if verbose {
            Verbose::Yes
        } else {
            Verbose::No
        }
    }
}
