//! The `kurucz` crate provides tools for reading and processing Kurucz atomic line lists in Rust.
pub mod constants;
pub mod database;
pub mod interpolation;
pub mod io;
pub mod lines;
pub mod plasma;
pub mod reference;
pub mod species;
pub mod units;
