//! Shared error taxonomy: `ConfigError`/`InputError`-shaped variants that
//! every downstream crate's error type converts into.

use thiserror::Error;

pub type PfResult<T> = Result<T, PfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },

    #[error("Unrecognised unit string: {unit}")]
    UnknownUnit { unit: String },

    #[error("Missing or inconsistent geometry: {what}")]
    MissingGeometry { what: &'static str },
}
