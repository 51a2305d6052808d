//! Geometry/configuration errors — the `ConfigError` branch of the taxonomy.

use pf_core::PfError;
use thiserror::Error;

pub type GeomResult<T> = Result<T, GeomError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("Inconsistent elevation specification: {what}")]
    InconsistentElevation { what: &'static str },
}

impl From<GeomError> for PfError {
    fn from(err: GeomError) -> Self {
        match err {
            GeomError::InvalidGeometry { what } => PfError::InvalidArg { what },
            GeomError::InconsistentElevation { what } => PfError::Invariant { what },
        }
    }
}
