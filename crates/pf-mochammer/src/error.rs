//! Water-hammer solver errors. Configuration problems are fatal;
//! non-physical valve-quadratic results are absorbed by the boundary
//! handler itself and never reach this type.

use pf_core::PfError;
use pf_thermo::FluidError;
use thiserror::Error;

pub type MocResult<T> = Result<T, MocError>;

#[derive(Error, Debug, Clone)]
pub enum MocError {
    #[error("invalid grid size: {n} (need >= 3 nodes)")]
    InvalidGrid { n: usize },

    #[error("invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("no inlet fluid has been set")]
    MissingInlet,

    #[error("invalid boundary configuration: {what}")]
    InvalidBoundary { what: &'static str },

    #[error("thermodynamic flash failed: {0}")]
    Thermo(#[from] FluidError),
}

impl From<MocError> for PfError {
    fn from(err: MocError) -> Self {
        match err {
            MocError::InvalidGrid { .. } => PfError::InvalidArg { what: "invalid MOC grid size" },
            MocError::InvalidGeometry { what } => PfError::MissingGeometry { what },
            MocError::MissingInlet => PfError::InvalidArg { what: "missing inlet fluid" },
            MocError::InvalidBoundary { what } => PfError::InvalidArg { what },
            MocError::Thermo(_) => PfError::Invariant { what: "thermo backend error" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_grid_displays_count() {
        let err = MocError::InvalidGrid { n: 2 };
        assert!(err.to_string().contains('2'));
    }
}
