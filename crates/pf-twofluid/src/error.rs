//! Two-fluid solver errors. Structural problems (bad geometry, missing
//! inlet) are fatal; numerical instability during sub-stepping is handled
//! entirely by the validator and never reaches this type.

use pf_core::PfError;
use pf_thermo::FluidError;
use thiserror::Error;

pub type TfResult<T> = Result<T, TfError>;

#[derive(Error, Debug, Clone)]
pub enum TfError {
    #[error("invalid cell count: {n_cells} (need >= 2)")]
    InvalidCellCount { n_cells: usize },

    #[error("invalid segment spacing: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("no inlet fluid has been set")]
    MissingInlet,

    #[error("thermodynamic flash failed: {0}")]
    Thermo(#[from] FluidError),
}

impl From<TfError> for PfError {
    fn from(err: TfError) -> Self {
        match err {
            TfError::InvalidCellCount { .. } => PfError::InvalidArg { what: "invalid cell count" },
            TfError::InvalidGeometry { what } => PfError::MissingGeometry { what },
            TfError::MissingInlet => PfError::InvalidArg { what: "missing inlet fluid" },
            TfError::Thermo(_) => PfError::Invariant { what: "thermo backend error" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_cell_count_displays_count() {
        let err = TfError::InvalidCellCount { n_cells: 1 };
        assert!(err.to_string().contains('1'));
    }
}
