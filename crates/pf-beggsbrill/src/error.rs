//! Beggs-Brill stepper errors: `OutletPressureNegative`, `MissingGeometry`
//! and `Infeasible` variants.

use pf_core::PfError;
use pf_thermo::FluidError;
use thiserror::Error;

pub type BbResult<T> = Result<T, BbError>;

#[derive(Error, Debug, Clone)]
pub enum BbError {
    #[error("Outlet pressure non-positive at segment {segment}: {pressure_pa} Pa")]
    OutletPressureNegative { segment: usize, pressure_pa: f64 },

    #[error("Missing or inconsistent geometry: {what}")]
    MissingGeometry { what: &'static str },

    #[error("No Beggs-Brill regime matched the classification inputs (unreachable with valid inputs)")]
    RegimeNotFound,

    #[error("Thermodynamic flash failed: {0}")]
    Thermo(#[from] FluidError),

    #[error("Flow-rate inversion infeasible: {what}")]
    Infeasible { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<BbError> for PfError {
    fn from(err: BbError) -> Self {
        match err {
            BbError::OutletPressureNegative { .. } => PfError::Invariant {
                what: "outlet pressure non-positive",
            },
            BbError::MissingGeometry { what } => PfError::MissingGeometry { what },
            BbError::RegimeNotFound => PfError::Invariant {
                what: "no beggs-brill regime matched",
            },
            BbError::Thermo(_) => PfError::Invariant { what: "thermo backend error" },
            BbError::Infeasible { what } => PfError::Invariant { what },
            BbError::InvalidArg { what } => PfError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlet_pressure_negative_displays_segment() {
        let err = BbError::OutletPressureNegative { segment: 3, pressure_pa: -100.0 };
        assert!(err.to_string().contains('3'));
    }
}
