//! Fluid/flash errors — the `ThermoError` family.

use pf_core::PfError;
use thiserror::Error;

pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    #[error("Unrecognised unit string: {unit}")]
    UnknownUnit { unit: String },

    #[error("No phase with tag {tag:?} present")]
    PhaseNotPresent { tag: crate::phase::PhaseTag },
}

impl From<FluidError> for PfError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => PfError::Invariant { what },
            FluidError::OutOfRange { what } => PfError::InvalidArg { what },
            FluidError::InvalidArg { what } => PfError::InvalidArg { what },
            FluidError::NotSupported { what } => PfError::Invariant { what },
            FluidError::Backend { message: _ } => PfError::Invariant {
                what: "thermo backend error",
            },
            FluidError::ConvergenceFailed { what } => PfError::Invariant { what },
            FluidError::UnknownUnit { unit } => PfError::UnknownUnit { unit },
            FluidError::PhaseNotPresent { .. } => PfError::Invariant {
                what: "phase not present",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn error_conversion() {
        let fluid_err = FluidError::NotSupported { what: "mixtures" };
        let pf_err: PfError = fluid_err.into();
        assert!(matches!(pf_err, PfError::Invariant { .. }));
    }
}
