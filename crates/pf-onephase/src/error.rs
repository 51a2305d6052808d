//! One-phase driver errors: configuration problems are fatal; the driver
//! has no transient numerical instability mode of its own since the
//! collaborator flow system owns the kernel.

use pf_core::PfError;
use pf_thermo::FluidError;
use thiserror::Error;

pub type OpResult<T> = Result<T, OpError>;

#[derive(Error, Debug, Clone)]
pub enum OpError {
    #[error("invalid node count: {n} (need >= 2)")]
    InvalidNodeCount { n: usize },

    #[error("invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("no inlet fluid has been set")]
    MissingInlet,

    #[error("thermodynamic flash failed: {0}")]
    Thermo(#[from] FluidError),
}

impl From<OpError> for PfError {
    fn from(err: OpError) -> Self {
        match err {
            OpError::InvalidNodeCount { .. } => PfError::InvalidArg { what: "invalid node count" },
            OpError::InvalidGeometry { what } => PfError::MissingGeometry { what },
            OpError::MissingInlet => PfError::InvalidArg { what: "missing inlet fluid" },
            OpError::Thermo(_) => PfError::Invariant { what: "thermo backend error" },
        }
    }
}
