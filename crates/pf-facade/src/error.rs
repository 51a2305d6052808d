//! Facade-level errors: wraps each backend's error type plus the
//! facade's own configuration/operation-support checks.

use pf_core::PfError;
use thiserror::Error;

pub type FacadeResult<T> = Result<T, FacadeError>;

#[derive(Error, Debug, Clone)]
pub enum FacadeError {
    #[error("no geometry has been configured")]
    NotConfigured,

    #[error("no inlet fluid has been set")]
    MissingInlet,

    #[error("no run has been performed yet")]
    NotRun,

    #[error("{what} is not supported by this solver backend")]
    NotSupported { what: &'static str },

    #[error("unrecognised unit: {unit}")]
    UnknownUnit { unit: String },

    #[error(transparent)]
    BeggsBrill(#[from] pf_beggsbrill::BbError),

    #[error(transparent)]
    TwoFluid(#[from] pf_twofluid::TfError),

    #[error(transparent)]
    WaterHammer(#[from] pf_mochammer::MocError),

    #[error(transparent)]
    OnePhase(#[from] pf_onephase::OpError),
}

impl From<FacadeError> for PfError {
    fn from(err: FacadeError) -> Self {
        match err {
            FacadeError::NotConfigured => PfError::MissingGeometry { what: "facade geometry" },
            FacadeError::MissingInlet => PfError::InvalidArg { what: "missing inlet fluid" },
            FacadeError::NotRun => PfError::Invariant { what: "queried before run" },
            FacadeError::NotSupported { what } => PfError::InvalidArg { what },
            FacadeError::UnknownUnit { unit } => PfError::UnknownUnit { unit },
            FacadeError::BeggsBrill(e) => e.into(),
            FacadeError::TwoFluid(e) => e.into(),
            FacadeError::WaterHammer(e) => e.into(),
            FacadeError::OnePhase(e) => e.into(),
        }
    }
}
