//! Public facade over the four transient/steady-state pipe flow solvers:
//! Beggs-Brill, two-fluid, method-of-characteristics water hammer and the
//! one-phase compositional lean wrapper.

pub mod config;
pub mod error;
pub mod facade;

pub use config::CalculationMode;
pub use error::{FacadeError, FacadeResult};
pub use facade::PipeFacade;
