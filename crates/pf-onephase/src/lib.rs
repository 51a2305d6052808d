//! One-phase compositional pipe driver: a lean wrapper that composes an
//! external single-phase flow solve, momentum balance plus optional
//! composition transport, rather than hosting its own PDE kernel.

pub mod advection;
pub mod driver;
pub mod error;

pub use advection::{advect_scalar, AdvectionScheme};
pub use driver::OnePhaseCompositionalDriver;
pub use error::{OpError, OpResult};
