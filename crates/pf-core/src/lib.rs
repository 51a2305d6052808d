//! pf-core: stable foundation shared by every pipeflow crate.
//!
//! Contains:
//! - units (uom SI types + constructors, plus the imperial constants the
//!   Beggs-Brill stepper needs at its segment boundaries)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact ids for segments/cells/calculation runs)
//! - error (shared error taxonomy)

pub mod config;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use config::NumericConfig;
pub use error::{PfError, PfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
