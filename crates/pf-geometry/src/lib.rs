//! Pipe geometry and thermal buildup shared by every solver.

pub mod error;
pub mod pipe_geometry;
pub mod thermal_buildup;

pub use error::{GeomError, GeomResult};
pub use pipe_geometry::{Layer, PipeGeometry};
pub use thermal_buildup::ThermalBuildup;
