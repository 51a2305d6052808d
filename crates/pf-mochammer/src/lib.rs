//! Method-of-characteristics water-hammer solver: a fixed-grid, explicit
//! transient solver for the rigid compatibility equations relating head and
//! flow along a single pipe.

pub mod config;
pub mod error;
pub mod grid;
pub mod solver;
pub mod valve;
pub mod wave_speed;

pub use config::{BoundaryType, ValveSchedule, WaterHammerConfig};
pub use error::{MocError, MocResult};
pub use grid::MoCGrid;
pub use solver::MoCSolver;
pub use valve::solve_valve;
pub use wave_speed::korteweg_wave_speed;
