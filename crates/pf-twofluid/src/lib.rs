//! Two-fluid transient pipe flow solver: a 1-D, two-momentum-equation
//! (gas/liquid) finite-volume model with drift-flux seeding, RK4
//! sub-stepping under CFL, and optional slug/accumulation tracking.

pub mod accumulation;
pub mod cell;
pub mod config;
pub mod error;
pub mod integrator;
pub mod regime;
pub mod rhs;
pub mod seeding;
pub mod solver;
pub mod stratified_geometry;

pub use accumulation::{AccumulationTracker, AccumulationZone};
pub use cell::TwoFluidCell;
pub use config::{DriftClosure, FlowRegime, InletBoundary, OutletBoundary, TwoFluidConfig};
pub use error::{TfError, TfResult};
pub use integrator::{rk4_step, ConservativeState, TransientModel};
pub use regime::classify_two_fluid_regime;
pub use rhs::TwoFluidModel;
pub use seeding::{apply_terrain_modifier, calculate_local_holdup, seed_steady_state};
pub use solver::TwoFluidSolver;
