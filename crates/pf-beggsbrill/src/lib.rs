//! Beggs-Brill steady-state stepper and flow-rate inverter.

pub mod config;
pub mod error;
pub mod heat_balance;
pub mod inverter;
pub mod stepper;

pub use config::{BbConfig, HeatConfig, HeatTransferMode};
pub use error::{BbError, BbResult};
pub use inverter::FlowRateInverter;
pub use stepper::{BeggsBrillStepper, SegmentProfile};
