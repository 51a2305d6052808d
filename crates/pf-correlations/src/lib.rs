//! Pure-function correlation library shared by every solver. No type
//! here holds state or can fail: inputs are clamped/guarded per-function,
//! and a NaN/inf result is a caller error, not a correlation error.

pub mod beggs_brill;
pub mod drift;
pub mod friction;
pub mod thermal_resistance;

pub use beggs_brill::{BbRegime, beggs_brill_boundaries, beggs_brill_holdup, beggs_brill_inclination, classify_regime};
pub use drift::{drift_velocity, joukowsky};
pub use friction::{darcy_friction, gnielinski_nu, nu_pipe, shah_enhancement};
pub use thermal_resistance::overall_u;
