//! `ThermoBackend`: the narrow interface the pipe solvers consume.
//!
//! The EOS/flash implementation itself is explicitly out of scope; this
//! trait is the seam a real backend (CoolProp, a compositional EOS
//! package, ...) would be plugged in behind. [`crate::wilson_flash`] provides
//! a self-contained surrogate so the rest of the workspace can be built and
//! tested without an external engine.

use crate::composition::Composition;
use crate::error::FluidResult;
use crate::phase::FlashResult;
use pf_core::units::{Pressure, Temperature};

/// Flash operations a thermodynamic backend must provide.
pub trait ThermoBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Flash at fixed pressure and temperature.
    fn flash_tp(&self, comp: &Composition, p: Pressure, t: Temperature) -> FluidResult<FlashResult>;

    /// Flash at fixed pressure and specific enthalpy [J/kg]; solves for T.
    ///
    /// Default implementation brackets and bisects on `flash_tp`: a
    /// temperature bisection against a monotone enthalpy-vs-temperature
    /// curve.
    fn flash_ph(&self, comp: &Composition, p: Pressure, h_target: f64) -> FluidResult<FlashResult> {
        use crate::error::FluidError;
        use pf_core::units::k;

        const T_MIN: f64 = 150.0;
        const T_MAX: f64 = 800.0;
        const MAX_ITER: usize = 100;

        let mut t_lo = T_MIN;
        let mut t_hi = T_MAX;

        let flash_lo = self.flash_tp(comp, p, k(t_lo))?;
        let flash_hi = self.flash_tp(comp, p, k(t_hi))?;

        if h_target < flash_lo.h_mix || h_target > flash_hi.h_mix {
            return Err(FluidError::OutOfRange {
                what: "enthalpy outside surrogate bracket [150K, 800K]",
            });
        }

        let mut result = flash_lo;
        for _ in 0..MAX_ITER {
            let t_mid = 0.5 * (t_lo + t_hi);
            let flash_mid = self.flash_tp(comp, p, k(t_mid))?;

            let tol = 1.0_f64.max(h_target.abs() * 1e-6);
            if (flash_mid.h_mix - h_target).abs() < tol {
                return Ok(flash_mid);
            }

            if flash_mid.h_mix < h_target {
                t_lo = t_mid;
            } else {
                t_hi = t_mid;
            }
            result = flash_mid;
        }

        Ok(result)
    }
}
