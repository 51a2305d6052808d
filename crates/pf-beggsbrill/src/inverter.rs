//! Flow-rate inversion: find the mass flow rate that delivers a target
//! outlet pressure. Bisects on `mdot`, using the "flow too high" sentinel
//! pattern instead of propagating the stepper's `OutletPressureNegative`
//! error up through the search.

use pf_core::units::kgps;
use pf_core::NumericConfig;
use pf_thermo::Fluid;

use crate::config::{BbConfig, HeatConfig};
use crate::error::{BbError, BbResult};
use crate::stepper::BeggsBrillStepper;

/// Sentinel outlet pressure [Pa] standing in for "this trial flow rate is
/// infeasible" (normally because it drove the outlet pressure negative
/// partway down the pipe). Any real outlet pressure is positive, so this
/// sentinel always compares as "too low" against a target.
const INFEASIBLE_SENTINEL_PA: f64 = -1.0e6;

pub struct FlowRateInverter<'a> {
    stepper: &'a BeggsBrillStepper<'a>,
    numeric: NumericConfig,
}

impl<'a> FlowRateInverter<'a> {
    pub fn new(stepper: &'a BeggsBrillStepper<'a>, numeric: NumericConfig) -> Self {
        Self { stepper, numeric }
    }

    /// Find `mdot` [kg/s] such that running the stepper from `inlet` (at its
    /// current P, T) yields an outlet pressure within tolerance of
    /// `target_outlet_pa`. `mdot_nominal` seeds the initial bracket.
    pub fn invert(&self, inlet: &Fluid, target_outlet_pa: f64, mdot_nominal: f64) -> BbResult<f64> {
        if !(target_outlet_pa.is_finite() && target_outlet_pa > 0.0) {
            return Err(BbError::InvalidArg { what: "target outlet pressure must be positive" });
        }

        let mut lo = 1.0 / 3600.0; // 1 kg/h in kg/s
        let mut hi = (2.0 * mdot_nominal).max(lo * 2.0);

        let p_lo = self.try_outlet_pressure(inlet, lo)?;
        if p_lo < target_outlet_pa {
            return Err(BbError::Infeasible {
                what: "even the minimal flow rate undershoots the target outlet pressure",
            });
        }

        let mut p_hi = self.try_outlet_pressure(inlet, hi)?;
        let mut doublings = 0;
        while p_hi >= target_outlet_pa && doublings < 20 {
            hi *= 2.0;
            p_hi = self.try_outlet_pressure(inlet, hi)?;
            doublings += 1;
        }
        if p_hi >= target_outlet_pa {
            return Err(BbError::Infeasible {
                what: "outlet pressure did not drop below target within 20 bracket doublings",
            });
        }

        let mut mdot_mid = 0.5 * (lo + hi);
        for _ in 0..self.numeric.bisection_max_iter {
            mdot_mid = 0.5 * (lo + hi);
            let p_mid = self.try_outlet_pressure(inlet, mdot_mid)?;

            tracing::trace!(mdot_mid, p_mid, lo, hi, "beggs-brill flow-rate bisection step");

            let rel_err = (p_mid - target_outlet_pa).abs() / target_outlet_pa;
            if rel_err < self.numeric.bisection_tol {
                return Ok(mdot_mid);
            }
            if (hi - lo) / mdot_mid.max(1e-12) < self.numeric.bisection_tol {
                return Ok(mdot_mid);
            }

            if p_mid < target_outlet_pa {
                hi = mdot_mid;
            } else {
                lo = mdot_mid;
            }
        }

        Ok(mdot_mid)
    }

    /// Run the stepper at the given trial flow rate, translating a mid-pipe
    /// `OutletPressureNegative` into the infeasible-flow sentinel rather than
    /// propagating it: a bisection search needs a comparable pressure value
    /// at every trial, not an early exit.
    fn try_outlet_pressure(&self, inlet: &Fluid, mdot: f64) -> BbResult<f64> {
        let mut trial = inlet.clone();
        trial.set_total_flow_rate(mdot, "kg/s").map_err(BbError::Thermo)?;
        match self.stepper.run(&mut trial) {
            Ok(_) => Ok(trial.pressure().value),
            Err(BbError::OutletPressureNegative { .. }) => Ok(INFEASIBLE_SENTINEL_PA),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BbConfig, HeatConfig};
    use pf_core::units::{k, m, pa};
    use pf_thermo::{Composition, Species, SurrogateBackend};
    use std::sync::Arc;
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    fn steel_k() -> pf_core::units::ThermalConductivity {
        pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(45.0)
    }

    fn gas_fluid(mdot_kgps: f64) -> Fluid {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.85), (Species::Ethane, 0.15)]).unwrap();
        Fluid::new(Arc::new(SurrogateBackend::new()), comp, pa(90.0e5), k(310.0), kgps(mdot_kgps)).unwrap()
    }

    #[test]
    fn inverts_to_a_flow_rate_that_hits_the_target_within_tolerance() {
        let geom = pf_geometry::PipeGeometry::from_length_and_angle(
            m(3000.0),
            m(0.25),
            m(0.012),
            m(4.6e-5),
            0.0,
            steel_k(),
            k(288.15),
        )
        .unwrap();
        let stepper = BeggsBrillStepper::new(&geom, HeatConfig::default(), BbConfig::default(), 10).unwrap();
        let numeric = NumericConfig::default();
        let inverter = FlowRateInverter::new(&stepper, numeric);

        let inlet = gas_fluid(5.0);
        let target = 70.0e5;
        let mdot = inverter.invert(&inlet, target, 5.0).unwrap();

        let mut check = inlet.clone();
        check.set_total_flow_rate(mdot, "kg/s").unwrap();
        stepper.run(&mut check).unwrap();
        let rel_err = (check.pressure().value - target).abs() / target;
        assert!(rel_err < 1e-2, "relative error {rel_err} too large");
    }

    #[test]
    fn rejects_non_positive_target() {
        let geom = pf_geometry::PipeGeometry::from_length_and_angle(
            m(1000.0),
            m(0.2),
            m(0.01),
            m(4.6e-5),
            0.0,
            steel_k(),
            k(288.15),
        )
        .unwrap();
        let stepper = BeggsBrillStepper::new(&geom, HeatConfig::default(), BbConfig::default(), 5).unwrap();
        let inverter = FlowRateInverter::new(&stepper, NumericConfig::default());
        let inlet = gas_fluid(5.0);
        assert!(inverter.invert(&inlet, -1.0, 5.0).is_err());
    }
}
