//! `PipeFacade`: the single entry point composing the four solver backends
//! behind one operation/query surface. Composition over deep inheritance:
//! a tagged `Backend` variant instead of a shared base class.

use pf_beggsbrill::{BbConfig, BeggsBrillStepper, FlowRateInverter, HeatConfig, SegmentProfile};
use pf_core::units::imperial;
use pf_core::{units, NumericConfig};
use pf_geometry::PipeGeometry;
use pf_mochammer::{MoCSolver, WaterHammerConfig};
use pf_onephase::OnePhaseCompositionalDriver;
use pf_thermo::Fluid;
use pf_twofluid::{TwoFluidConfig, TwoFluidSolver};

use crate::config::CalculationMode;
use crate::error::{FacadeError, FacadeResult};

/// Which solver a `PipeFacade` wraps. The Beggs-Brill stepper borrows the
/// geometry for its own lifetime, so it is rebuilt fresh inside every
/// `run`/`run_transient` call rather than stored; the other three own their
/// solver state directly.
enum Backend {
    BeggsBrill {
        heat: HeatConfig,
        bb: BbConfig,
        n_inc: usize,
        mode: CalculationMode,
        profile: Option<SegmentProfile>,
    },
    TwoFluid {
        solver: TwoFluidSolver,
        n_cells: usize,
    },
    WaterHammer {
        solver: MoCSolver,
        n_nodes: usize,
    },
    OnePhase {
        driver: OnePhaseCompositionalDriver,
        n_nodes: usize,
    },
}

impl Backend {
    fn default_pressure_unit(&self) -> &'static str {
        match self {
            // water-hammer pressures default to Pa, everything else bara.
            Backend::WaterHammer { .. } => "Pa",
            _ => "bara",
        }
    }
}

pub struct PipeFacade {
    numeric: NumericConfig,
    geometry: Option<PipeGeometry>,
    inlet: Option<Fluid>,
    outlet: Option<Fluid>,
    outlet_pressure_target_pa: Option<f64>,
    backend: Backend,
}

impl PipeFacade {
    pub fn beggs_brill(numeric: NumericConfig, heat: HeatConfig, bb: BbConfig, n_inc: usize) -> Self {
        Self::new(
            numeric,
            Backend::BeggsBrill {
                heat,
                bb,
                n_inc,
                mode: CalculationMode::default(),
                profile: None,
            },
        )
    }

    pub fn two_fluid(numeric: NumericConfig, config: TwoFluidConfig, n_cells: usize) -> Self {
        Self::new(
            numeric,
            Backend::TwoFluid {
                solver: TwoFluidSolver::new(numeric, config),
                n_cells,
            },
        )
    }

    pub fn water_hammer(numeric: NumericConfig, config: WaterHammerConfig, n_nodes: usize) -> Self {
        Self::new(
            numeric,
            Backend::WaterHammer {
                solver: MoCSolver::new(config),
                n_nodes,
            },
        )
    }

    pub fn one_phase(numeric: NumericConfig, n_nodes: usize) -> Self {
        Self::new(
            numeric,
            Backend::OnePhase {
                driver: OnePhaseCompositionalDriver::new(numeric),
                n_nodes,
            },
        )
    }

    fn new(numeric: NumericConfig, backend: Backend) -> Self {
        Self {
            numeric,
            geometry: None,
            inlet: None,
            outlet: None,
            outlet_pressure_target_pa: None,
            backend,
        }
    }

    /// Sets (or replaces) the pipe geometry a `run` walks.
    pub fn configure(&mut self, geometry: PipeGeometry) {
        self.geometry = Some(geometry);
        self.outlet = None;
    }

    pub fn set_inlet(&mut self, fluid: Fluid) {
        self.inlet = Some(fluid);
        self.outlet = None;
    }

    /// Only consulted by the Beggs-Brill backend under
    /// `CalculationMode::CalculateFlowRate`.
    pub fn set_outlet_pressure(&mut self, value: f64, unit: &str) -> FacadeResult<()> {
        self.outlet_pressure_target_pa = Some(units::pressure_from_unit(value, unit).map_err(|_| FacadeError::UnknownUnit { unit: unit.to_string() })?.value);
        Ok(())
    }

    /// Only meaningful for the Beggs-Brill backend; ignored by the others,
    /// which always behave as `CalculateOutletPressure`.
    pub fn set_calculation_mode(&mut self, mode: CalculationMode) {
        if let Backend::BeggsBrill { mode: m, .. } = &mut self.backend {
            *m = mode;
        }
    }

    /// Runs the configured backend once to steady state.
    pub fn run(&mut self) -> FacadeResult<()> {
        let geometry = self.geometry.clone().ok_or(FacadeError::NotConfigured)?;
        let inlet = self.inlet.clone().ok_or(FacadeError::MissingInlet)?;

        match &mut self.backend {
            Backend::BeggsBrill { heat, bb, n_inc, mode, profile } => {
                let stepper = BeggsBrillStepper::new(&geometry, *heat, *bb, *n_inc)?;

                let mut working = match mode {
                    CalculationMode::CalculateOutletPressure => inlet.clone(),
                    CalculationMode::CalculateFlowRate => {
                        let target = self
                            .outlet_pressure_target_pa
                            .ok_or(FacadeError::NotSupported { what: "calculate_flow_rate requires set_outlet_pressure" })?;
                        let inverter = FlowRateInverter::new(&stepper, self.numeric);
                        let mdot = inverter.invert(&inlet, target, inlet.mass_rate().value)?;
                        let mut trial = inlet.clone();
                        trial.set_total_flow_rate(mdot, "kg/s").map_err(pf_beggsbrill::BbError::Thermo)?;
                        trial
                    }
                };
                *profile = Some(stepper.run(&mut working)?);
                self.outlet = Some(working);
            }
            Backend::TwoFluid { solver, n_cells } => {
                solver.set_inlet(inlet.clone());
                solver.run(&geometry, *n_cells)?;
                self.outlet = Some(last_cell_outlet(&inlet, solver)?);
            }
            Backend::WaterHammer { solver, n_nodes } => {
                solver.set_inlet(inlet.clone());
                solver.run(&geometry, *n_nodes)?;
                self.outlet = Some(last_node_outlet(&inlet, solver)?);
            }
            Backend::OnePhase { driver, n_nodes } => {
                driver.set_inlet(inlet.clone());
                driver.run(&geometry, *n_nodes)?;
                let v0 = driver.velocity_profile_mps().first().copied().unwrap_or(0.0);
                let transit_time = (geometry.length().value / v0.abs().max(1e-6)).min(3600.0);
                self.outlet = Some(driver.run_transient(transit_time)?);
            }
        }

        Ok(())
    }

    /// Advances a transient-capable backend by `dt` seconds. The
    /// Beggs-Brill backend is a steady stepper with no transient mode of
    /// its own.
    pub fn run_transient(&mut self, dt: f64) -> FacadeResult<()> {
        let inlet = self.inlet.clone().ok_or(FacadeError::MissingInlet)?;

        match &mut self.backend {
            Backend::BeggsBrill { .. } => Err(FacadeError::NotSupported { what: "run_transient on the beggs_brill backend" }),
            Backend::TwoFluid { solver, .. } => {
                solver.run_transient(dt)?;
                self.outlet = Some(last_cell_outlet(&inlet, solver)?);
                Ok(())
            }
            Backend::WaterHammer { solver, .. } => {
                solver.run_transient(dt)?;
                self.outlet = Some(last_node_outlet(&inlet, solver)?);
                Ok(())
            }
            Backend::OnePhase { driver, .. } => {
                self.outlet = Some(driver.run_transient(dt)?);
                Ok(())
            }
        }
    }

    pub fn simulation_time(&self) -> f64 {
        match &self.backend {
            Backend::BeggsBrill { .. } => 0.0,
            Backend::TwoFluid { solver, .. } => solver.simulation_time(),
            Backend::WaterHammer { solver, .. } => solver.simulation_time(),
            Backend::OnePhase { driver, .. } => driver.simulation_time(),
        }
    }

    pub fn pressure_profile(&self) -> FacadeResult<Vec<f64>> {
        self.pressure_profile_in(self.backend.default_pressure_unit())
    }

    pub fn pressure_profile_in(&self, unit: &str) -> FacadeResult<Vec<f64>> {
        let raw = match &self.backend {
            Backend::BeggsBrill { profile, .. } => profile.as_ref().ok_or(FacadeError::NotRun)?.pressure_pa.clone(),
            Backend::TwoFluid { solver, .. } => solver.cells().iter().map(|c| c.pressure_pa).collect(),
            Backend::WaterHammer { solver, .. } => solver.pressure_profile_pa(),
            Backend::OnePhase { driver, .. } => driver.pressure_profile_pa(),
        };
        raw.into_iter().map(|p| pa_to_unit(p, unit)).collect()
    }

    pub fn temperature_profile(&self) -> FacadeResult<Vec<f64>> {
        self.temperature_profile_in("K")
    }

    pub fn temperature_profile_in(&self, unit: &str) -> FacadeResult<Vec<f64>> {
        let raw = match &self.backend {
            Backend::BeggsBrill { profile, .. } => profile.as_ref().ok_or(FacadeError::NotRun)?.temperature_k.clone(),
            Backend::TwoFluid { solver, .. } => solver.cells().iter().map(|c| c.temperature_k).collect(),
            Backend::WaterHammer { .. } => return Err(FacadeError::NotSupported { what: "temperature_profile on the water_hammer backend" }),
            Backend::OnePhase { driver, .. } => driver.temperature_profile_k(),
        };
        raw.into_iter().map(|t| temperature_to_unit(t, unit)).collect()
    }

    pub fn velocity_profile(&self) -> FacadeResult<Vec<f64>> {
        Ok(match &self.backend {
            Backend::BeggsBrill { profile, .. } => profile.as_ref().ok_or(FacadeError::NotRun)?.v_mix.clone(),
            Backend::TwoFluid { solver, .. } => solver.cells().iter().map(|c| c.mixture_velocity()).collect(),
            Backend::WaterHammer { solver, .. } => solver.velocity_profile_mps(),
            Backend::OnePhase { driver, .. } => driver.velocity_profile_mps(),
        })
    }

    pub fn liquid_holdup_profile(&self) -> FacadeResult<Vec<f64>> {
        match &self.backend {
            Backend::BeggsBrill { profile, .. } => Ok(profile.as_ref().ok_or(FacadeError::NotRun)?.holdup.clone()),
            Backend::TwoFluid { solver, .. } => Ok(solver.cells().iter().map(|c| c.alpha_l).collect()),
            _ => Err(FacadeError::NotSupported { what: "liquid_holdup_profile on this backend" }),
        }
    }

    pub fn water_cut_profile(&self) -> FacadeResult<Vec<f64>> {
        match &self.backend {
            Backend::TwoFluid { solver, .. } => Ok(solver.cells().iter().map(|c| c.water_cut).collect()),
            _ => Err(FacadeError::NotSupported { what: "water_cut_profile on this backend" }),
        }
    }

    pub fn flow_regime_profile(&self) -> FacadeResult<Vec<String>> {
        match &self.backend {
            Backend::BeggsBrill { profile, .. } => Ok(profile.as_ref().ok_or(FacadeError::NotRun)?.regime.iter().map(|r| r.to_string()).collect()),
            Backend::TwoFluid { solver, .. } => Ok(solver.cells().iter().map(|c| format!("{:?}", c.regime)).collect()),
            _ => Err(FacadeError::NotSupported { what: "flow_regime_profile on this backend" }),
        }
    }

    pub fn outlet_pressure(&self, unit: &str) -> FacadeResult<f64> {
        let fluid = self.outlet.as_ref().ok_or(FacadeError::NotRun)?;
        pa_to_unit(fluid.pressure().value, unit)
    }

    pub fn outlet_temperature(&self, unit: &str) -> FacadeResult<f64> {
        let fluid = self.outlet.as_ref().ok_or(FacadeError::NotRun)?;
        temperature_to_unit(fluid.temperature().value, unit)
    }

    pub fn pressure_drop(&self, unit: &str) -> FacadeResult<f64> {
        let inlet = self.inlet.as_ref().ok_or(FacadeError::MissingInlet)?;
        let outlet = self.outlet.as_ref().ok_or(FacadeError::NotRun)?;
        pa_to_unit(inlet.pressure().value - outlet.pressure().value, unit)
    }

    pub fn mixture_velocity(&self) -> FacadeResult<f64> {
        Ok(self.velocity_profile()?.last().copied().unwrap_or(0.0))
    }

    /// Reynolds number at the outlet node, using the no-slip mixture
    /// properties the stepper/cell already carries. Not meaningful for the
    /// water-hammer or one-phase backends, which don't track a mixture
    /// viscosity.
    pub fn reynolds_number(&self) -> FacadeResult<f64> {
        match &self.backend {
            Backend::BeggsBrill { profile, .. } => {
                let profile = profile.as_ref().ok_or(FacadeError::NotRun)?;
                profile.reynolds_no_slip.last().copied().ok_or(FacadeError::NotRun)
            }
            Backend::TwoFluid { solver, .. } => {
                let geometry = self.geometry.as_ref().ok_or(FacadeError::NotConfigured)?;
                let cell = solver.cells().last().ok_or(FacadeError::NotRun)?;
                let d = geometry.diameter().value;
                let rho_mix = cell.alpha_g * cell.rho_g + cell.alpha_l * cell.rho_l;
                let mu_mix = cell.alpha_g * cell.mu_g + cell.alpha_l * cell.mu_l;
                Ok(rho_mix * cell.mixture_velocity().abs() * d / mu_mix.max(1e-9))
            }
            _ => Err(FacadeError::NotSupported { what: "reynolds_number on this backend" }),
        }
    }

    pub fn friction_factor(&self) -> FacadeResult<f64> {
        match &self.backend {
            Backend::BeggsBrill { .. } => {
                let geometry = self.geometry.as_ref().ok_or(FacadeError::NotConfigured)?;
                let re = self.reynolds_number()?;
                Ok(pf_correlations::darcy_friction(re, geometry.roughness().value / geometry.diameter().value.max(1e-12)))
            }
            Backend::TwoFluid { .. } => {
                let geometry = self.geometry.as_ref().ok_or(FacadeError::NotConfigured)?;
                let re = self.reynolds_number()?;
                Ok(pf_correlations::darcy_friction(re, geometry.roughness().value / geometry.diameter().value.max(1e-12)))
            }
            _ => Err(FacadeError::NotSupported { what: "friction_factor on this backend" }),
        }
    }
}

fn last_cell_outlet(inlet: &Fluid, solver: &TwoFluidSolver) -> FacadeResult<Fluid> {
    let cell = solver.cells().last().ok_or(FacadeError::NotRun)?;
    let mut outlet = inlet.clone();
    outlet.set_pressure(cell.pressure_pa, "Pa").map_err(pf_twofluid::TfError::Thermo)?;
    outlet.set_temperature(cell.temperature_k, "K").map_err(pf_twofluid::TfError::Thermo)?;
    Ok(outlet)
}

fn last_node_outlet(inlet: &Fluid, solver: &MoCSolver) -> FacadeResult<Fluid> {
    let pressures = solver.pressure_profile_pa();
    let p_out = *pressures.last().ok_or(FacadeError::NotRun)?;
    let mut outlet = inlet.clone();
    outlet.set_pressure(p_out, "Pa").map_err(pf_mochammer::MocError::Thermo)?;
    Ok(outlet)
}

/// Converts a pressure already in Pa to the requested unit string. The
/// inverse of `pf_core::units::pressure_from_unit`, which only goes the
/// other way.
fn pa_to_unit(value_pa: f64, unit: &str) -> FacadeResult<f64> {
    Ok(match unit {
        "Pa" => value_pa,
        "bara" => value_pa / 1.0e5,
        "barg" => value_pa / 1.0e5 - 1.013_25,
        "MPa" => value_pa / 1.0e6,
        "psi" => imperial::pressure_si_to_imperial(value_pa),
        other => return Err(FacadeError::UnknownUnit { unit: other.to_string() }),
    })
}

/// Converts a temperature already in K to the requested unit string, the
/// inverse of `pf_core::units::temperature_from_unit`.
fn temperature_to_unit(value_k: f64, unit: &str) -> FacadeResult<f64> {
    Ok(match unit {
        "K" => value_k,
        "C" => value_k - 273.15,
        other => return Err(FacadeError::UnknownUnit { unit: other.to_string() }),
    })
}
