//! `TwoFluidSolver`: the public two-fluid transient driver composing cells,
//! the RK4 integrator, drift-flux seeding, regime detection and the
//! accumulation tracker.

use pf_core::units::constants::G0_MPS2;
use pf_core::NumericConfig;
use pf_geometry::PipeGeometry;
use pf_thermo::{Fluid, PhaseTag};

use crate::accumulation::AccumulationTracker;
use crate::cell::TwoFluidCell;
use crate::config::{FlowRegime, InletBoundary, OutletBoundary, TwoFluidConfig};
use crate::error::{TfError, TfResult};
use crate::integrator::{rk4_step, ConservativeState};
use crate::regime::classify_two_fluid_regime;
use crate::rhs::TwoFluidModel;
use crate::seeding::seed_steady_state;

pub struct TwoFluidSolver {
    numeric: NumericConfig,
    config: TwoFluidConfig,
    area: f64,
    cells: Vec<TwoFluidCell>,
    cell_fluids: Vec<Fluid>,
    inlet: Option<Fluid>,
    sim_time_s: f64,
    sub_step_counter: usize,
    accumulation: AccumulationTracker,
}

impl TwoFluidSolver {
    pub fn new(numeric: NumericConfig, config: TwoFluidConfig) -> Self {
        Self {
            numeric,
            config,
            area: 0.0,
            cells: Vec::new(),
            cell_fluids: Vec::new(),
            inlet: None,
            sim_time_s: 0.0,
            sub_step_counter: 0,
            accumulation: AccumulationTracker::new(),
        }
    }

    pub fn set_inlet(&mut self, fluid: Fluid) {
        self.inlet = Some(fluid);
    }

    pub fn simulation_time(&self) -> f64 {
        self.sim_time_s
    }

    pub fn cells(&self) -> &[TwoFluidCell] {
        &self.cells
    }

    pub fn accumulation(&self) -> &AccumulationTracker {
        &self.accumulation
    }

    /// Initializes N cells over the geometry and runs the steady-state
    /// drift-flux seeding sweep.
    pub fn run(&mut self, geometry: &PipeGeometry, n_cells: usize) -> TfResult<()> {
        if n_cells < 2 {
            return Err(TfError::InvalidCellCount { n_cells });
        }
        let inlet = self.inlet.as_ref().ok_or(TfError::MissingInlet)?.clone();

        let area = geometry.cross_section_area().value;
        if !(area.is_finite() && area > 0.0) {
            return Err(TfError::InvalidGeometry { what: "non-positive cross-section area" });
        }
        self.area = area;

        let dx = geometry.length().value / n_cells as f64;
        if !(dx.is_finite() && dx > 0.0) {
            return Err(TfError::InvalidGeometry { what: "non-positive segment spacing" });
        }

        let gas_idx = inlet.phase_index(PhaseTag::Gas);
        let oil_idx = inlet.phase_index(PhaseTag::Oil);
        let water_idx = inlet.phase_index(PhaseTag::Aqueous);

        let mdot_gas = gas_idx.map(|i| inlet.phase_mass_flow(i)).transpose()?.unwrap_or(0.0);
        let mdot_oil = oil_idx.map(|i| inlet.phase_mass_flow(i)).transpose()?.unwrap_or(0.0);
        let mdot_water = water_idx.map(|i| inlet.phase_mass_flow(i)).transpose()?.unwrap_or(0.0);
        let mdot_liquid = mdot_oil + mdot_water;

        let rho_g = gas_idx.map(|i| inlet.phase_density(i)).transpose()?.unwrap_or(1.0);
        let mu_g = gas_idx.map(|i| inlet.phase_viscosity(i)).transpose()?.unwrap_or(1.2e-5);
        let c_g = gas_idx.map(|i| inlet.phase_sound_speed(i)).transpose()?.unwrap_or(380.0);
        let h_g = gas_idx.map(|i| inlet.phase_enthalpy(i)).transpose()?.unwrap_or(0.0);

        let rho_l = mix_liquid_density(&inlet, oil_idx, water_idx)?;
        let mu_l = mix_liquid_viscosity(&inlet, oil_idx, water_idx)?;
        let c_l = oil_idx.or(water_idx).map(|i| inlet.phase_sound_speed(i)).transpose()?.unwrap_or(1200.0);
        let h_l = oil_idx.or(water_idx).map(|i| inlet.phase_enthalpy(i)).transpose()?.unwrap_or(0.0);
        let sigma = match (gas_idx, oil_idx.or(water_idx)) {
            (Some(g), Some(l)) => inlet.surface_tension(g, l)?,
            _ => 0.02,
        };
        let water_cut = if mdot_liquid > 1e-12 { mdot_water / mdot_liquid } else { 0.0 };

        self.cells = (0..n_cells)
            .map(|i| {
                let theta = geometry.segment_inclination(n_cells, i);
                TwoFluidCell {
                    x: dx * i as f64,
                    dx,
                    theta,
                    elevation: geometry.node_elevations(n_cells)[i],
                    roughness: geometry.roughness().value,
                    pressure_pa: inlet.pressure().value,
                    temperature_k: inlet.temperature().value,
                    alpha_g: 0.5,
                    alpha_l: 0.5,
                    v_g: 1.0,
                    v_l: 1.0,
                    alpha_w: water_idx.map(|_| water_cut * 0.5),
                    v_w: water_idx.map(|_| 1.0),
                    water_cut,
                    rho_g,
                    rho_l,
                    mu_g,
                    mu_l,
                    c_g,
                    c_l,
                    h_g,
                    h_l,
                    sigma,
                    regime: FlowRegime::SinglePhase,
                }
            })
            .collect();

        seed_steady_state(&mut self.cells, area, mdot_gas, mdot_liquid, &self.config);

        for cell in &mut self.cells {
            cell.regime = classify_two_fluid_regime(cell.alpha_l, cell.v_g, cell.v_l, 2.0 * (area / std::f64::consts::PI).sqrt(), cell.theta);
        }

        self.cell_fluids = (0..n_cells)
            .map(|i| {
                let mut f = inlet.clone();
                let _ = f.set_pressure(self.cells[i].pressure_pa, "Pa");
                f
            })
            .collect();

        self.sim_time_s = 0.0;
        self.sub_step_counter = 0;
        self.accumulation = AccumulationTracker::new();
        Ok(())
    }

    /// Advances the state by exactly `dt`, internally sub-stepping under CFL.
    pub fn run_transient(&mut self, dt: f64) -> TfResult<()> {
        if self.cells.is_empty() {
            return Err(TfError::MissingInlet);
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(TfError::InvalidGeometry { what: "non-positive dt" });
        }

        let max_speed = self
            .cells
            .iter()
            .map(|c| (c.v_g.abs() + c.c_g).max(c.v_l.abs() + c.c_l))
            .fold(1e-6, f64::max);
        let dx_min = self.cells.iter().map(|c| c.dx).fold(f64::MAX, f64::min);
        let dt_stable = self.numeric.cfl * dx_min / max_speed;
        let n_sub_unclamped = ((dt / dt_stable).ceil() as usize).max(2);
        if n_sub_unclamped > self.numeric.max_sub_steps {
            tracing::warn!(n_sub_unclamped, max = self.numeric.max_sub_steps, "CFL-required sub-step count exceeds max_sub_steps, clamping");
        }
        let n_sub = n_sub_unclamped.min(self.numeric.max_sub_steps);
        let dt_sub = dt / n_sub as f64;

        for _ in 0..n_sub {
            if self.sub_step_counter % self.numeric.thermodynamic_update_interval == 0 {
                self.refresh_thermo();
            }
            self.sub_step_counter += 1;

            let prev_state = self.conservative_state();
            let model = TwoFluidModel { cells: &self.cells, area: self.area, config: &self.config };
            let new_state = rk4_step(&model, &prev_state, dt_sub);

            self.apply_state(&prev_state, &new_state);
            self.apply_pressure_projection(dt_sub);
            self.apply_boundaries();
            self.validate_cells();

            if self.config.slug_tracking_enabled {
                self.accumulation.update(&self.cells, self.area, dt_sub);
            }

            self.sim_time_s += dt_sub;
        }

        Ok(())
    }

    fn conservative_state(&self) -> ConservativeState {
        ConservativeState(
            self.cells
                .iter()
                .map(|c| [c.alpha_g * c.rho_g * self.area, c.alpha_l * c.rho_l * self.area, c.alpha_g * c.rho_g * c.v_g * self.area, c.alpha_l * c.rho_l * c.v_l * self.area])
                .collect(),
        )
    }

    /// Recovers primitives from the new conservative state, clamping
    /// non-negatives, replacing non-finite entries with the previous
    /// snapshot, and limiting per-sub-step mass change to ±50%.
    fn apply_state(&mut self, prev: &ConservativeState, new: &ConservativeState) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let u_prev = prev.0[i];
            let mut u = new.0[i];

            for k in 0..4 {
                if !u[k].is_finite() {
                    u[k] = u_prev[k];
                }
            }
            u[0] = u[0].max(0.0);
            u[1] = u[1].max(0.0);

            for k in 0..2 {
                let lower = u_prev[k] * 0.5;
                let upper = u_prev[k] * 1.5;
                if u_prev[k] > 1e-12 {
                    u[k] = u[k].clamp(lower, upper);
                }
            }

            cell.alpha_g = (u[0] / (cell.rho_g * self.area)).clamp(0.0, 1.0);
            cell.alpha_l = (u[1] / (cell.rho_l * self.area)).clamp(0.0, 1.0);
            cell.v_g = if u[0] > 1e-9 { u[2] / u[0] } else { 0.0 };
            cell.v_l = if u[1] > 1e-9 { u[3] / u[1] } else { 0.0 };
        }
    }

    /// Semi-implicit pressure-gradient projection applied after advection:
    /// marches a friction+gravity pressure drop downstream using the
    /// freshly advected velocities.
    fn apply_pressure_projection(&mut self, _dt_sub: f64) {
        let d = 2.0 * (self.area / std::f64::consts::PI).sqrt();
        for i in 1..self.cells.len() {
            let (rho_mix, v_mix, mu_ns, dx, theta) = {
                let c = &self.cells[i];
                (c.alpha_g * c.rho_g + c.alpha_l * c.rho_l, c.alpha_g * c.v_g + c.alpha_l * c.v_l, c.alpha_g * c.mu_g + c.alpha_l * c.mu_l, c.dx, c.theta)
            };
            let re = rho_mix * v_mix.abs() * d / mu_ns.max(1e-9);
            let f = pf_correlations::darcy_friction(re, self.cells[i].roughness / d);
            let delta_p_fric = f * (dx / d) * rho_mix * v_mix * v_mix.abs() / 2.0;
            let delta_p_hydro = rho_mix * G0_MPS2 * dx * theta.sin();
            self.cells[i].pressure_pa = self.cells[i - 1].pressure_pa - delta_p_fric - delta_p_hydro;
        }
    }

    fn apply_boundaries(&mut self) {
        if let Some(first) = self.cells.first_mut() {
            match self.config.inlet_boundary {
                InletBoundary::StreamConnected => {
                    if let Some(inlet) = &self.inlet {
                        first.pressure_pa = inlet.pressure().value;
                        first.temperature_k = inlet.temperature().value;
                    }
                }
                InletBoundary::FixedPressure(p) => first.pressure_pa = p,
                InletBoundary::FixedFlow(_) => {}
            }
        }
        let n = self.cells.len();
        match self.config.outlet_boundary {
            OutletBoundary::ConstantPressure(p) => {
                if let Some(last) = self.cells.last_mut() {
                    last.pressure_pa = p;
                }
            }
            OutletBoundary::Absorbing => {
                if n >= 2 {
                    let extrapolated = 2.0 * self.cells[n - 1].pressure_pa - self.cells[n - 2].pressure_pa;
                    self.cells[n - 1].pressure_pa = extrapolated.max(1.0);
                }
            }
        }
    }

    fn validate_cells(&mut self) {
        let reference_t = self.inlet.as_ref().map(|f| f.temperature().value).unwrap_or(288.15);
        let reference_p = self.inlet.as_ref().map(|f| f.pressure().value).unwrap_or(1.0e5);
        for cell in &mut self.cells {
            cell.renormalize_holdups();
            if !(cell.pressure_pa.is_finite() && cell.pressure_pa > 0.0) {
                cell.pressure_pa = reference_p;
            }
            if !(cell.temperature_k.is_finite() && cell.temperature_k > 0.0) {
                cell.temperature_k = reference_t;
            }
            cell.regime = classify_two_fluid_regime(cell.alpha_l, cell.v_g, cell.v_l, 2.0 * (self.area / std::f64::consts::PI).sqrt(), cell.theta);
        }
    }

    /// Refreshes per-cell phase properties by TP-flash, combining oil+water
    /// into an effective liquid with Brinkman viscosity mixing when a water
    /// phase is present. Flash failures are logged and that cell's previous
    /// properties are kept.
    fn refresh_thermo(&mut self) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let fluid = &mut self.cell_fluids[i];
            if fluid.set_pressure(cell.pressure_pa, "Pa").is_err() {
                tracing::warn!(cell = i, "two-fluid thermo refresh: pressure update failed, keeping previous properties");
                continue;
            }
            if fluid.set_temperature(cell.temperature_k, "K").is_err() {
                tracing::warn!(cell = i, "two-fluid thermo refresh: temperature update failed, keeping previous properties");
                continue;
            }

            let gas_idx = fluid.phase_index(PhaseTag::Gas);
            let oil_idx = fluid.phase_index(PhaseTag::Oil);
            let water_idx = fluid.phase_index(PhaseTag::Aqueous);

            if let Some(g) = gas_idx {
                if let (Ok(rho), Ok(mu), Ok(c), Ok(h)) = (
                    fluid.phase_density(g),
                    fluid.phase_viscosity(g),
                    fluid.phase_sound_speed(g),
                    fluid.phase_enthalpy(g),
                ) {
                    cell.rho_g = rho;
                    cell.mu_g = mu;
                    cell.c_g = c;
                    cell.h_g = h;
                }
            }

            if let (Ok(rho_l), Ok(mu_l)) = (mix_liquid_density(fluid, oil_idx, water_idx), mix_liquid_viscosity(fluid, oil_idx, water_idx)) {
                cell.rho_l = rho_l;
                cell.mu_l = mu_l;
            }
            if let Some(l) = oil_idx.or(water_idx) {
                if let (Ok(c), Ok(h)) = (fluid.phase_sound_speed(l), fluid.phase_enthalpy(l)) {
                    cell.c_l = c;
                    cell.h_l = h;
                }
            }
        }
    }
}

fn mix_liquid_density(fluid: &Fluid, oil_idx: Option<usize>, water_idx: Option<usize>) -> pf_thermo::FluidResult<f64> {
    match (oil_idx, water_idx) {
        (Some(o), Some(w)) => {
            let rho_o = fluid.phase_density(o)?;
            let rho_w = fluid.phase_density(w)?;
            let m_o = fluid.phase_mass_flow(o)?;
            let m_w = fluid.phase_mass_flow(w)?;
            let phi_o = if rho_o > 0.0 { m_o / rho_o } else { 0.0 };
            let phi_w = if rho_w > 0.0 { m_w / rho_w } else { 0.0 };
            let total = (phi_o + phi_w).max(1e-12);
            Ok(TwoFluidCell::effective_liquid_density(rho_o, rho_w, phi_o / total, phi_w / total))
        }
        (Some(o), None) => fluid.phase_density(o),
        (None, Some(w)) => fluid.phase_density(w),
        (None, None) => Ok(1.0),
    }
}

fn mix_liquid_viscosity(fluid: &Fluid, oil_idx: Option<usize>, water_idx: Option<usize>) -> pf_thermo::FluidResult<f64> {
    match (oil_idx, water_idx) {
        (Some(o), Some(w)) => {
            let mu_o = fluid.phase_viscosity(o)?;
            let mu_w = fluid.phase_viscosity(w)?;
            let m_o = fluid.phase_mass_flow(o)?;
            let m_w = fluid.phase_mass_flow(w)?;
            let total = (m_o + m_w).max(1e-12);
            Ok(TwoFluidCell::brinkman_liquid_viscosity(mu_o, mu_w, m_o / total, m_w / total))
        }
        (Some(o), None) => fluid.phase_viscosity(o),
        (None, Some(w)) => fluid.phase_viscosity(w),
        (None, None) => Ok(1e-3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{k, kgps, m, pa};
    use pf_thermo::{Composition, Species, SurrogateBackend};
    use std::sync::Arc;
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    fn steel_k() -> pf_core::units::ThermalConductivity {
        pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(45.0)
    }

    fn geometry() -> PipeGeometry {
        PipeGeometry::from_length_and_angle(m(2000.0), m(0.25), m(0.012), m(4.6e-5), 0.0, steel_k(), k(288.15)).unwrap()
    }

    fn two_phase_inlet() -> Fluid {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.6), (Species::NPentane, 0.4)]).unwrap();
        Fluid::new(Arc::new(SurrogateBackend::new()), comp, pa(40.0e5), k(320.0), kgps(20.0)).unwrap()
    }

    #[test]
    fn run_requires_an_inlet() {
        let mut solver = TwoFluidSolver::new(NumericConfig::default(), TwoFluidConfig::default());
        assert!(matches!(solver.run(&geometry(), 10), Err(TfError::MissingInlet)));
    }

    #[test]
    fn run_seeds_holdups_within_bounds() {
        let mut solver = TwoFluidSolver::new(NumericConfig::default(), TwoFluidConfig::default());
        solver.set_inlet(two_phase_inlet());
        solver.run(&geometry(), 20).unwrap();
        for cell in solver.cells() {
            assert!(cell.alpha_l >= 0.0 && cell.alpha_l <= 1.0);
            assert!((cell.alpha_g + cell.alpha_l - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn run_conserves_mass_flow_across_all_cells() {
        let inlet = two_phase_inlet();
        let gas_idx = inlet.phase_index(PhaseTag::Gas).unwrap();
        let liq_idx = inlet.phase_index(PhaseTag::Oil).unwrap();
        let mdot_gas = inlet.phase_mass_flow(gas_idx).unwrap();
        let mdot_liq = inlet.phase_mass_flow(liq_idx).unwrap();

        let mut solver = TwoFluidSolver::new(NumericConfig::default(), TwoFluidConfig::default());
        solver.set_inlet(inlet);
        solver.run(&geometry(), 20).unwrap();

        let area = geometry().cross_section_area().value;
        for cell in solver.cells() {
            let gas_flow = cell.alpha_g * cell.rho_g * cell.v_g * area;
            let liq_flow = cell.alpha_l * cell.rho_l * cell.v_l * area;
            assert!((gas_flow - mdot_gas).abs() / mdot_gas < 1e-3);
            assert!((liq_flow - mdot_liq).abs() / mdot_liq < 1e-3);
        }
    }

    #[test]
    fn run_transient_advances_simulation_time() {
        let mut solver = TwoFluidSolver::new(NumericConfig::default(), TwoFluidConfig::default());
        solver.set_inlet(two_phase_inlet());
        solver.run(&geometry(), 10).unwrap();
        solver.run_transient(0.5).unwrap();
        assert!((solver.simulation_time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn run_transient_keeps_pressures_finite_and_positive() {
        let mut solver = TwoFluidSolver::new(NumericConfig::default(), TwoFluidConfig::default());
        solver.set_inlet(two_phase_inlet());
        solver.run(&geometry(), 10).unwrap();
        for _ in 0..5 {
            solver.run_transient(0.2).unwrap();
        }
        for cell in solver.cells() {
            assert!(cell.pressure_pa.is_finite() && cell.pressure_pa > 0.0);
        }
    }

    #[test]
    fn rejects_too_few_cells() {
        let mut solver = TwoFluidSolver::new(NumericConfig::default(), TwoFluidConfig::default());
        solver.set_inlet(two_phase_inlet());
        assert!(matches!(solver.run(&geometry(), 1), Err(TfError::InvalidCellCount { .. })));
    }

    #[test]
    fn thermodynamic_update_interval_barely_moves_outlet_state_for_a_thermally_uniform_case() {
        let geom = geometry();
        let run_with_interval = |interval: usize| {
            let numeric = NumericConfig { thermodynamic_update_interval: interval, ..NumericConfig::default() };
            let mut solver = TwoFluidSolver::new(numeric, TwoFluidConfig::default());
            solver.set_inlet(two_phase_inlet());
            solver.run(&geom, 10).unwrap();
            solver.run_transient(1.0).unwrap();
            solver.cells().last().unwrap().pressure_pa
        };

        let p_every_step = run_with_interval(1);
        let p_every_50 = run_with_interval(50);
        assert!((p_every_50 - p_every_step).abs() / p_every_step < 0.01);
    }

    fn valley_profile_geometry() -> PipeGeometry {
        let elevations: Vec<f64> = (0..=100).map(|i| 50.0 * (std::f64::consts::PI * i as f64 / 50.0).sin()).collect();
        PipeGeometry::from_length_and_angle(m(5000.0), m(0.3), m(0.01), m(4.6e-5), 0.0, steel_k(), k(300.0))
            .unwrap()
            .with_elevation_profile(elevations)
            .unwrap()
    }

    fn valley_inlet() -> Fluid {
        let comp =
            Composition::new_mole_fractions(vec![(Species::Methane, 0.85), (Species::NPentane, 0.15)]).unwrap();
        Fluid::new(Arc::new(SurrogateBackend::new()), comp, pa(50.0e5), k(300.0), kgps(10.0)).unwrap()
    }

    #[test]
    fn sinusoidal_terrain_accumulates_more_liquid_in_valleys_than_on_peaks() {
        let config = TwoFluidConfig { slug_tracking_enabled: true, ..TwoFluidConfig::default() };
        let mut solver = TwoFluidSolver::new(NumericConfig::default(), config);
        solver.set_inlet(valley_inlet());
        solver.run(&valley_profile_geometry(), 100).unwrap();

        for _ in 0..200 {
            solver.run_transient(0.5).unwrap();
        }

        let zones = solver.accumulation().zones();
        assert!(!zones.is_empty());

        let valley_avg: f64 = zones
            .iter()
            .map(|z| {
                let slice = &solver.cells()[z.start_index..=z.end_index];
                slice.iter().map(|c| c.alpha_l).sum::<f64>() / slice.len() as f64
            })
            .sum::<f64>()
            / zones.len() as f64;

        let peak_alphas: Vec<f64> = solver
            .cells()
            .iter()
            .enumerate()
            .filter(|(i, _)| !zones.iter().any(|z| *i >= z.start_index && *i <= z.end_index))
            .map(|(_, c)| c.alpha_l)
            .collect();
        let peak_avg = peak_alphas.iter().sum::<f64>() / peak_alphas.len() as f64;

        assert!(valley_avg > peak_avg, "valley avg {valley_avg} should exceed peak avg {peak_avg}");
    }
}
