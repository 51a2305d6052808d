//! `MoCSolver`: the method-of-characteristics water-hammer driver.

use pf_core::units::constants::G0_MPS2;
use pf_geometry::PipeGeometry;
use pf_thermo::{Fluid, PhaseTag};

use crate::config::{BoundaryType, WaterHammerConfig};
use crate::error::{MocError, MocResult};
use crate::grid::MoCGrid;
use crate::valve::solve_valve;
use crate::wave_speed::korteweg_wave_speed;

pub struct MoCSolver {
    config: WaterHammerConfig,
    inlet: Option<Fluid>,
    grid: MoCGrid,
    elevations_m: Vec<f64>,
    area_m2: f64,
    diameter_m: f64,
    dx_m: f64,
    c_mps: f64,
    b_coeff: f64,
    r_coeff: f64,
    rho_kgm3: f64,
    valve_cv: f64,
    time_s: f64,
}

impl MoCSolver {
    pub fn new(config: WaterHammerConfig) -> Self {
        Self {
            config,
            inlet: None,
            grid: MoCGrid::new(0),
            elevations_m: Vec::new(),
            area_m2: 0.0,
            diameter_m: 0.0,
            dx_m: 0.0,
            c_mps: 0.0,
            b_coeff: 0.0,
            r_coeff: 0.0,
            rho_kgm3: 0.0,
            valve_cv: 0.0,
            time_s: 0.0,
        }
    }

    pub fn set_inlet(&mut self, fluid: Fluid) {
        self.inlet = Some(fluid);
    }

    pub fn grid(&self) -> &MoCGrid {
        &self.grid
    }

    pub fn simulation_time(&self) -> f64 {
        self.time_s
    }

    pub fn wave_speed(&self) -> f64 {
        self.c_mps
    }

    /// Joukowsky surge magnitude `ρ·c·|Δv|`, available as a pure query even
    /// before `run` has been called, given an explicit velocity change.
    pub fn joukowsky_surge(&self, rho: f64, delta_v: f64) -> f64 {
        pf_correlations::joukowsky(rho, self.c_mps, delta_v)
    }

    pub fn pressure_profile_pa(&self) -> Vec<f64> {
        self.heads_to_pressure(&self.grid.h_m)
    }

    pub fn velocity_profile_mps(&self) -> Vec<f64> {
        self.grid.q_m3s.iter().map(|q| q / self.area_m2.max(1e-12)).collect()
    }

    fn heads_to_pressure(&self, h: &[f64]) -> Vec<f64> {
        h.iter()
            .zip(&self.elevations_m)
            .map(|(head, z)| self.rho_kgm3 * G0_MPS2 * (head - z))
            .collect()
    }

    /// Initializes the grid, computes the Korteweg wave speed, sets a
    /// linear steady-state head/flow profile and back-calculates the valve
    /// coefficient from that steady state.
    pub fn run(&mut self, geometry: &PipeGeometry, n_nodes: usize) -> MocResult<()> {
        if n_nodes < 3 {
            return Err(MocError::InvalidGrid { n: n_nodes });
        }
        if matches!(self.config.upstream, BoundaryType::Valve) {
            return Err(MocError::InvalidBoundary { what: "valve boundary is downstream-only" });
        }
        let inlet = self.inlet.as_ref().ok_or(MocError::MissingInlet)?.clone();

        let area = geometry.cross_section_area().value;
        let diameter = geometry.diameter().value;
        if !(area.is_finite() && area > 0.0 && diameter.is_finite() && diameter > 0.0) {
            return Err(MocError::InvalidGeometry { what: "non-positive geometry" });
        }
        self.area_m2 = area;
        self.diameter_m = diameter;

        let n_inc = n_nodes - 1;
        self.dx_m = geometry.length().value / n_inc as f64;
        self.elevations_m = geometry.node_elevations(n_inc);

        let liquid_idx = inlet
            .phase_index(PhaseTag::Aqueous)
            .or_else(|| inlet.phase_index(PhaseTag::Oil))
            .unwrap_or(0);
        let rho = inlet.phase_density(liquid_idx)?;
        let mu = inlet.phase_viscosity(liquid_idx)?;
        let c_fluid = inlet.phase_sound_speed(liquid_idx)?;
        self.rho_kgm3 = rho;

        self.c_mps = korteweg_wave_speed(c_fluid, rho, diameter, geometry.wall_thickness().value, self.config.pipe_modulus_pa);
        self.b_coeff = self.c_mps / (G0_MPS2 * area);

        let q_steady = inlet.mass_rate().value / rho.max(1e-9);
        let v_steady = q_steady / area;
        let re = rho * v_steady.abs() * diameter / mu.max(1e-9);
        let f = pf_correlations::darcy_friction(re, geometry.roughness().value / diameter);
        self.r_coeff = f * self.dx_m / (2.0 * G0_MPS2 * diameter * area * area);

        let head_upstream = match self.config.upstream {
            BoundaryType::Reservoir { head_m } => head_m,
            BoundaryType::ClosedEnd | BoundaryType::ConstantFlow { .. } | BoundaryType::Valve => 0.0,
        };

        self.grid = MoCGrid::new(n_nodes);
        let sf_per_length = f * v_steady * v_steady.abs() / (2.0 * G0_MPS2 * diameter);
        for i in 0..n_nodes {
            let x = self.dx_m * i as f64;
            let elevation_loss = self.elevations_m[i] - self.elevations_m[0];
            self.grid.h_m[i] = head_upstream - sf_per_length * x - elevation_loss;
            self.grid.q_m3s[i] = q_steady;
        }

        let h_outlet = self.grid.h_m[n_nodes - 1];
        self.valve_cv = if matches!(self.config.downstream, BoundaryType::Valve) {
            let head_drop = (h_outlet - self.config.downstream_reference_head_m).max(1e-9);
            q_steady / head_drop.sqrt()
        } else {
            0.0
        };

        let pressures = self.heads_to_pressure(&self.grid.h_m);
        self.grid.reset_envelopes(&pressures);
        self.time_s = 0.0;
        Ok(())
    }

    /// Advances the grid by exactly `dt`. Stability (`dt <= dx/c`) is not
    /// enforced; a larger step is logged and the step proceeds anyway,
    /// leaving it to the caller to pick a stable `dt`.
    pub fn run_transient(&mut self, dt: f64) -> MocResult<()> {
        if self.grid.is_empty() {
            return Err(MocError::MissingInlet);
        }
        let dt_stable = self.dx_m / self.c_mps.max(1e-9);
        if dt > dt_stable {
            tracing::warn!(dt, dt_stable, "water-hammer step exceeds dx/c, stability not guaranteed");
        }

        let n = self.grid.len();
        let h_old = self.grid.h_m.clone();
        let q_old = self.grid.q_m3s.clone();
        let mut h_new = vec![0.0; n];
        let mut q_new = vec![0.0; n];

        for i in 1..n - 1 {
            let c_plus = h_old[i - 1] + self.b_coeff * q_old[i - 1] - self.r_coeff * q_old[i - 1] * q_old[i - 1].abs();
            let c_minus = h_old[i + 1] - self.b_coeff * q_old[i + 1] + self.r_coeff * q_old[i + 1] * q_old[i + 1].abs();
            h_new[i] = (c_plus + c_minus) / 2.0;
            q_new[i] = (c_plus - c_minus) / (2.0 * self.b_coeff);
        }

        let c_plus_at_n = h_old[n - 2] + self.b_coeff * q_old[n - 2] - self.r_coeff * q_old[n - 2] * q_old[n - 2].abs();
        let c_minus_at_0 = h_old[1] - self.b_coeff * q_old[1] + self.r_coeff * q_old[1] * q_old[1].abs();

        let (h0, q0) = self.apply_upstream_boundary(c_minus_at_0);
        h_new[0] = h0;
        q_new[0] = q0;

        let (hn, qn) = self.apply_downstream_boundary(c_plus_at_n, self.time_s + dt, q_old[n - 1]);
        h_new[n - 1] = hn;
        q_new[n - 1] = qn;

        self.grid.h_m = h_new;
        self.grid.q_m3s = q_new;
        self.time_s += dt;

        let pressures = self.heads_to_pressure(&self.grid.h_m);
        self.grid.update_envelopes(&pressures);
        self.grid.push_outlet(self.time_s, *pressures.last().unwrap_or(&0.0));

        Ok(())
    }

    /// Upstream end: only the C- characteristic (from node 1) survives,
    /// giving `H_0 - B·Q_0 = C_-`.
    fn apply_upstream_boundary(&self, c_minus: f64) -> (f64, f64) {
        match self.config.upstream {
            BoundaryType::Reservoir { head_m } => (head_m, (head_m - c_minus) / self.b_coeff),
            BoundaryType::ClosedEnd => (c_minus, 0.0),
            BoundaryType::ConstantFlow { q_m3s } => (c_minus + self.b_coeff * q_m3s, q_m3s),
            BoundaryType::Valve => unreachable!("valve upstream is rejected in run()"),
        }
    }

    /// Downstream end: only the C+ characteristic (from node N-1) survives,
    /// giving `H_N + B·Q_N = C_+`.
    fn apply_downstream_boundary(&self, c_plus: f64, t: f64, q_prev: f64) -> (f64, f64) {
        match self.config.downstream {
            BoundaryType::Reservoir { head_m } => (head_m, (c_plus - head_m) / self.b_coeff),
            BoundaryType::ClosedEnd => (c_plus, 0.0),
            BoundaryType::ConstantFlow { q_m3s } => (c_plus - self.b_coeff * q_m3s, q_m3s),
            BoundaryType::Valve => {
                let tau = self.config.valve_schedule.tau_at(t);
                let (q, h) = solve_valve(self.b_coeff, self.valve_cv, tau, self.config.downstream_reference_head_m, c_plus, q_prev);
                (h, q)
            }
        }
    }

    pub fn reset(&mut self) {
        let pressures = self.heads_to_pressure(&self.grid.h_m);
        self.grid.reset_envelopes(&pressures);
        self.time_s = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoundaryType, ValveSchedule};
    use pf_core::units::{k, kgps, m, pa};
    use pf_thermo::{Composition, Species, SurrogateBackend};
    use std::sync::Arc;
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    fn steel_k() -> pf_core::units::ThermalConductivity {
        pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(45.0)
    }

    fn geometry() -> PipeGeometry {
        PipeGeometry::from_length_and_angle(m(1000.0), m(0.2), m(0.01), m(4.6e-5), 0.0, steel_k(), k(288.15)).unwrap()
    }

    fn water_inlet() -> Fluid {
        let comp = Composition::new_mole_fractions(vec![(Species::Water, 1.0)]).unwrap();
        Fluid::new(Arc::new(SurrogateBackend::new()), comp, pa(6.0e5), k(293.15), kgps(27.8)).unwrap()
    }

    fn config() -> WaterHammerConfig {
        WaterHammerConfig {
            pipe_modulus_pa: 200.0e9,
            upstream: BoundaryType::Reservoir { head_m: 100.0 },
            downstream: BoundaryType::Valve,
            downstream_reference_head_m: 0.0,
            valve_schedule: ValveSchedule::default(),
        }
    }

    #[test]
    fn run_requires_an_inlet() {
        let mut solver = MoCSolver::new(config());
        assert!(matches!(solver.run(&geometry(), 10), Err(MocError::MissingInlet)));
    }

    #[test]
    fn run_computes_a_positive_wave_speed() {
        let mut solver = MoCSolver::new(config());
        solver.set_inlet(water_inlet());
        solver.run(&geometry(), 11).unwrap();
        assert!(solver.wave_speed() > 0.0);
    }

    #[test]
    fn run_transient_advances_time_and_records_outlet_history() {
        let mut solver = MoCSolver::new(config());
        solver.set_inlet(water_inlet());
        solver.run(&geometry(), 11).unwrap();
        let dt = solver.dx_m / solver.c_mps;
        solver.run_transient(dt).unwrap();
        assert!((solver.simulation_time() - dt).abs() < 1e-9);
        assert_eq!(solver.grid().outlet_history.len(), 1);
    }

    #[test]
    fn closing_the_valve_raises_peak_pressure_toward_joukowsky() {
        let mut solver = MoCSolver::new(WaterHammerConfig {
            valve_schedule: ValveSchedule::new(vec![(0.0, 1.0), (0.1, 0.0)]),
            ..config()
        });
        solver.set_inlet(water_inlet());
        solver.run(&geometry(), 21).unwrap();
        let v_steady = solver.grid.q_m3s[20] / solver.area_m2;
        let initial = solver.pressure_profile_pa()[20];
        let dt = solver.dx_m / solver.c_mps;
        for _ in 0..200 {
            solver.run_transient(dt).unwrap();
        }
        let surge = solver.joukowsky_surge(solver.rho_kgm3, v_steady);
        let peak = solver.grid().envelope_max_pa[20];
        assert!(peak - initial > 0.3 * surge);
    }

    #[test]
    fn rejects_too_few_nodes() {
        let mut solver = MoCSolver::new(config());
        solver.set_inlet(water_inlet());
        assert!(matches!(solver.run(&geometry(), 2), Err(MocError::InvalidGrid { .. })));
    }

    #[test]
    fn rejects_valve_as_upstream_boundary() {
        let mut solver = MoCSolver::new(WaterHammerConfig { upstream: BoundaryType::Valve, ..config() });
        solver.set_inlet(water_inlet());
        assert!(matches!(solver.run(&geometry(), 11), Err(MocError::InvalidBoundary { .. })));
    }
}
