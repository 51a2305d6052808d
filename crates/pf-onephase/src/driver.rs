//! `OnePhaseCompositionalDriver`: a lean wrapper around a single-phase flow
//! solve. There's no bespoke numerical kernel here beyond driver logic:
//! the momentum balance reuses the Darcy-friction correlation shared
//! across the workspace, and composition transport (when enabled) reuses
//! the flux-limiter scalar advection in this crate.

use pf_core::units::constants::G0_MPS2;
use pf_core::NumericConfig;
use pf_geometry::PipeGeometry;
use pf_thermo::{Composition, Fluid, PhaseTag, Species};

use crate::advection::{advect_scalar, AdvectionScheme};
use crate::error::{OpError, OpResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SolverKind {
    Compositional,
    MomentumOnly,
}

#[derive(Debug, Clone)]
struct OnePhaseNode {
    pressure_pa: f64,
    temperature_k: f64,
    velocity_mps: f64,
    mole_fractions: Vec<(Species, f64)>,
}

pub struct OnePhaseCompositionalDriver {
    numeric: NumericConfig,
    scheme: AdvectionScheme,
    compositional_tracking: bool,
    internal_time_step: f64,
    nodes: Vec<OnePhaseNode>,
    dx_m: f64,
    diameter_m: f64,
    roughness_m: f64,
    theta: f64,
    inlet: Option<Fluid>,
    sim_time_s: f64,
}

impl OnePhaseCompositionalDriver {
    pub fn new(numeric: NumericConfig) -> Self {
        Self {
            numeric,
            scheme: AdvectionScheme::FirstOrderUpwind,
            compositional_tracking: false,
            internal_time_step: 0.05,
            nodes: Vec::new(),
            dx_m: 0.0,
            diameter_m: 0.0,
            roughness_m: 0.0,
            theta: 0.0,
            inlet: None,
            sim_time_s: 0.0,
        }
    }

    pub fn set_advection_scheme(&mut self, scheme: AdvectionScheme) {
        self.scheme = scheme;
    }

    pub fn set_compositional_tracking(&mut self, enabled: bool) {
        self.compositional_tracking = enabled;
    }

    pub fn set_internal_time_step(&mut self, dt: f64) {
        self.internal_time_step = dt.max(1e-6);
    }

    pub fn set_inlet(&mut self, fluid: Fluid) {
        self.inlet = Some(fluid);
    }

    pub fn simulation_time(&self) -> f64 {
        self.sim_time_s
    }

    pub fn pressure_profile_pa(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.pressure_pa).collect()
    }

    pub fn temperature_profile_k(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.temperature_k).collect()
    }

    pub fn velocity_profile_mps(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.velocity_mps).collect()
    }

    /// Initializes uniform nodes from the current inlet state.
    pub fn run(&mut self, geometry: &PipeGeometry, n_nodes: usize) -> OpResult<()> {
        if n_nodes < 2 {
            return Err(OpError::InvalidNodeCount { n: n_nodes });
        }
        let inlet = self.inlet.as_ref().ok_or(OpError::MissingInlet)?.clone();

        let diameter = geometry.diameter().value;
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(OpError::InvalidGeometry { what: "non-positive diameter" });
        }
        self.diameter_m = diameter;
        self.roughness_m = geometry.roughness().value;
        self.theta = geometry.inclination();
        self.dx_m = geometry.length().value / (n_nodes - 1) as f64;

        let phase_idx = inlet.phase_index(PhaseTag::Gas).or(inlet.phase_index(PhaseTag::Oil)).unwrap_or(0);
        let area = geometry.cross_section_area().value;
        let velocity = inlet.phase_volumetric_flow(phase_idx)? / area.max(1e-12);

        self.nodes = (0..n_nodes)
            .map(|_| OnePhaseNode {
                pressure_pa: inlet.pressure().value,
                temperature_k: inlet.temperature().value,
                velocity_mps: velocity,
                mole_fractions: inlet.composition().iter().collect(),
            })
            .collect();

        self.sim_time_s = 0.0;
        Ok(())
    }

    /// Sets the inlet node from the current inlet fluid, selects the solver
    /// kind, and advances by `internal_time_step` sub-steps until `dt` is
    /// consumed, then publishes the outlet fluid.
    pub fn run_transient(&mut self, dt: f64) -> OpResult<Fluid> {
        if self.nodes.is_empty() {
            return Err(OpError::MissingInlet);
        }
        let inlet = self.inlet.as_ref().ok_or(OpError::MissingInlet)?.clone();

        if let Some(first) = self.nodes.first_mut() {
            first.pressure_pa = inlet.pressure().value;
            first.temperature_k = inlet.temperature().value;
            first.mole_fractions = inlet.composition().iter().collect();
        }

        let kind = if self.compositional_tracking { SolverKind::Compositional } else { SolverKind::MomentumOnly };

        let mut remaining = dt;
        while remaining > 1e-12 {
            let step = remaining.min(self.internal_time_step);
            self.advance_one_sub_step(step, kind);
            remaining -= step;
        }
        self.sim_time_s += dt;

        self.publish_outlet(&inlet)
    }

    fn advance_one_sub_step(&mut self, dt: f64, kind: SolverKind) {
        let n = self.nodes.len();
        let v = self.nodes[0].velocity_mps;

        for i in 1..n {
            let rho = 1.0;
            let re = rho * v.abs() * self.diameter_m / 1.5e-5;
            let f = pf_correlations::darcy_friction(re, self.roughness_m / self.diameter_m.max(1e-12));
            let dp_fric = f * (self.dx_m / self.diameter_m) * rho * v * v.abs() / 2.0;
            let dp_hydro = rho * G0_MPS2 * self.dx_m * self.theta.sin();
            self.nodes[i].pressure_pa = (self.nodes[i - 1].pressure_pa - dp_fric - dp_hydro).max(1.0);
            self.nodes[i].temperature_k = self.nodes[i - 1].temperature_k;
            self.nodes[i].velocity_mps = v;
        }

        if kind == SolverKind::Compositional {
            let species: Vec<Species> = self.nodes[0].mole_fractions.iter().map(|(s, _)| *s).collect();
            for species_idx in 0..species.len() {
                let field: Vec<f64> = self.nodes.iter().map(|node| node.mole_fractions.get(species_idx).map(|(_, f)| *f).unwrap_or(0.0)).collect();
                let advected = advect_scalar(&field, v, self.dx_m, dt, self.scheme);
                for (node, value) in self.nodes.iter_mut().zip(advected) {
                    if let Some(entry) = node.mole_fractions.get_mut(species_idx) {
                        entry.1 = value.max(0.0);
                    }
                }
            }
        }
    }

    fn publish_outlet(&self, inlet: &Fluid) -> OpResult<Fluid> {
        let last = self.nodes.last().expect("run() guarantees at least one node");
        let mut outlet = inlet.clone();
        if self.compositional_tracking {
            let comp = Composition::new_mole_fractions(last.mole_fractions.clone())?;
            outlet.set_molar_composition(comp)?;
        }
        outlet.set_pressure(last.pressure_pa, "Pa")?;
        outlet.set_temperature(last.temperature_k, "K")?;
        Ok(outlet)
    }
}
