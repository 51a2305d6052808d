//! The Beggs-Brill marching stepper: walks a pipe from inlet to
//! outlet one segment at a time, classifying flow regime, accumulating
//! hydrostatic and frictional pressure drop, and updating the fluid's
//! thermodynamic state through a heat balance at each node.

use pf_core::units::{self, constants::G0_MPS2, imperial};
use pf_geometry::{PipeGeometry, ThermalBuildup};
use pf_thermo::{Fluid, PhaseTag};

use crate::config::{BbConfig, HeatConfig, HeatTransferMode};
use crate::error::{BbError, BbResult};
use crate::heat_balance::{self, HeatBalanceInputs};

/// Per-node and per-segment arrays produced by one full stepper run.
///
/// Node arrays (length `n_inc + 1`) hold state *at* a node; segment arrays
/// (length `n_inc`) hold quantities computed *for* the segment between node
/// `i` and `i+1`. `delta_p_segment` is node-length with `delta_p_segment[0]
/// == 0.0`: the pressure drop accumulated to reach that node from the inlet.
#[derive(Debug, Clone)]
pub struct SegmentProfile {
    pub pressure_pa: Vec<f64>,
    pub temperature_k: Vec<f64>,
    pub cumulative_length_m: Vec<f64>,
    pub cumulative_elevation_m: Vec<f64>,
    pub delta_p_segment: Vec<f64>,

    pub regime: Vec<&'static str>,
    pub v_sl: Vec<f64>,
    pub v_sg: Vec<f64>,
    pub v_mix: Vec<f64>,
    pub mu_no_slip: Vec<f64>,
    pub rho_no_slip: Vec<f64>,
    pub rho_liquid: Vec<f64>,
    pub holdup: Vec<f64>,
    pub reynolds_no_slip: Vec<f64>,
}

impl SegmentProfile {
    fn with_capacity(n_inc: usize) -> Self {
        Self {
            pressure_pa: Vec::with_capacity(n_inc + 1),
            temperature_k: Vec::with_capacity(n_inc + 1),
            cumulative_length_m: Vec::with_capacity(n_inc + 1),
            cumulative_elevation_m: Vec::with_capacity(n_inc + 1),
            delta_p_segment: Vec::with_capacity(n_inc + 1),
            regime: Vec::with_capacity(n_inc),
            v_sl: Vec::with_capacity(n_inc),
            v_sg: Vec::with_capacity(n_inc),
            v_mix: Vec::with_capacity(n_inc),
            mu_no_slip: Vec::with_capacity(n_inc),
            rho_no_slip: Vec::with_capacity(n_inc),
            rho_liquid: Vec::with_capacity(n_inc),
            holdup: Vec::with_capacity(n_inc),
            reynolds_no_slip: Vec::with_capacity(n_inc),
        }
    }
}

fn regime_name(regime: pf_correlations::BbRegime) -> &'static str {
    use pf_correlations::BbRegime::*;
    match regime {
        Segregated => "segregated",
        Intermittent => "intermittent",
        Distributed => "distributed",
        Transition => "transition",
        SinglePhase => "single_phase",
        Unknown => "unknown",
    }
}

/// A scoped view converting a segment's geometric inputs to the imperial
/// field units the Beggs-Brill correlation was originally tabulated in, and
/// back again on the way out. Never mutates shared state; lives only for
/// the duration of one segment's friction-factor calculation, so no global
/// mutable unit mode leaks between segments.
struct ImperialView {
    diameter_ft: f64,
    roughness_ft: f64,
}

impl ImperialView {
    fn from_si(diameter_m: f64, roughness_m: f64) -> Self {
        Self {
            diameter_ft: imperial::m_to_ft(diameter_m),
            roughness_ft: imperial::m_to_ft(roughness_m),
        }
    }

    fn relative_roughness(&self) -> f64 {
        self.roughness_ft / self.diameter_ft
    }
}

/// Drives the per-segment Beggs-Brill march.
pub struct BeggsBrillStepper<'a> {
    geometry: &'a PipeGeometry,
    heat: HeatConfig,
    bb: BbConfig,
    n_inc: usize,
}

impl<'a> BeggsBrillStepper<'a> {
    pub fn new(geometry: &'a PipeGeometry, heat: HeatConfig, bb: BbConfig, n_inc: usize) -> BbResult<Self> {
        if n_inc == 0 {
            return Err(BbError::InvalidArg { what: "n_inc must be >= 1" });
        }
        Ok(Self { geometry, heat, bb, n_inc })
    }

    /// Run the march, mutating `fluid`'s (P, T) state in place and returning
    /// the full profile. `fluid`'s pressure/temperature on entry are the
    /// inlet conditions; on return they are the outlet conditions.
    pub fn run(&self, fluid: &mut Fluid) -> BbResult<SegmentProfile> {
        let n = self.n_inc;
        let mut profile = SegmentProfile::with_capacity(n);

        let elevations = self.geometry.node_elevations(n);
        let seg_len = self.geometry.length().value / n as f64;
        let area = self.geometry.cross_section_area().value;
        let diameter = self.geometry.diameter().value;
        let roughness = self.geometry.roughness().value;
        let wall_temp_k = self
            .heat
            .constant_wall_temperature
            .map(|t| t.value)
            .unwrap_or(self.geometry.ambient_temperature().value);

        profile.pressure_pa.push(fluid.pressure().value);
        profile.temperature_k.push(fluid.temperature().value);
        profile.cumulative_length_m.push(0.0);
        profile.cumulative_elevation_m.push(elevations[0]);
        profile.delta_p_segment.push(0.0);

        for seg in 0..n {
            let theta = self.geometry.segment_inclination(n, seg);
            let dz = elevations[seg + 1] - elevations[seg];

            let step = self.step_segment(fluid, area, diameter, roughness, seg_len, dz, theta, wall_temp_k, seg)?;

            profile.regime.push(step.regime_name);
            profile.v_sl.push(step.v_sl);
            profile.v_sg.push(step.v_sg);
            profile.v_mix.push(step.v_mix);
            profile.mu_no_slip.push(step.mu_ns);
            profile.rho_no_slip.push(step.rho_ns);
            profile.rho_liquid.push(step.rho_liquid);
            profile.holdup.push(step.holdup);
            profile.reynolds_no_slip.push(step.reynolds_ns);

            profile.pressure_pa.push(fluid.pressure().value);
            profile.temperature_k.push(fluid.temperature().value);
            profile.cumulative_length_m.push(seg_len * (seg + 1) as f64);
            profile.cumulative_elevation_m.push(elevations[seg + 1]);
            profile.delta_p_segment.push(step.delta_p_total);
        }

        Ok(profile)
    }

    #[allow(clippy::too_many_arguments)]
    fn step_segment(
        &self,
        fluid: &mut Fluid,
        area: f64,
        diameter: f64,
        roughness: f64,
        seg_len: f64,
        dz: f64,
        theta: f64,
        wall_temp_k: f64,
        seg_index: usize,
    ) -> BbResult<SegmentStep> {
        let gas_idx = fluid.phase_index(PhaseTag::Gas);
        let liquid_idx = liquid_phase_index(fluid);

        let q_gas = gas_idx.map(|i| fluid.phase_volumetric_flow(i)).transpose()?.unwrap_or(0.0);
        let q_liq = liquid_idx.map(|i| fluid.phase_volumetric_flow(i)).transpose()?.unwrap_or(0.0);

        let v_sg = q_gas / area;
        let v_sl = q_liq / area;
        let v_mix = v_sg + v_sl;

        if v_mix <= 1e-12 {
            return Err(BbError::InvalidArg { what: "zero mixture velocity" });
        }

        let fr = v_mix * v_mix / (G0_MPS2 * diameter);
        let lambda_l = v_sl / v_mix;

        let regime = pf_correlations::classify_regime(lambda_l, fr);

        let rho_gas = gas_idx.map(|i| fluid.phase_density(i)).transpose()?.unwrap_or(0.0);
        let rho_liquid = liquid_idx.map(|i| fluid.phase_density(i)).transpose()?.unwrap_or(rho_gas.max(1.0));
        let mu_gas = gas_idx.map(|i| fluid.phase_viscosity(i)).transpose()?.unwrap_or(0.0);
        let mu_liquid = liquid_idx.map(|i| fluid.phase_viscosity(i)).transpose()?.unwrap_or(mu_gas.max(1e-6));
        let sigma = match (gas_idx, liquid_idx) {
            (Some(g), Some(l)) => fluid.surface_tension(g, l)?,
            _ => 0.02,
        };

        let nvl = v_sl * (rho_liquid / (G0_MPS2 * sigma.max(1e-6))).powf(0.25);
        let e_l0 = pf_correlations::beggs_brill_holdup(lambda_l, fr, regime);
        let b_theta = pf_correlations::beggs_brill_inclination(lambda_l, fr, nvl, theta, regime);
        let mut holdup = (b_theta * e_l0).clamp(0.0, 1.0);
        if self.bb.clip_holdup_to_lambda_l {
            holdup = holdup.max(lambda_l);
        }

        let rho_ns = rho_liquid * lambda_l + rho_gas * (1.0 - lambda_l);
        let rho_mix = rho_liquid * holdup + rho_gas * (1.0 - holdup);
        let mu_ns = mu_liquid * lambda_l + mu_gas * (1.0 - lambda_l);

        let delta_p_hydro = rho_mix * G0_MPS2 * dz;

        let imp = ImperialView::from_si(diameter, roughness);
        let reynolds_ns = rho_ns * v_mix * diameter / mu_ns.max(1e-9);
        let f_ns = pf_correlations::darcy_friction(reynolds_ns, imp.relative_roughness());

        let y = if holdup > 1e-9 { lambda_l / (holdup * holdup) } else { lambda_l };
        let s = if y > 1.0 && y < 1.2 {
            (2.2 * y - 1.2).ln()
        } else {
            let ln_y = y.ln();
            ln_y / (-0.0523 + 3.182 * ln_y - 0.8725 * ln_y.powi(2) + 0.01853 * ln_y.powi(4))
        };
        let f_tp = f_ns * s.exp();

        let delta_p_fric = f_tp * (seg_len / diameter) * rho_ns * v_mix * v_mix / 2.0;

        let delta_p_total = delta_p_hydro + delta_p_fric;
        let p_in = fluid.pressure().value;
        let p_out = p_in - delta_p_total;
        if !(p_out.is_finite() && p_out > 0.0) {
            return Err(BbError::OutletPressureNegative {
                segment: seg_index,
                pressure_pa: p_out,
            });
        }

        let cp_mix = {
            let cp_gas = gas_idx.map(|i| fluid.phase_cp(i)).transpose()?.unwrap_or(0.0);
            let cp_liq = liquid_idx.map(|i| fluid.phase_cp(i)).transpose()?.unwrap_or(cp_gas.max(1.0));
            cp_liq * holdup + cp_gas * (1.0 - holdup)
        };
        let mu_jt_mix = {
            let jt_gas = gas_idx.map(|i| fluid.phase_joule_thomson(i)).transpose()?.unwrap_or(0.0);
            let jt_liq = liquid_idx.map(|i| fluid.phase_joule_thomson(i)).transpose()?.unwrap_or(0.0);
            jt_liq * holdup + jt_gas * (1.0 - holdup)
        };

        let u = self.overall_u(fluid, gas_idx, liquid_idx, reynolds_ns, cp_mix, mu_ns, rho_ns);

        let hb_inputs = HeatBalanceInputs {
            mdot_kgps: fluid.mass_rate().value,
            cp_mix,
            rho_mix,
            t_in_k: fluid.temperature().value,
            u_w_m2k: u,
            diameter_m: diameter,
            length_m: seg_len,
            wall_temperature_k: wall_temp_k,
            delta_p_total_pa: delta_p_total,
            delta_p_friction_pa: delta_p_fric,
            mu_jt_k_per_pa: mu_jt_mix,
        };
        let dh = heat_balance::enthalpy_delta(&hb_inputs, &self.heat);

        fluid.set_pressure(p_out, "Pa").map_err(BbError::Thermo)?;
        match self.heat.mode {
            HeatTransferMode::Isothermal => {
                fluid.re_flash_tp().map_err(BbError::Thermo)?;
            }
            _ => {
                let h_new = fluid.mixture_enthalpy() + dh;
                fluid.ph_flash(h_new).map_err(BbError::Thermo)?;
            }
        }

        Ok(SegmentStep {
            regime_name: regime_name(regime),
            v_sl,
            v_sg,
            v_mix,
            mu_ns,
            rho_ns,
            rho_liquid,
            holdup,
            reynolds_ns,
            delta_p_total,
        })
    }

    fn overall_u(
        &self,
        fluid: &Fluid,
        gas_idx: Option<usize>,
        liquid_idx: Option<usize>,
        reynolds_ns: f64,
        cp_mix: f64,
        mu_ns: f64,
        rho_ns: f64,
    ) -> f64 {
        match self.heat.mode {
            HeatTransferMode::Adiabatic | HeatTransferMode::Isothermal => 0.0,
            HeatTransferMode::SpecifiedU => self.heat.specified_u.unwrap_or(0.0),
            HeatTransferMode::EstimatedInnerH | HeatTransferMode::DetailedU => {
                let k_mix = {
                    let k_gas = gas_idx.and_then(|i| fluid.phase_conductivity(i).ok()).unwrap_or(0.0);
                    let k_liq = liquid_idx.and_then(|i| fluid.phase_conductivity(i).ok()).unwrap_or(k_gas.max(0.1));
                    k_liq.max(k_gas).max(1e-3)
                };
                let pr = (mu_ns * cp_mix / k_mix).max(1e-3);
                let f = pf_correlations::darcy_friction(reynolds_ns, 1e-5);
                let nu = pf_correlations::nu_pipe(reynolds_ns, pr, f);
                let h_in = nu * k_mix / self.geometry.diameter().value;
                if matches!(self.heat.mode, HeatTransferMode::EstimatedInnerH) {
                    h_in
                } else {
                    let h_out = 15.0;
                    ThermalBuildup::new(self.geometry).overall_u(h_in, h_out)
                }
            }
        }
    }
}

struct SegmentStep {
    regime_name: &'static str,
    v_sl: f64,
    v_sg: f64,
    v_mix: f64,
    mu_ns: f64,
    rho_ns: f64,
    rho_liquid: f64,
    holdup: f64,
    reynolds_ns: f64,
    delta_p_total: f64,
}

/// Phase index used for the liquid side of the two-phase correlation: the
/// first present liquid phase, preferring oil over aqueous when both are
/// present. If no hydrocarbon/aqueous liquid phase is present at all and the
/// fluid is single-phase liquid, phase index 0 is read directly (open
/// question #3: single-phase liquid is not tagged separately by the
/// surrogate backend).
fn liquid_phase_index(fluid: &Fluid) -> Option<usize> {
    if let Some(i) = fluid.phase_index(PhaseTag::Oil) {
        return Some(i);
    }
    if let Some(i) = fluid.phase_index(PhaseTag::Aqueous) {
        return Some(i);
    }
    if fluid.phase_index(PhaseTag::Gas).is_none() && fluid.phase_count() >= 1 {
        return Some(0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_thermo::{Composition, Species, SurrogateBackend};
    use std::sync::Arc;
    use units::{k, kgps, m, pa};
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    fn steel_k() -> pf_core::units::ThermalConductivity {
        pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(45.0)
    }

    fn gas_fluid() -> Fluid {
        let comp = Composition::new_mole_fractions(vec![
            (Species::Methane, 0.8),
            (Species::Ethane, 0.15),
            (Species::NPentane, 0.05),
        ])
        .unwrap();
        Fluid::new(Arc::new(SurrogateBackend::new()), comp, pa(80.0e5), k(310.0), kgps(5.0)).unwrap()
    }

    fn horizontal_geometry(length_m: f64) -> PipeGeometry {
        PipeGeometry::from_length_and_angle(m(length_m), m(0.2), m(0.01), m(4.6e-5), 0.0, steel_k(), k(288.15)).unwrap()
    }

    #[test]
    fn horizontal_gas_pipe_pressure_drops_monotonically() {
        let geom = horizontal_geometry(5000.0);
        let heat = HeatConfig::default();
        let bb = BbConfig::default();
        let stepper = BeggsBrillStepper::new(&geom, heat, bb, 10).unwrap();
        let mut fluid = gas_fluid();
        let profile = stepper.run(&mut fluid).unwrap();

        for w in profile.pressure_pa.windows(2) {
            assert!(w[1] <= w[0] + 1e-6, "pressure should be non-increasing along the pipe");
        }
        assert_eq!(profile.delta_p_segment[0], 0.0);
        assert_eq!(profile.pressure_pa.len(), 11);
    }

    #[test]
    fn adiabatic_run_does_not_change_mixture_enthalpy_materially() {
        let geom = horizontal_geometry(1000.0);
        let stepper = BeggsBrillStepper::new(&geom, HeatConfig::default(), BbConfig::default(), 5).unwrap();
        let mut fluid = gas_fluid();
        let h_before = fluid.mixture_enthalpy();
        stepper.run(&mut fluid).unwrap();
        let h_after = fluid.mixture_enthalpy();
        assert!((h_after - h_before).abs() < h_before.abs().max(1.0) * 0.2);
    }

    #[test]
    fn isothermal_mode_holds_temperature_constant() {
        let geom = horizontal_geometry(2000.0);
        let heat = HeatConfig {
            mode: HeatTransferMode::Isothermal,
            ..HeatConfig::default()
        };
        let stepper = BeggsBrillStepper::new(&geom, heat, BbConfig::default(), 4).unwrap();
        let mut fluid = gas_fluid();
        let t_before = fluid.temperature().value;
        stepper.run(&mut fluid).unwrap();
        assert!((fluid.temperature().value - t_before).abs() < 1e-6);
    }

    #[test]
    fn vertical_near_zero_flow_liquid_segment_matches_hydrostatic_head() {
        // A vanishingly small flow rate stands in for true zero flow: the
        // stepper rejects an exactly-zero mixture velocity as degenerate
        // (no superficial velocities to classify a regime from), but at
        // this rate frictional drop is many orders of magnitude below the
        // hydrostatic term and the comparison still isolates it cleanly.
        let length_m = 1000.0;
        let geom = PipeGeometry::from_length_and_angle(
            m(length_m),
            m(0.2),
            m(0.01),
            m(4.6e-5),
            std::f64::consts::FRAC_PI_2,
            steel_k(),
            k(310.0),
        )
        .unwrap();
        let heat = HeatConfig {
            mode: HeatTransferMode::Isothermal,
            ..HeatConfig::default()
        };
        let stepper = BeggsBrillStepper::new(&geom, heat, BbConfig::default(), 20).unwrap();

        let comp = Composition::pure(Species::NPentane);
        let mut fluid =
            Fluid::new(Arc::new(SurrogateBackend::new()), comp, pa(80.0e5), k(310.0), kgps(1e-4)).unwrap();

        let p_in = fluid.pressure().value;
        let rho_l = fluid.phase_density(0).unwrap();
        let profile = stepper.run(&mut fluid).unwrap();
        let p_out = *profile.pressure_pa.last().unwrap();

        let expected_dp = rho_l * G0_MPS2 * length_m;
        let actual_dp = p_in - p_out;
        let rel_err = (actual_dp - expected_dp).abs() / expected_dp;
        assert!(
            rel_err < 1e-3,
            "expected dp {expected_dp}, got {actual_dp} (rel err {rel_err})"
        );
    }

    #[test]
    fn steep_pressure_drop_over_long_pipe_yields_outlet_pressure_negative() {
        let geom = horizontal_geometry(2_000_000.0);
        let stepper = BeggsBrillStepper::new(&geom, HeatConfig::default(), BbConfig::default(), 20).unwrap();
        let mut fluid = gas_fluid();
        let result = stepper.run(&mut fluid);
        assert!(matches!(result, Err(BbError::OutletPressureNegative { .. })));
    }

    #[test]
    fn running_twice_from_the_same_inlet_state_gives_identical_profiles() {
        let geom = horizontal_geometry(5000.0);
        let stepper = BeggsBrillStepper::new(&geom, HeatConfig::default(), BbConfig::default(), 10).unwrap();

        let mut fluid_a = gas_fluid();
        let profile_a = stepper.run(&mut fluid_a).unwrap();

        let mut fluid_b = gas_fluid();
        let profile_b = stepper.run(&mut fluid_b).unwrap();

        assert_eq!(profile_a.pressure_pa, profile_b.pressure_pa);
        assert_eq!(profile_a.temperature_k, profile_b.temperature_k);
        assert_eq!(profile_a.holdup, profile_b.holdup);
    }
}
