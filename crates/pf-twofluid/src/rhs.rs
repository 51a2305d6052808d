//! Conservation-law right-hand side: upwind mass/momentum advection,
//! Bendiksen-style interfacial drag, stratified wall friction and gravity.
//! The pressure-gradient term is deliberately absent here; it's applied
//! semi-implicitly after the RK4 step.

use pf_core::units::constants::G0_MPS2;

use crate::cell::TwoFluidCell;
use crate::config::TwoFluidConfig;
use crate::integrator::{ConservativeState, TransientModel};
use crate::stratified_geometry::{gas_perimeter, interfacial_width, liquid_perimeter};

/// Interfacial friction factor for the Bendiksen-style drag closure. The
/// exact coefficient is not standardized across the literature; this is a
/// representative stratified-flow value.
const INTERFACIAL_FRICTION_FACTOR: f64 = 0.014;

pub struct TwoFluidModel<'a> {
    pub cells: &'a [TwoFluidCell],
    pub area: f64,
    pub config: &'a TwoFluidConfig,
}

struct Primitive {
    alpha_g: f64,
    alpha_l: f64,
    v_g: f64,
    v_l: f64,
}

fn recover_primitive(u: &[f64; 4], rho_g: f64, rho_l: f64, area: f64) -> Primitive {
    let alpha_g = (u[0] / (rho_g * area)).clamp(0.0, 1.0);
    let alpha_l = (u[1] / (rho_l * area)).clamp(0.0, 1.0);
    let v_g = if u[0].abs() > 1e-9 { u[2] / u[0] } else { 0.0 };
    let v_l = if u[1].abs() > 1e-9 { u[3] / u[1] } else { 0.0 };
    Primitive { alpha_g, alpha_l, v_g, v_l }
}

fn upwind_flux(left: f64, right: f64, v: f64) -> f64 {
    if v >= 0.0 {
        left * v
    } else {
        right * v
    }
}

impl<'a> TwoFluidModel<'a> {
    fn primitives(&self, state: &ConservativeState) -> Vec<Primitive> {
        state
            .0
            .iter()
            .zip(self.cells)
            .map(|(u, cell)| recover_primitive(u, cell.rho_g, cell.rho_l, self.area))
            .collect()
    }
}

impl<'a> TransientModel for TwoFluidModel<'a> {
    type State = ConservativeState;

    fn rhs(&self, state: &Self::State) -> Self::State {
        let n = self.cells.len();
        let prims = self.primitives(state);
        let area = self.area;

        let mass_g: Vec<f64> = prims.iter().zip(self.cells).map(|(p, c)| p.alpha_g * c.rho_g * area).collect();
        let mass_l: Vec<f64> = prims.iter().zip(self.cells).map(|(p, c)| p.alpha_l * c.rho_l * area).collect();

        let mut derivative = vec![[0.0_f64; 4]; n];

        for i in 0..n {
            let cell = &self.cells[i];
            let p = &prims[i];

            let left = if i == 0 { i } else { i - 1 };
            let right = if i + 1 == n { i } else { i + 1 };

            let flux_mass_g_face_w = upwind_flux(mass_g[left], mass_g[i], prims[left].v_g);
            let flux_mass_g_face_e = upwind_flux(mass_g[i], mass_g[right], prims[i].v_g);
            let flux_mass_l_face_w = upwind_flux(mass_l[left], mass_l[i], prims[left].v_l);
            let flux_mass_l_face_e = upwind_flux(mass_l[i], mass_l[right], prims[i].v_l);

            let mom_g = mass_g[i] * p.v_g;
            let mom_g_left = mass_g[left] * prims[left].v_g;
            let mom_g_right = mass_g[right] * prims[right].v_g;
            let flux_mom_g_w = upwind_flux(mom_g_left, mom_g, prims[left].v_g);
            let flux_mom_g_e = upwind_flux(mom_g, mom_g_right, p.v_g);

            let mom_l = mass_l[i] * p.v_l;
            let mom_l_left = mass_l[left] * prims[left].v_l;
            let mom_l_right = mass_l[right] * prims[right].v_l;
            let flux_mom_l_w = upwind_flux(mom_l_left, mom_l, prims[left].v_l);
            let flux_mom_l_e = upwind_flux(mom_l, mom_l_right, p.v_l);

            let d_mass_g = -(flux_mass_g_face_e - flux_mass_g_face_w) / cell.dx;
            let d_mass_l = -(flux_mass_l_face_e - flux_mass_l_face_w) / cell.dx;
            let mut d_mom_g = -(flux_mom_g_e - flux_mom_g_w) / cell.dx;
            let mut d_mom_l = -(flux_mom_l_e - flux_mom_l_w) / cell.dx;

            // Gravity.
            d_mom_g -= p.alpha_g * cell.rho_g * G0_MPS2 * cell.theta.sin() * area;
            d_mom_l -= p.alpha_l * cell.rho_l * G0_MPS2 * cell.theta.sin() * area;

            // Wall friction, stratified wetted-perimeter shares.
            let s_l = liquid_perimeter(2.0 * (area / std::f64::consts::PI).sqrt(), p.alpha_l);
            let s_g = gas_perimeter(2.0 * (area / std::f64::consts::PI).sqrt(), p.alpha_l);
            let d_hyd = 2.0 * (area / std::f64::consts::PI).sqrt();
            let re_g = cell.rho_g * p.v_g.abs() * d_hyd / cell.mu_g.max(1e-9);
            let re_l = cell.rho_l * p.v_l.abs() * d_hyd / cell.mu_l.max(1e-9);
            let f_g = pf_correlations::darcy_friction(re_g, cell.roughness / d_hyd.max(1e-9));
            let f_l = pf_correlations::darcy_friction(re_l, cell.roughness / d_hyd.max(1e-9));

            let wall_force_g = 0.5 * f_g * cell.rho_g * p.v_g * p.v_g.abs() * s_g;
            let wall_force_l = 0.5 * f_l * cell.rho_l * p.v_l * p.v_l.abs() * s_l;
            d_mom_g -= wall_force_g;
            d_mom_l -= wall_force_l;

            // Interfacial drag (Bendiksen-style), symmetric on gas/liquid.
            let c0 = self.config.drift_closure.c0();
            let s_i = interfacial_width(d_hyd, p.alpha_l);
            let rel_v = p.v_g - p.v_l;
            let drag = 0.5 * INTERFACIAL_FRICTION_FACTOR * (c0 / 1.2) * cell.rho_g * rel_v * rel_v.abs() * s_i;
            d_mom_g -= drag;
            d_mom_l += drag;

            derivative[i] = [d_mass_g, d_mass_l, d_mom_g, d_mom_l];
        }

        ConservativeState(derivative)
    }

    fn add(a: &Self::State, b: &Self::State) -> Self::State {
        a.add(b)
    }

    fn scale(a: &Self::State, factor: f64) -> Self::State {
        a.scale(factor)
    }
}
