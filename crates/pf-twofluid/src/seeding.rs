//! Steady-state drift-flux seeding sweep, used only by `run` to initialize
//! cell primitives before transient stepping begins.

use pf_core::units::constants::G0_MPS2;
use pf_correlations::{darcy_friction, drift_velocity};

use crate::cell::TwoFluidCell;
use crate::config::TwoFluidConfig;

const C0_DEFAULT_DRIFT_FLUX: f64 = 1.2;

/// Local in-situ gas holdup from superficial velocities via drift-flux.
pub fn calculate_local_holdup(
    v_sg: f64,
    v_sl: f64,
    rho_g: f64,
    rho_l: f64,
    sigma: f64,
    d: f64,
    theta: f64,
) -> f64 {
    let v_mix = v_sg + v_sl;
    let v_gj = drift_velocity(rho_l, rho_g, sigma.max(1e-6), d, theta, v_mix);
    let alpha_g = v_sg / (C0_DEFAULT_DRIFT_FLUX * v_mix + v_gj).max(1e-9);
    alpha_g.clamp(0.001, 0.999)
}

/// Apply the valley/peak terrain modifier to a liquid holdup given the
/// previous and current segment inclination.
pub fn apply_terrain_modifier(alpha_l: f64, theta_prev: f64, theta: f64) -> f64 {
    let delta_theta = theta - theta_prev;
    let modified = if theta_prev < -0.01 && delta_theta > 0.01 {
        alpha_l * (1.0 + 0.5 * delta_theta.min(0.2))
    } else if theta_prev > 0.01 && delta_theta < -0.01 {
        alpha_l * (1.0 - 0.3 * delta_theta.abs().min(0.2))
    } else {
        alpha_l
    };
    modified.clamp(0.001, 0.999)
}

/// Seeds cell primitives by sweeping downstream, computing a simplified
/// pressure gradient (friction + gravity) and a drift-flux holdup at each
/// cell, up to `max_sweeps` relaxation passes (default behavior: a single
/// downstream sweep is already self-consistent since each cell only depends
/// on the previous one; repeated sweeps let phase densities — held fixed
/// during the sweep — settle against the newly seeded pressures in a later
/// thermo refresh).
pub fn seed_steady_state(cells: &mut [TwoFluidCell], area: f64, mdot_gas: f64, mdot_liquid: f64, _config: &TwoFluidConfig) {
    let d = 2.0 * (area / std::f64::consts::PI).sqrt();

    let mut theta_prev = cells.first().map(|c| c.theta).unwrap_or(0.0);

    for i in 0..cells.len() {
        let theta = cells[i].theta;
        let rho_g = cells[i].rho_g;
        let rho_l = cells[i].rho_l;
        let sigma = cells[i].sigma;

        let v_sg = mdot_gas / (rho_g * area).max(1e-9);
        let v_sl = mdot_liquid / (rho_l * area).max(1e-9);

        let alpha_g = calculate_local_holdup(v_sg, v_sl, rho_g, rho_l, sigma, d, theta);
        let mut alpha_l = (1.0 - alpha_g).clamp(0.001, 0.999);
        alpha_l = apply_terrain_modifier(alpha_l, theta_prev, theta);
        let alpha_g = 1.0 - alpha_l;

        let v_g = v_sg / alpha_g.max(1e-6);
        let v_l = v_sl / alpha_l.max(1e-6);

        if i > 0 {
            let rho_mix = rho_g * alpha_g + rho_l * alpha_l;
            let v_mix = v_sg + v_sl;
            let mu_ns = cells[i].mu_g * alpha_g + cells[i].mu_l * alpha_l;
            let re = rho_mix * v_mix * d / mu_ns.max(1e-9);
            let f = darcy_friction(re, cells[i].roughness / d);
            let delta_p_fric = f * (cells[i].dx / d) * rho_mix * v_mix * v_mix / 2.0;
            let delta_p_hydro = rho_mix * G0_MPS2 * (cells[i].dx * theta.sin());
            let delta_p = delta_p_fric + delta_p_hydro;
            cells[i].pressure_pa = (cells[i - 1].pressure_pa - delta_p).max(1.0);
        }

        cells[i].alpha_g = alpha_g;
        cells[i].alpha_l = alpha_l;
        cells[i].v_g = v_g;
        cells[i].v_l = v_l;

        theta_prev = theta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holdup_is_clamped_to_the_documented_range() {
        let h = calculate_local_holdup(100.0, 1e-6, 50.0, 700.0, 0.02, 0.2, 0.0);
        assert!(h >= 0.001 && h <= 0.999);
        let h = calculate_local_holdup(1e-6, 100.0, 50.0, 700.0, 0.02, 0.2, 0.0);
        assert!(h >= 0.001 && h <= 0.999);
    }

    #[test]
    fn valley_modifier_increases_holdup() {
        let base = 0.2;
        let modified = apply_terrain_modifier(base, -0.05, 0.05);
        assert!(modified > base);
    }

    #[test]
    fn peak_modifier_decreases_holdup() {
        let base = 0.2;
        let modified = apply_terrain_modifier(base, 0.05, -0.05);
        assert!(modified < base);
    }

    #[test]
    fn no_terrain_change_leaves_holdup_unchanged() {
        let base = 0.3;
        assert_eq!(apply_terrain_modifier(base, 0.0, 0.0), base);
    }
}
