//! Harmathy/Bendiksen drift velocity and Joukowsky surge.

use pf_core::units::constants::G0_MPS2;

/// Gas drift (rise) velocity relative to the mixture center of volume.
pub fn drift_velocity(rho_l: f64, rho_g: f64, sigma: f64, d: f64, theta: f64, v_mix: f64) -> f64 {
    let delta_rho = (rho_l - rho_g).max(0.0);
    let g = G0_MPS2;

    let f_theta = if theta >= 0.0 {
        (theta.cos() + 1.2 * theta.sin()).max(0.1)
    } else {
        (theta.cos() + 0.3 * theta.sin().abs()).max(0.1)
    };

    let eo = g * delta_rho * d * d / sigma;
    let v_gj = if eo > 40.0 {
        0.35 * (g * d * delta_rho / rho_l).sqrt() * f_theta
    } else {
        let v_gj0 = 1.53 * (g * sigma * delta_rho / (rho_l * rho_l)).powf(0.25);
        v_gj0 * f_theta
    };

    v_gj / (1.0 + 0.1 * v_mix / (g * d).sqrt())
}

/// Joukowsky water-hammer surge: `rho * c * |dv|`.
pub fn joukowsky(rho: f64, c: f64, dv: f64) -> f64 {
    rho * c * dv.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_velocity_positive_for_typical_gas_liquid() {
        let v = drift_velocity(800.0, 10.0, 0.02, 0.2, 0.0, 2.0);
        assert!(v > 0.0 && v.is_finite());
    }

    #[test]
    fn drift_velocity_damped_by_froude() {
        let v_low = drift_velocity(800.0, 10.0, 0.02, 0.2, 0.0, 0.1);
        let v_high = drift_velocity(800.0, 10.0, 0.02, 0.2, 0.0, 20.0);
        assert!(v_high < v_low);
    }

    #[test]
    fn joukowsky_matches_formula() {
        assert_eq!(joukowsky(1000.0, 1200.0, -2.0), 1000.0 * 1200.0 * 2.0);
    }
}
