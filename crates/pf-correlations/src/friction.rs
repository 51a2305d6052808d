//! Darcy friction factor and pipe-flow Nusselt-number correlations.

/// Darcy friction factor from Reynolds number and relative roughness.
///
/// Laminar below Re=2300, Haaland above Re=4000, linearly blended between.
/// Monotone-decreasing in `re` for fixed `eps_over_d` in the turbulent branch.
pub fn darcy_friction(re: f64, eps_over_d: f64) -> f64 {
    if re < 1e-10 {
        return 0.0;
    }
    if re < 2300.0 {
        return 64.0 / re;
    }
    if re < 4000.0 {
        let f_lo = 64.0 / 2300.0;
        let f_hi = haaland(4000.0, eps_over_d);
        let t = (re - 2300.0) / (4000.0 - 2300.0);
        return f_lo * (1.0 - t) + f_hi * t;
    }
    haaland(re, eps_over_d)
}

fn haaland(re: f64, eps_over_d: f64) -> f64 {
    let inner = (eps_over_d / 3.7).powf(1.11) + 6.9 / re;
    (-1.8 * inner.log10()).powi(-2)
}

/// Gnielinski correlation for turbulent pipe Nusselt number, valid for
/// Pr in [0.5, 2000], Re in [3000, 5e6]. Falls back to a Re-only Nu
/// correlation if the caller doesn't have `f` on hand (`f <= 0`).
pub fn gnielinski_nu(re: f64, pr: f64, f: f64) -> f64 {
    let f = if f > 0.0 {
        f
    } else {
        (0.790 * re.ln() - 1.64).powi(-2)
    };
    (f / 8.0) * (re - 1000.0) * pr / (1.0 + 12.7 * (f / 8.0).sqrt() * (pr.powf(2.0 / 3.0) - 1.0))
}

/// Pipe-flow Nusselt number across the laminar/transition/turbulent range.
pub fn nu_pipe(re: f64, pr: f64, f: f64) -> f64 {
    if re < 2300.0 {
        return 3.66;
    }
    if re < 3000.0 {
        let nu_hi = gnielinski_nu(3000.0, pr, f);
        let t = (re - 2300.0) / (3000.0 - 2300.0);
        return 3.66 * (1.0 - t) + nu_hi * t;
    }
    gnielinski_nu(re, pr, f)
}

/// Shah two-phase heat-transfer enhancement factor from the Martinelli
/// parameter. Degenerate fallback used when liquid properties are
/// unavailable (non-finite). Returns 1 outside `x in (0.001, 0.999)`.
pub fn shah_enhancement(x: f64, rho_g: f64, rho_l: f64, mu_g: f64, mu_l: f64) -> f64 {
    if !(x > 0.001 && x < 0.999) {
        return 1.0;
    }
    if !(rho_l.is_finite() && mu_l.is_finite() && rho_l > 0.0 && mu_l > 0.0) {
        return 1.0 + 2.0 * x * (1.0 - x);
    }
    let xtt = ((1.0 - x) / x).powf(0.9) * (rho_g / rho_l).sqrt() * (mu_l / mu_g).powf(0.1);
    let e = if xtt > 0.1 {
        1.0 + 3.8 * xtt.powf(-0.45)
    } else {
        2.0 + 3.0 * xtt.powf(-0.5)
    };
    e.min(10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laminar_matches_64_over_re() {
        assert!((darcy_friction(1000.0, 1e-4) - 0.064).abs() < 1e-9);
    }

    #[test]
    fn zero_reynolds_is_zero() {
        assert_eq!(darcy_friction(0.0, 1e-4), 0.0);
    }

    #[test]
    fn turbulent_friction_monotone_decreasing_in_re() {
        let f1 = darcy_friction(1.0e4, 1e-4);
        let f2 = darcy_friction(1.0e5, 1e-4);
        let f3 = darcy_friction(1.0e6, 1e-4);
        assert!(f1 > f2 && f2 > f3);
    }

    #[test]
    fn nu_pipe_laminar_constant() {
        assert_eq!(nu_pipe(1000.0, 4.0, 0.03), 3.66);
    }

    #[test]
    fn nu_pipe_turbulent_positive() {
        let nu = nu_pipe(1.0e5, 4.0, 0.02);
        assert!(nu > 0.0 && nu.is_finite());
    }

    #[test]
    fn shah_outside_quality_range_is_unity() {
        assert_eq!(shah_enhancement(0.0001, 5.0, 800.0, 1e-5, 1e-4), 1.0);
        assert_eq!(shah_enhancement(0.9999, 5.0, 800.0, 1e-5, 1e-4), 1.0);
    }

    #[test]
    fn shah_degenerate_fallback() {
        let e = shah_enhancement(0.3, 5.0, f64::NAN, 1e-5, f64::NAN);
        assert!((e - (1.0 + 2.0 * 0.3 * 0.7)).abs() < 1e-9);
    }

    #[test]
    fn shah_capped_at_ten() {
        let e = shah_enhancement(0.002, 1.0, 900.0, 1e-5, 1e-2);
        assert!(e <= 10.0);
    }
}
