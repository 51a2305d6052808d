//! Downstream valve boundary: combines the orifice equation
//! `Q = Cv·τ·sqrt(H − H_d)` with the surviving `C+` characteristic
//! `H = C+ − B·Q` into a quadratic in Q.

/// Solve `B·Q^2 + (Cv^2 τ^2)·Q + Cv^2 τ^2·(H_d − C+) = 0` for the
/// non-negative root, falling back to `Q = Q_prev·τ, H = C+` when the
/// discriminant is negative or the valve is essentially closed, and to
/// `Q = Q_prev·τ` when no non-negative root exists.
pub fn solve_valve(b: f64, cv: f64, tau: f64, h_d: f64, c_plus: f64, q_prev: f64) -> (f64, f64) {
    if tau < 1.0e-3 {
        return (0.0, c_plus);
    }

    let a = b;
    let bb = cv * cv * tau * tau;
    let cc = cv * cv * tau * tau * (h_d - c_plus);
    let discriminant = bb * bb - 4.0 * a * cc;

    if discriminant < 0.0 || !discriminant.is_finite() {
        return (0.0, c_plus);
    }

    let sqrt_disc = discriminant.sqrt();
    let q1 = (-bb + sqrt_disc) / (2.0 * a);
    let q2 = (-bb - sqrt_disc) / (2.0 * a);

    let candidate = match (q1 >= 0.0 && q1.is_finite(), q2 >= 0.0 && q2.is_finite()) {
        (true, true) => Some(q1.min(q2)),
        (true, false) => Some(q1),
        (false, true) => Some(q2),
        (false, false) => None,
    };

    match candidate {
        Some(q) => (q, c_plus - b * q),
        None => (q_prev * tau, c_plus - b * q_prev * tau),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_closed_valve_gives_zero_flow() {
        let (q, h) = solve_valve(500.0, 0.01, 0.0, 0.0, 120.0, 0.08);
        assert_eq!(q, 0.0);
        assert_eq!(h, 120.0);
    }

    #[test]
    fn open_valve_with_positive_head_gives_positive_flow() {
        let (q, h) = solve_valve(500.0, 0.01, 1.0, 0.0, 120.0, 0.08);
        assert!(q > 0.0);
        assert!(h.is_finite());
        assert!((h - (120.0 - 500.0 * q)).abs() < 1e-6);
    }

    #[test]
    fn negative_discriminant_falls_back_to_closed() {
        // Downstream head above the upstream characteristic: no physical
        // forward-flow solution exists.
        let (q, h) = solve_valve(500.0, 0.01, 1.0, 1000.0, 0.0, 0.08);
        assert_eq!(q, 0.0);
        assert_eq!(h, 0.0);
    }
}
