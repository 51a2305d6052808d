//! Layered cylindrical thermal resistance, referenced to inner area.

/// Overall heat-transfer coefficient `U_i` [W/(m^2*K)], referenced to the
/// pipe inner area, composing inner convection, wall, coating, insulation,
/// outer convection and an optional buried-soil term. A zero-thickness
/// layer contributes zero resistance.
#[allow(clippy::too_many_arguments)]
pub fn overall_u(
    d_inner: f64,
    t_wall: f64,
    k_wall: f64,
    t_coat: f64,
    k_coat: f64,
    t_ins: f64,
    k_ins: f64,
    h_in: f64,
    h_out: f64,
    buried: bool,
    h_bury: f64,
    k_soil: f64,
) -> f64 {
    let r_i = d_inner / 2.0;
    let mut r_outer = r_i;
    let mut resistance = 1.0 / h_in;

    for (thickness, k) in [(t_wall, k_wall), (t_coat, k_coat), (t_ins, k_ins)] {
        if thickness > 0.0 {
            let r_next = r_outer + thickness;
            resistance += r_i * (r_next / r_outer).ln() / k;
            r_outer = r_next;
        }
    }

    resistance += r_i / (h_out * r_outer);

    if buried {
        resistance += r_i * (2.0 * h_bury / r_outer).ln() / k_soil;
    }

    1.0 / resistance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_pipe_matches_series_convection_and_wall() {
        let u = overall_u(0.2, 0.01, 45.0, 0.0, 1.0, 0.0, 1.0, 500.0, 20.0, false, 0.0, 1.0);
        assert!(u > 0.0 && u < 20.0);
    }

    #[test]
    fn adding_insulation_reduces_u() {
        let u_bare = overall_u(0.2, 0.01, 45.0, 0.0, 1.0, 0.0, 1.0, 500.0, 20.0, false, 0.0, 1.0);
        let u_insulated = overall_u(0.2, 0.01, 45.0, 0.0, 1.0, 0.05, 0.03, 500.0, 20.0, false, 0.0, 1.0);
        assert!(u_insulated < u_bare);
    }

    #[test]
    fn burial_adds_resistance() {
        let u_exposed = overall_u(0.2, 0.01, 45.0, 0.0, 1.0, 0.0, 1.0, 500.0, 20.0, false, 0.0, 1.0);
        let u_buried = overall_u(0.2, 0.01, 45.0, 0.0, 1.0, 0.0, 1.0, 500.0, 20.0, true, 1.5, 1.2);
        assert!(u_buried < u_exposed);
    }
}
