//! Stratified-flow wetted-perimeter geometry shared by the RHS assembly
//! (wall friction, interfacial drag) and the flow-regime classifier.

/// Liquid-wetted perimeter [m] for a circular pipe of diameter `d` holding
/// liquid at holdup `alpha_l`, assuming a flat (stratified) interface.
pub fn liquid_perimeter(d: f64, alpha_l: f64) -> f64 {
    let alpha_l = alpha_l.clamp(0.0, 1.0);
    d * (1.0 - 2.0 * alpha_l).clamp(-1.0, 1.0).acos()
}

/// Gas-wetted perimeter [m].
pub fn gas_perimeter(d: f64, alpha_l: f64) -> f64 {
    std::f64::consts::PI * d - liquid_perimeter(d, alpha_l)
}

/// Gas-liquid interfacial width [m] (chord length of the stratified
/// interface).
pub fn interfacial_width(d: f64, alpha_l: f64) -> f64 {
    let alpha_l = alpha_l.clamp(0.0, 1.0);
    let cos_half = (1.0 - 2.0 * alpha_l).clamp(-1.0, 1.0);
    d * (1.0 - cos_half * cos_half).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_full_pipe_has_half_the_total_perimeter() {
        let d = 0.2;
        let total = std::f64::consts::PI * d;
        let s_l = liquid_perimeter(d, 0.5);
        assert!((s_l - total / 2.0).abs() < 1e-9);
    }

    #[test]
    fn gas_and_liquid_perimeters_sum_to_circumference() {
        let d = 0.3;
        for alpha_l in [0.05, 0.2, 0.5, 0.8, 0.95] {
            let total = std::f64::consts::PI * d;
            let sum = liquid_perimeter(d, alpha_l) + gas_perimeter(d, alpha_l);
            assert!((sum - total).abs() < 1e-9);
        }
    }

    #[test]
    fn interfacial_width_is_zero_at_the_extremes() {
        let d = 0.25;
        assert!(interfacial_width(d, 0.0) < 1e-9);
        assert!(interfacial_width(d, 1.0) < 1e-9);
        assert!(interfacial_width(d, 0.5) > 0.0);
    }
}
