//! Two-fluid flow-regime detection: a deterministic, Taitel-Dukler flavored
//! boundary map. The exact boundary curves are a closure choice of this
//! component; what's load-bearing is that identical inputs give identical
//! regimes and neighboring inputs don't flip unpredictably.

use pf_core::units::constants::G0_MPS2;

use crate::config::FlowRegime;

/// Classify a cell's flow regime from in-situ holdup and phase velocities.
pub fn classify_two_fluid_regime(alpha_l: f64, v_g: f64, v_l: f64, d: f64, theta: f64) -> FlowRegime {
    if alpha_l <= 0.001 || alpha_l >= 0.999 {
        return FlowRegime::SinglePhase;
    }

    let alpha_g = 1.0 - alpha_l;
    let v_sg = alpha_g * v_g;
    let v_sl = alpha_l * v_l;
    let v_mix = v_sg + v_sl;
    let fr_g = v_sg.abs() / (G0_MPS2 * d * theta.cos().max(1e-3)).sqrt();

    if v_sg > 8.0 && alpha_l < 0.15 {
        return FlowRegime::AnnularMist;
    }
    if alpha_l > 0.6 && v_mix < 5.0 {
        return FlowRegime::Bubble;
    }
    if (0.2..=0.6).contains(&alpha_l) && v_mix > 2.0 {
        return FlowRegime::Slug;
    }
    if fr_g > 1.5 {
        return FlowRegime::StratifiedWavy;
    }
    FlowRegime::StratifiedSmooth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_pure_gas_is_single_phase() {
        assert_eq!(classify_two_fluid_regime(0.0005, 10.0, 1.0, 0.2, 0.0), FlowRegime::SinglePhase);
    }

    #[test]
    fn near_pure_liquid_is_single_phase() {
        assert_eq!(classify_two_fluid_regime(0.9995, 0.5, 2.0, 0.2, 0.0), FlowRegime::SinglePhase);
    }

    #[test]
    fn high_gas_velocity_thin_film_is_annular_mist() {
        assert_eq!(classify_two_fluid_regime(0.05, 30.0, 1.0, 0.2, 0.0), FlowRegime::AnnularMist);
    }

    #[test]
    fn moderate_holdup_with_high_mixture_velocity_is_slug() {
        assert_eq!(classify_two_fluid_regime(0.4, 5.0, 3.0, 0.2, 0.0), FlowRegime::Slug);
    }

    #[test]
    fn low_velocity_low_holdup_horizontal_is_stratified_smooth() {
        assert_eq!(classify_two_fluid_regime(0.1, 0.5, 0.2, 0.2, 0.0), FlowRegime::StratifiedSmooth);
    }

    #[test]
    fn regime_is_deterministic_for_identical_inputs() {
        let a = classify_two_fluid_regime(0.3, 4.0, 2.0, 0.2, 0.05);
        let b = classify_two_fluid_regime(0.3, 4.0, 2.0, 0.2, 0.05);
        assert_eq!(a, b);
    }
}
