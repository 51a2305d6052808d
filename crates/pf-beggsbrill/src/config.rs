//! Heat-transfer mode and the per-run heat-balance configuration.

use pf_core::units::Temperature;

/// How the stepper handles wall heat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatTransferMode {
    /// Q=0; only the Joule-Thomson term (if enabled) affects T.
    Adiabatic,
    /// T_out = T_in; enthalpy handling is trivial.
    Isothermal,
    /// Caller-supplied U used directly.
    SpecifiedU,
    /// Inner film coefficient estimated, used as U.
    EstimatedInnerH,
    /// Inner h composed with wall/coating/insulation/outer resistances.
    DetailedU,
}

/// Heat-balance configuration for a Beggs-Brill run.
#[derive(Debug, Clone, Copy)]
pub struct HeatConfig {
    pub mode: HeatTransferMode,
    pub include_jt: bool,
    pub include_friction_heating: bool,
    pub constant_wall_temperature: Option<Temperature>,
    pub specified_u: Option<f64>,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            mode: HeatTransferMode::Adiabatic,
            include_jt: false,
            include_friction_heating: false,
            constant_wall_temperature: None,
            specified_u: None,
        }
    }
}

/// Stepper-wide behavior flags. `clip_holdup_to_lambda_l` defaults to
/// `false`: the Payne-style clip (`E_L >= lambda_L`) is not applied unless a
/// caller opts in (open question #1).
#[derive(Debug, Clone, Copy)]
pub struct BbConfig {
    pub clip_holdup_to_lambda_l: bool,
}

impl Default for BbConfig {
    fn default() -> Self {
        Self {
            clip_holdup_to_lambda_l: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_adiabatic_no_jt() {
        let cfg = HeatConfig::default();
        assert_eq!(cfg.mode, HeatTransferMode::Adiabatic);
        assert!(!cfg.include_jt);
    }

    #[test]
    fn default_does_not_clip_holdup() {
        assert!(!BbConfig::default().clip_holdup_to_lambda_l);
    }
}
