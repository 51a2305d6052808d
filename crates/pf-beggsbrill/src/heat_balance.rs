//! Composes wall-heat (NTU-effectiveness), Joule-Thomson and
//! friction-dissipation contributions into a specific-enthalpy update for
//! the next segment's PH-flash.

use crate::config::{HeatConfig, HeatTransferMode};

/// Inputs to one segment's heat balance, already mass-weighted across phases
/// where the underlying property is phase-specific (Cp, JT coefficient).
#[derive(Debug, Clone, Copy)]
pub struct HeatBalanceInputs {
    pub mdot_kgps: f64,
    pub cp_mix: f64,
    pub rho_mix: f64,
    pub t_in_k: f64,
    pub u_w_m2k: f64,
    pub diameter_m: f64,
    pub length_m: f64,
    pub wall_temperature_k: f64,
    pub delta_p_total_pa: f64,
    pub delta_p_friction_pa: f64,
    pub mu_jt_k_per_pa: f64,
}

/// Specific-enthalpy delta [J/kg] to add to the segment's inlet enthalpy,
/// from the wall/JT/friction decomposition. The three contributions are
/// additive and independently switchable.
pub fn enthalpy_delta(inputs: &HeatBalanceInputs, heat: &HeatConfig) -> f64 {
    let mut dh = 0.0;

    if !matches!(heat.mode, HeatTransferMode::Adiabatic | HeatTransferMode::Isothermal) && inputs.mdot_kgps > 0.0 {
        let ntu = inputs.u_w_m2k * std::f64::consts::PI * inputs.diameter_m * inputs.length_m
            / (inputs.mdot_kgps * inputs.cp_mix);
        let delta_t_wall = (inputs.wall_temperature_k - inputs.t_in_k) * (1.0 - (-ntu).exp());
        dh += inputs.cp_mix * delta_t_wall;
    }

    if heat.include_jt {
        dh += inputs.cp_mix * (-inputs.mu_jt_k_per_pa * inputs.delta_p_total_pa);
    }

    if heat.include_friction_heating {
        dh += inputs.delta_p_friction_pa.abs() / inputs.rho_mix.max(1e-9);
    }

    dh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeatConfig;

    fn base_inputs() -> HeatBalanceInputs {
        HeatBalanceInputs {
            mdot_kgps: 10.0,
            cp_mix: 2200.0,
            rho_mix: 50.0,
            t_in_k: 300.0,
            u_w_m2k: 25.0,
            diameter_m: 0.2,
            length_m: 500.0,
            wall_temperature_k: 278.15,
            delta_p_total_pa: 1.0e5,
            delta_p_friction_pa: 0.5e5,
            mu_jt_k_per_pa: 5.0e-6,
        }
    }

    #[test]
    fn adiabatic_with_no_flags_gives_zero() {
        let cfg = HeatConfig::default();
        assert_eq!(enthalpy_delta(&base_inputs(), &cfg), 0.0);
    }

    #[test]
    fn specified_u_cools_toward_colder_wall() {
        let cfg = HeatConfig {
            mode: crate::config::HeatTransferMode::SpecifiedU,
            ..HeatConfig::default()
        };
        let dh = enthalpy_delta(&base_inputs(), &cfg);
        assert!(dh < 0.0, "wall colder than fluid should remove enthalpy");
    }

    #[test]
    fn jt_cooling_with_positive_coefficient_and_pressure_drop() {
        let cfg = HeatConfig {
            include_jt: true,
            ..HeatConfig::default()
        };
        let dh = enthalpy_delta(&base_inputs(), &cfg);
        assert!(dh < 0.0, "positive mu_jt with pressure drop should cool (remove enthalpy)");
    }

    #[test]
    fn friction_heating_adds_enthalpy() {
        let cfg = HeatConfig {
            include_friction_heating: true,
            ..HeatConfig::default()
        };
        let dh = enthalpy_delta(&base_inputs(), &cfg);
        assert!(dh > 0.0);
    }
}
