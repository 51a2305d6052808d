//! `TwoFluidCell`: one control volume's geometry, primitive state and
//! cached phase properties.

use crate::config::FlowRegime;

/// One finite-volume cell along the pipe axis.
#[derive(Debug, Clone)]
pub struct TwoFluidCell {
    pub x: f64,
    pub dx: f64,
    pub theta: f64,
    pub elevation: f64,
    pub roughness: f64,

    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub alpha_g: f64,
    pub alpha_l: f64,
    pub v_g: f64,
    pub v_l: f64,

    pub alpha_w: Option<f64>,
    pub v_w: Option<f64>,
    pub water_cut: f64,

    pub rho_g: f64,
    pub rho_l: f64,
    pub mu_g: f64,
    pub mu_l: f64,
    pub c_g: f64,
    pub c_l: f64,
    pub h_g: f64,
    pub h_l: f64,
    pub sigma: f64,

    pub regime: FlowRegime,
}

impl TwoFluidCell {
    /// Renormalize holdups to sum to 1 and clamp to [0,1].
    pub fn renormalize_holdups(&mut self) {
        self.alpha_g = self.alpha_g.clamp(0.0, 1.0);
        self.alpha_l = self.alpha_l.clamp(0.0, 1.0);
        if let Some(aw) = &mut self.alpha_w {
            *aw = aw.clamp(0.0, 1.0);
        }
        let total = self.alpha_g + self.alpha_l;
        if total > 1e-12 {
            self.alpha_g /= total;
            self.alpha_l /= total;
        } else {
            self.alpha_g = 0.5;
            self.alpha_l = 0.5;
        }
    }

    /// Mixture density for wave-speed / CFL purposes.
    pub fn mixture_density(&self) -> f64 {
        self.alpha_g * self.rho_g + self.alpha_l * self.rho_l
    }

    /// Mixture velocity (volumetric-flow-weighted).
    pub fn mixture_velocity(&self) -> f64 {
        self.alpha_g * self.v_g + self.alpha_l * self.v_l
    }

    /// Effective liquid density combining oil and water by volume.
    pub fn effective_liquid_density(rho_o: f64, rho_w: f64, phi_o: f64, phi_w: f64) -> f64 {
        phi_o * rho_o + phi_w * rho_w
    }

    /// Brinkman viscosity mixing rule for the effective liquid phase,
    /// continuous phase chosen by volume majority.
    pub fn brinkman_liquid_viscosity(mu_o: f64, mu_w: f64, phi_o: f64, phi_w: f64) -> f64 {
        let (mu_cont, phi_disp) = if phi_o >= phi_w { (mu_o, phi_w) } else { (mu_w, phi_o) };
        mu_cont * (1.0 - phi_disp.min(0.999)).powf(-2.5)
    }
}


#[cfg(test)]
mod proptests {
    use super::tests::sample_cell;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn renormalize_always_leaves_holdups_summing_to_one(
            ag in -1.0_f64..2.0_f64,
            al in -1.0_f64..2.0_f64,
        ) {
            let mut cell = sample_cell();
            cell.alpha_g = ag;
            cell.alpha_l = al;
            cell.renormalize_holdups();
            prop_assert!((cell.alpha_g + cell.alpha_l - 1.0).abs() < 1e-9);
            prop_assert!(cell.alpha_g >= 0.0 && cell.alpha_g <= 1.0);
            prop_assert!(cell.alpha_l >= 0.0 && cell.alpha_l <= 1.0);
        }
    }
}
