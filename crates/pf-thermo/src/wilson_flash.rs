//! Self-contained surrogate [`ThermoBackend`]: Wilson-correlation K-values
//! plus a Rachford-Rice two-phase (vapor/oil) flash, with water split off as
//! a third, immiscible aqueous phase. This stands in for an external EOS
//! engine so the rest of the workspace is independently testable.

use crate::backend::ThermoBackend;
use crate::composition::Composition;
use crate::error::{FluidError, FluidResult};
use crate::phase::{FlashResult, PhaseState, PhaseTag};
use crate::species::Species;
use pf_core::units::{Pressure, Temperature};

/// Universal gas constant [J/(kmol*K)]
const R_UNIV: f64 = 8314.462_618;
/// Reference temperature for sensible-heat enthalpy [K]
const T_REF: f64 = 298.15;

#[derive(Debug, Clone, Copy, Default)]
pub struct SurrogateBackend;

/// One equilibrium species: (species, overall mole fraction, Wilson K-value).
type KEntry = (Species, f64, f64);

impl SurrogateBackend {
    pub fn new() -> Self {
        Self
    }

    /// Wilson correlation for K-value = y_i/x_i at equilibrium.
    fn wilson_k(species: Species, p_pa: f64, t_k: f64) -> f64 {
        let c = species.constants();
        (c.p_crit / p_pa) * ((5.373 * (1.0 + c.acentric) * (1.0 - c.t_crit / t_k)).exp())
    }

    fn rachford_rice(items: &[KEntry], v: f64) -> f64 {
        items
            .iter()
            .map(|(_, z, k)| z * (k - 1.0) / (1.0 + v * (k - 1.0)))
            .sum()
    }

    /// Solve Rachford-Rice for a hydrocarbon sub-mixture (mole fractions
    /// normalized to sum to 1), returning the vapor mole fraction and the
    /// per-species K-values used.
    fn flash_hydrocarbons(items: &[(Species, f64)], p_pa: f64, t_k: f64) -> (f64, Vec<KEntry>) {
        let ks: Vec<KEntry> = items
            .iter()
            .map(|(sp, z)| (*sp, *z, Self::wilson_k(*sp, p_pa, t_k)))
            .collect();

        if ks.iter().all(|(_, _, k)| *k >= 1.0) {
            return (1.0, ks);
        }
        if ks.iter().all(|(_, _, k)| *k <= 1.0) {
            return (0.0, ks);
        }

        let mut v_lo = 0.0_f64;
        let mut v_hi = 1.0_f64;
        let mut v_mid = 0.5;
        for _ in 0..100 {
            v_mid = 0.5 * (v_lo + v_hi);
            let f = Self::rachford_rice(&ks, v_mid);
            if f.abs() < 1e-10 {
                break;
            }
            // Rachford-Rice objective is monotone decreasing in v.
            if f > 0.0 {
                v_lo = v_mid;
            } else {
                v_hi = v_mid;
            }
        }
        (v_mid, ks)
    }
}

impl ThermoBackend for SurrogateBackend {
    fn name(&self) -> &str {
        "wilson-rachford-rice-surrogate"
    }

    fn flash_tp(&self, comp: &Composition, p: Pressure, t: Temperature) -> FluidResult<FlashResult> {
        let p_pa = p.value;
        let t_k = t.value;
        if !(p_pa.is_finite() && p_pa > 0.0) {
            return Err(FluidError::NonPhysical { what: "pressure" });
        }
        if !(t_k.is_finite() && t_k > 0.0) {
            return Err(FluidError::NonPhysical { what: "temperature" });
        }

        let z_water = comp.mole_fraction(Species::Water);
        let hc_items: Vec<(Species, f64)> = comp.iter().filter(|(sp, _)| *sp != Species::Water).collect();
        let hc_total: f64 = hc_items.iter().map(|(_, z)| *z).sum();

        // (phase state with mass_fraction left at 0, absolute mass proxy)
        let mut built: Vec<(PhaseState, f64)> = Vec::new();

        if z_water > 0.0 {
            let wc = Species::Water.constants();
            let k_water = Self::wilson_k(Species::Water, p_pa, t_k);
            let mass_water = z_water * wc.molar_mass;
            if k_water >= 1.0 {
                let h = wc.cp_gas * (t_k - T_REF) + wc.h_vap;
                let rho = p_pa * wc.molar_mass / (R_UNIV * t_k);
                let cv = (wc.cp_gas - R_UNIV / wc.molar_mass).max(1.0);
                let gamma = wc.cp_gas / cv;
                let c = (gamma * R_UNIV * t_k / wc.molar_mass).max(1.0).sqrt();
                built.push((
                    PhaseState {
                        tag: PhaseTag::Gas,
                        mass_fraction: 0.0,
                        rho,
                        mu: wc.mu_gas,
                        cp: wc.cp_gas,
                        k: wc.k_gas,
                        c,
                        h,
                        mu_jt: wc.mu_jt,
                        molar_mass: wc.molar_mass,
                    },
                    mass_water,
                ));
            } else {
                let h = wc.cp_liquid * (t_k - T_REF);
                built.push((
                    PhaseState {
                        tag: PhaseTag::Aqueous,
                        mass_fraction: 0.0,
                        rho: wc.rho_liquid,
                        mu: wc.mu_liquid,
                        cp: wc.cp_liquid,
                        k: wc.k_liquid,
                        c: 1480.0,
                        h,
                        mu_jt: wc.mu_jt,
                        molar_mass: wc.molar_mass,
                    },
                    mass_water,
                ));
            }
        }

        if hc_total > 0.0 {
            let hc_norm: Vec<(Species, f64)> = hc_items.iter().map(|(sp, z)| (*sp, *z / hc_total)).collect();
            let (v, ks) = Self::flash_hydrocarbons(&hc_norm, p_pa, t_k);

            let mut gas_items: Vec<(Species, f64)> = Vec::new();
            let mut liq_items: Vec<(Species, f64)> = Vec::new();
            for (sp, z, k) in &ks {
                let x = if v >= 1.0 {
                    0.0
                } else if v <= 0.0 {
                    *z
                } else {
                    z / (1.0 + v * (k - 1.0))
                };
                let y = k * x;
                if v > 0.0 {
                    gas_items.push((*sp, y));
                }
                if v < 1.0 {
                    liq_items.push((*sp, x));
                }
            }

            if v > 0.0 {
                let gas_mole_sum: f64 = gas_items.iter().map(|(_, y)| *y).sum();
                if gas_mole_sum > 0.0 {
                    let m_gas: f64 = gas_items
                        .iter()
                        .map(|(sp, y)| sp.constants().molar_mass * y / gas_mole_sum)
                        .sum();
                    let mass_gas = v * hc_total * m_gas;
                    let (rho, mu, cp, k_cond, mu_jt) = mix_gas_properties(&gas_items, gas_mole_sum, p_pa, t_k, m_gas);
                    let cv = (cp - R_UNIV / m_gas).max(1.0);
                    let gamma = cp / cv;
                    let c = (gamma * R_UNIV * t_k / m_gas).max(1.0).sqrt();
                    let h: f64 = gas_items
                        .iter()
                        .map(|(sp, y)| {
                            let frac = y / gas_mole_sum;
                            let sc = sp.constants();
                            frac * (sc.cp_gas * (t_k - T_REF) + sc.h_vap)
                        })
                        .sum();
                    built.push((
                        PhaseState {
                            tag: PhaseTag::Gas,
                            mass_fraction: 0.0,
                            rho,
                            mu,
                            cp,
                            k: k_cond,
                            c,
                            h,
                            mu_jt,
                            molar_mass: m_gas,
                        },
                        mass_gas,
                    ));
                }
            }

            if v < 1.0 {
                let liq_mole_sum: f64 = liq_items.iter().map(|(_, x)| *x).sum();
                if liq_mole_sum > 0.0 {
                    let m_liq: f64 = liq_items
                        .iter()
                        .map(|(sp, x)| sp.constants().molar_mass * x / liq_mole_sum)
                        .sum();
                    let mass_liq = (1.0 - v) * hc_total * m_liq;
                    let (rho, mu, cp, k_cond) = mix_liquid_properties(&liq_items, liq_mole_sum);
                    let h: f64 = liq_items
                        .iter()
                        .map(|(sp, x)| (x / liq_mole_sum) * sp.constants().cp_liquid * (t_k - T_REF))
                        .sum();
                    built.push((
                        PhaseState {
                            tag: PhaseTag::Oil,
                            mass_fraction: 0.0,
                            rho,
                            mu,
                            cp,
                            k: k_cond,
                            c: 1200.0,
                            h,
                            mu_jt: 0.0,
                            molar_mass: m_liq,
                        },
                        mass_liq,
                    ));
                }
            }
        }

        if built.is_empty() {
            return Err(FluidError::NonPhysical {
                what: "flash produced no phases",
            });
        }

        let total_mass: f64 = built.iter().map(|(_, m)| m).sum();
        let h_mix: f64 = built.iter().map(|(p, m)| p.h * m).sum::<f64>() / total_mass;

        // Gas phase first, matching the phase-ordering convention used elsewhere.
        built.sort_by_key(|(p, _)| if p.tag == PhaseTag::Gas { 0 } else { 1 });
        let phases = built
            .into_iter()
            .map(|(mut phase, mass)| {
                phase.mass_fraction = mass / total_mass;
                phase
            })
            .collect();

        Ok(FlashResult { phases, h_mix })
    }
}

#[allow(clippy::type_complexity)]
fn mix_gas_properties(
    items: &[(Species, f64)],
    mole_sum: f64,
    p_pa: f64,
    t_k: f64,
    m_gas: f64,
) -> (f64, f64, f64, f64, f64) {
    let mut mu = 0.0;
    let mut cp = 0.0;
    let mut k_cond = 0.0;
    let mut mu_jt = 0.0;
    for (sp, y) in items {
        let frac = y / mole_sum;
        let c = sp.constants();
        mu += frac * c.mu_gas;
        cp += frac * c.cp_gas;
        k_cond += frac * c.k_gas;
        mu_jt += frac * c.mu_jt;
    }
    let rho = p_pa * m_gas / (R_UNIV * t_k);
    (rho, mu, cp, k_cond, mu_jt)
}

fn mix_liquid_properties(items: &[(Species, f64)], mole_sum: f64) -> (f64, f64, f64, f64) {
    let mut inv_rho_mass = 0.0;
    let mut mass_sum = 0.0;
    let mut ln_mu = 0.0;
    let mut cp = 0.0;
    let mut k_cond = 0.0;
    for (sp, x) in items {
        let frac = x / mole_sum;
        let c = sp.constants();
        let mass_i = frac * c.molar_mass;
        inv_rho_mass += mass_i / c.rho_liquid;
        mass_sum += mass_i;
        ln_mu += frac * c.mu_liquid.ln();
        cp += frac * c.cp_liquid;
        k_cond += frac * c.k_liquid;
    }
    let rho = if inv_rho_mass > 0.0 { mass_sum / inv_rho_mass } else { 800.0 };
    (rho, ln_mu.exp(), cp, k_cond)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{k, pa};

    #[test]
    fn single_phase_gas_above_cricondentherm() {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.9), (Species::Ethane, 0.1)]).unwrap();
        let backend = SurrogateBackend::new();
        let flash = backend.flash_tp(&comp, pa(50.0e5), k(303.15)).unwrap();
        assert_eq!(flash.phases.len(), 1);
        assert_eq!(flash.phases[0].tag, PhaseTag::Gas);
    }

    #[test]
    fn two_phase_split_has_gas_and_oil() {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.5), (Species::NPentane, 0.5)]).unwrap();
        let backend = SurrogateBackend::new();
        let flash = backend.flash_tp(&comp, pa(50.0e5), k(300.0)).unwrap();
        assert!(flash.phase_index(PhaseTag::Gas).is_some());
        assert!(flash.phase_index(PhaseTag::Oil).is_some());
        let sum: f64 = flash.phases.iter().map(|p| p.mass_fraction).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn water_present_gives_aqueous_phase_at_low_temperature() {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.8), (Species::Water, 0.2)]).unwrap();
        let backend = SurrogateBackend::new();
        let flash = backend.flash_tp(&comp, pa(50.0e5), k(300.0)).unwrap();
        assert!(flash.phase_index(PhaseTag::Aqueous).is_some());
    }

    #[test]
    fn ph_flash_round_trips_temperature() {
        let comp = Composition::pure(Species::Methane);
        let backend = SurrogateBackend::new();
        let flash_tp = backend.flash_tp(&comp, pa(50.0e5), k(320.0)).unwrap();
        let flash_ph = backend.flash_ph(&comp, pa(50.0e5), flash_tp.h_mix).unwrap();
        assert!((flash_ph.h_mix - flash_tp.h_mix).abs() < 10.0);
    }

    #[test]
    fn gas_phase_ordered_first() {
        let comp = Composition::new_mole_fractions(vec![(Species::Methane, 0.5), (Species::NPentane, 0.5)]).unwrap();
        let backend = SurrogateBackend::new();
        let flash = backend.flash_tp(&comp, pa(50.0e5), k(300.0)).unwrap();
        assert_eq!(flash.phases[0].tag, PhaseTag::Gas);
    }
}
