//! Chemical species relevant to pipeline multiphase flow, with the small set
//! of per-species constants the [`crate::wilson_flash`] surrogate needs.

/// Species carried through pipeline compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Methane,
    Ethane,
    Propane,
    NButane,
    Isobutane,
    NPentane,
    Isopentane,
    NHexane,
    Nitrogen,
    CarbonDioxide,
    HydrogenSulfide,
    Water,
}

/// Physical constants used by the Wilson-correlation surrogate flash and the
/// closed-form, constant-property model.
///
/// Values are standard textbook constants (Tc, Pc, acentric factor) plus
/// engineering-grade constant-property approximations for liquid density,
/// viscosity, heat capacity and a representative Joule-Thomson coefficient.
/// These are deliberately approximate: a real EOS engine is out of scope here.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesConstants {
    /// Molar mass [kg/kmol]
    pub molar_mass: f64,
    /// Critical temperature [K]
    pub t_crit: f64,
    /// Critical pressure [Pa]
    pub p_crit: f64,
    /// Acentric factor [-]
    pub acentric: f64,
    /// Ideal-gas specific heat capacity [J/(kg*K)]
    pub cp_gas: f64,
    /// Liquid density at reference conditions [kg/m^3]
    pub rho_liquid: f64,
    /// Liquid specific heat capacity [J/(kg*K)]
    pub cp_liquid: f64,
    /// Liquid dynamic viscosity [Pa*s]
    pub mu_liquid: f64,
    /// Gas dynamic viscosity at reference conditions [Pa*s]
    pub mu_gas: f64,
    /// Gas thermal conductivity [W/(m*K)]
    pub k_gas: f64,
    /// Liquid thermal conductivity [W/(m*K)]
    pub k_liquid: f64,
    /// Representative Joule-Thomson coefficient [K/Pa]
    pub mu_jt: f64,
    /// Surface tension against its own vapor [N/m]
    pub sigma: f64,
    /// Representative latent heat of vaporization [J/kg]
    pub h_vap: f64,
}

impl Species {
    pub const ALL: [Species; 12] = [
        Species::Methane,
        Species::Ethane,
        Species::Propane,
        Species::NButane,
        Species::Isobutane,
        Species::NPentane,
        Species::Isopentane,
        Species::NHexane,
        Species::Nitrogen,
        Species::CarbonDioxide,
        Species::HydrogenSulfide,
        Species::Water,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Methane => "CH4",
            Species::Ethane => "C2H6",
            Species::Propane => "C3H8",
            Species::NButane => "nC4H10",
            Species::Isobutane => "iC4H10",
            Species::NPentane => "nC5H12",
            Species::Isopentane => "iC5H12",
            Species::NHexane => "nC6H14",
            Species::Nitrogen => "N2",
            Species::CarbonDioxide => "CO2",
            Species::HydrogenSulfide => "H2S",
            Species::Water => "H2O",
        }
    }

    pub fn constants(&self) -> SpeciesConstants {
        match self {
            Species::Methane => SpeciesConstants {
                molar_mass: 16.043,
                t_crit: 190.56,
                p_crit: 4.599e6,
                acentric: 0.011,
                cp_gas: 2220.0,
                rho_liquid: 422.0,
                cp_liquid: 3480.0,
                mu_liquid: 1.1e-4,
                mu_gas: 1.1e-5,
                k_gas: 0.0332,
                k_liquid: 0.19,
                mu_jt: 5.5e-6,
                sigma: 1.3e-2,
                h_vap: 5.10e5,
            },
            Species::Ethane => SpeciesConstants {
                molar_mass: 30.070,
                t_crit: 305.32,
                p_crit: 4.872e6,
                acentric: 0.099,
                cp_gas: 1730.0,
                rho_liquid: 545.0,
                cp_liquid: 2850.0,
                mu_liquid: 1.6e-4,
                mu_gas: 9.4e-6,
                k_gas: 0.0210,
                k_liquid: 0.14,
                mu_jt: 5.0e-6,
                sigma: 1.5e-2,
                h_vap: 4.89e5,
            },
            Species::Propane => SpeciesConstants {
                molar_mass: 44.097,
                t_crit: 369.83,
                p_crit: 4.248e6,
                acentric: 0.152,
                cp_gas: 1670.0,
                rho_liquid: 580.0,
                cp_liquid: 2500.0,
                mu_liquid: 1.1e-4,
                mu_gas: 8.0e-6,
                k_gas: 0.0180,
                k_liquid: 0.11,
                mu_jt: 6.0e-6,
                sigma: 1.6e-2,
                h_vap: 4.25e5,
            },
            Species::NButane => SpeciesConstants {
                molar_mass: 58.123,
                t_crit: 425.12,
                p_crit: 3.796e6,
                acentric: 0.200,
                cp_gas: 1690.0,
                rho_liquid: 580.0,
                cp_liquid: 2400.0,
                mu_liquid: 1.6e-4,
                mu_gas: 7.5e-6,
                k_gas: 0.0160,
                k_liquid: 0.11,
                mu_jt: 6.5e-6,
                sigma: 1.8e-2,
                h_vap: 3.86e5,
            },
            Species::Isobutane => SpeciesConstants {
                molar_mass: 58.123,
                t_crit: 408.14,
                p_crit: 3.640e6,
                acentric: 0.184,
                cp_gas: 1660.0,
                rho_liquid: 560.0,
                cp_liquid: 2390.0,
                mu_liquid: 1.5e-4,
                mu_gas: 7.5e-6,
                k_gas: 0.0160,
                k_liquid: 0.10,
                mu_jt: 6.5e-6,
                sigma: 1.7e-2,
                h_vap: 3.67e5,
            },
            Species::NPentane => SpeciesConstants {
                molar_mass: 72.150,
                t_crit: 469.70,
                p_crit: 3.370e6,
                acentric: 0.251,
                cp_gas: 1650.0,
                rho_liquid: 626.0,
                cp_liquid: 2320.0,
                mu_liquid: 2.2e-4,
                mu_gas: 6.9e-6,
                k_gas: 0.0140,
                k_liquid: 0.11,
                mu_jt: 7.0e-6,
                sigma: 1.6e-2,
                h_vap: 3.57e5,
            },
            Species::Isopentane => SpeciesConstants {
                molar_mass: 72.150,
                t_crit: 460.40,
                p_crit: 3.380e6,
                acentric: 0.227,
                cp_gas: 1640.0,
                rho_liquid: 616.0,
                cp_liquid: 2300.0,
                mu_liquid: 2.1e-4,
                mu_gas: 6.9e-6,
                k_gas: 0.0140,
                k_liquid: 0.10,
                mu_jt: 7.0e-6,
                sigma: 1.5e-2,
                h_vap: 3.43e5,
            },
            Species::NHexane => SpeciesConstants {
                molar_mass: 86.177,
                t_crit: 507.60,
                p_crit: 3.025e6,
                acentric: 0.300,
                cp_gas: 1650.0,
                rho_liquid: 655.0,
                cp_liquid: 2270.0,
                mu_liquid: 3.0e-4,
                mu_gas: 6.3e-6,
                k_gas: 0.0125,
                k_liquid: 0.12,
                mu_jt: 7.5e-6,
                sigma: 1.8e-2,
                h_vap: 3.35e5,
            },
            Species::Nitrogen => SpeciesConstants {
                molar_mass: 28.013,
                t_crit: 126.19,
                p_crit: 3.396e6,
                acentric: 0.037,
                cp_gas: 1040.0,
                rho_liquid: 807.0,
                cp_liquid: 2040.0,
                mu_liquid: 1.6e-4,
                mu_gas: 1.76e-5,
                k_gas: 0.0260,
                k_liquid: 0.14,
                mu_jt: -2.0e-7,
                sigma: 8.9e-3,
                h_vap: 1.99e5,
            },
            Species::CarbonDioxide => SpeciesConstants {
                molar_mass: 44.010,
                t_crit: 304.13,
                p_crit: 7.377e6,
                acentric: 0.224,
                cp_gas: 850.0,
                rho_liquid: 1101.0,
                cp_liquid: 2400.0,
                mu_liquid: 1.0e-4,
                mu_gas: 1.49e-5,
                k_gas: 0.0166,
                k_liquid: 0.10,
                mu_jt: 1.1e-6,
                sigma: 1.2e-2,
                h_vap: 3.82e5,
            },
            Species::HydrogenSulfide => SpeciesConstants {
                molar_mass: 34.082,
                t_crit: 373.53,
                p_crit: 9.005e6,
                acentric: 0.094,
                cp_gas: 1000.0,
                rho_liquid: 800.0,
                cp_liquid: 2200.0,
                mu_liquid: 1.2e-4,
                mu_gas: 1.26e-5,
                k_gas: 0.0146,
                k_liquid: 0.16,
                mu_jt: 3.0e-6,
                sigma: 2.0e-2,
                h_vap: 5.48e5,
            },
            Species::Water => SpeciesConstants {
                molar_mass: 18.015,
                t_crit: 647.10,
                p_crit: 22.064e6,
                acentric: 0.345,
                cp_gas: 1900.0,
                rho_liquid: 997.0,
                cp_liquid: 4186.0,
                mu_liquid: 8.9e-4,
                mu_gas: 9.8e-6,
                k_gas: 0.0196,
                k_liquid: 0.60,
                mu_jt: -3.0e-8,
                sigma: 7.2e-2,
                h_vap: 2.257e6,
            },
        }
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', '_'], "").as_str() {
            "CH4" | "METHANE" => Ok(Species::Methane),
            "C2H6" | "ETHANE" => Ok(Species::Ethane),
            "C3H8" | "PROPANE" => Ok(Species::Propane),
            "NC4H10" | "NBUTANE" | "BUTANE" => Ok(Species::NButane),
            "IC4H10" | "ISOBUTANE" => Ok(Species::Isobutane),
            "NC5H12" | "NPENTANE" | "PENTANE" => Ok(Species::NPentane),
            "IC5H12" | "ISOPENTANE" => Ok(Species::Isopentane),
            "NC6H14" | "NHEXANE" | "HEXANE" => Ok(Species::NHexane),
            "N2" | "NITROGEN" => Ok(Species::Nitrogen),
            "CO2" | "CARBONDIOXIDE" => Ok(Species::CarbonDioxide),
            "H2S" | "HYDROGENSULFIDE" => Ok(Species::HydrogenSulfide),
            "H2O" | "WATER" => Ok(Species::Water),
            _ => Err("unknown species"),
        }
    }
}
