//! Per-phase state: phases are enumerated with stable indices, 0=gas then
//! liquid phases.

/// Phase tag used for lookup by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseTag {
    Gas,
    Oil,
    Aqueous,
}

impl PhaseTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseTag::Gas => "gas",
            PhaseTag::Oil => "oil",
            PhaseTag::Aqueous => "aqueous",
        }
    }
}

/// Properties of a single phase at the fluid's current (P, T).
#[derive(Debug, Clone)]
pub struct PhaseState {
    pub tag: PhaseTag,
    /// Mass fraction of this phase in the overall mixture [-]
    pub mass_fraction: f64,
    /// Density [kg/m^3]
    pub rho: f64,
    /// Dynamic viscosity [Pa*s]
    pub mu: f64,
    /// Specific heat capacity at constant pressure [J/(kg*K)]
    pub cp: f64,
    /// Thermal conductivity [W/(m*K)]
    pub k: f64,
    /// Sound speed [m/s] (only meaningful for the gas phase in this surrogate)
    pub c: f64,
    /// Specific enthalpy [J/kg]
    pub h: f64,
    /// Joule-Thomson coefficient [K/Pa]
    pub mu_jt: f64,
    /// Molar mass of this phase's composition [kg/kmol]
    pub molar_mass: f64,
}

/// Result of a flash: the phases present, ordered gas-first.
#[derive(Debug, Clone)]
pub struct FlashResult {
    pub phases: Vec<PhaseState>,
    /// Overall mixture specific enthalpy [J/kg] (mass-weighted over phases)
    pub h_mix: f64,
}

impl FlashResult {
    pub fn phase_index(&self, tag: PhaseTag) -> Option<usize> {
        self.phases.iter().position(|p| p.tag == tag)
    }
}
