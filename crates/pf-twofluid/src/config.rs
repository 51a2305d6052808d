//! Two-fluid solver configuration: interfacial drag closure, boundary
//! conditions and the optional slug/mass-transfer toggles.

/// Interfacial drag / drift-flux closure. The default is the Bendiksen-style
/// form with `c0 = 1.2`; callers needing a different slip law can override
/// the distribution coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriftClosure {
    Bendiksen { c0: f64 },
}

impl Default for DriftClosure {
    fn default() -> Self {
        DriftClosure::Bendiksen { c0: 1.2 }
    }
}

impl DriftClosure {
    pub fn c0(&self) -> f64 {
        match self {
            DriftClosure::Bendiksen { c0 } => *c0,
        }
    }
}

/// Inlet boundary condition for `run_transient`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InletBoundary {
    /// Copy P, T from the inlet fluid stream every sub-step.
    StreamConnected,
    FixedPressure(f64),
    FixedFlow(f64),
}

/// Outlet boundary condition for `run_transient`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutletBoundary {
    ConstantPressure(f64),
    /// One-sided extrapolation from the last two interior cells.
    Absorbing,
}

#[derive(Debug, Clone, Copy)]
pub struct TwoFluidConfig {
    pub drift_closure: DriftClosure,
    pub slug_tracking_enabled: bool,
    pub mass_transfer_enabled: bool,
    pub inlet_boundary: InletBoundary,
    pub outlet_boundary: OutletBoundary,
}

impl Default for TwoFluidConfig {
    fn default() -> Self {
        Self {
            drift_closure: DriftClosure::default(),
            slug_tracking_enabled: false,
            mass_transfer_enabled: false,
            inlet_boundary: InletBoundary::StreamConnected,
            outlet_boundary: OutletBoundary::Absorbing,
        }
    }
}

/// Two-fluid flow regime tags, distinct from the Beggs-Brill regime set
/// since the closure (Taitel-Dukler-style) differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRegime {
    StratifiedSmooth,
    StratifiedWavy,
    Slug,
    Bubble,
    AnnularMist,
    SinglePhase,
}
