//! Numeric tolerances shared by every solver's bisection/sub-stepping loops.
//! Lives in `pf-core` (rather than the facade) since the Beggs-Brill inverter
//! and the two-fluid integrator both need it without depending on each other.

/// CFL, refresh cadence and bisection tolerances shared by the Beggs-Brill
/// inverter and the two-fluid integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericConfig {
    /// CFL number bounding the two-fluid sub-step (default 0.5).
    pub cfl: f64,
    /// Sub-steps between periodic thermodynamic refreshes (default 10).
    pub thermodynamic_update_interval: usize,
    /// Relative tolerance for bisection-based solves (default 1e-4).
    pub bisection_tol: f64,
    /// Maximum bisection iterations (default 50).
    pub bisection_max_iter: usize,
    /// Soft cap on sub-steps per `run_transient` call; exceeding it is a
    /// warning, never an error.
    pub max_sub_steps: usize,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            cfl: 0.5,
            thermodynamic_update_interval: 10,
            bisection_tol: 1e-4,
            bisection_max_iter: 50,
            max_sub_steps: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = NumericConfig::default();
        assert_eq!(cfg.cfl, 0.5);
        assert_eq!(cfg.thermodynamic_update_interval, 10);
        assert_eq!(cfg.bisection_max_iter, 50);
    }
}
