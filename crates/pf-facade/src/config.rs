//! Facade-level configuration: which solver backend a `PipeFacade` wraps,
//! and (for the Beggs-Brill backend) whether `run` computes the outlet
//! pressure or inverts for the flow rate that hits a target.

/// Only meaningful for the Beggs-Brill backend; other backends always
/// behave as `CalculateOutletPressure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationMode {
    #[default]
    CalculateOutletPressure,
    CalculateFlowRate,
}
