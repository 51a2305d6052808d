//! Water-hammer boundary conditions, valve closure schedule and the pipe
//! elasticity input the Korteweg wave speed needs.

/// Upstream/downstream boundary condition. `Valve` is only meaningful at
/// the downstream end; `run` rejects it upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryType {
    Reservoir { head_m: f64 },
    ClosedEnd,
    ConstantFlow { q_m3s: f64 },
    Valve,
}

/// Piecewise-linear valve closure fraction τ(t) ∈ [0, 1]. Constant τ=1 if
/// no schedule has been set (valve fully open, never closes).
#[derive(Debug, Clone, Default)]
pub struct ValveSchedule {
    points: Vec<(f64, f64)>,
}

impl ValveSchedule {
    pub fn new(mut points: Vec<(f64, f64)>) -> Self {
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        Self { points }
    }

    pub fn tau_at(&self, t: f64) -> f64 {
        if self.points.is_empty() {
            return 1.0;
        }
        if t <= self.points[0].0 {
            return self.points[0].1;
        }
        if t >= self.points[self.points.len() - 1].0 {
            return self.points[self.points.len() - 1].1;
        }
        for pair in self.points.windows(2) {
            let (t0, tau0) = pair[0];
            let (t1, tau1) = pair[1];
            if t >= t0 && t <= t1 {
                let frac = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return tau0 + frac * (tau1 - tau0);
            }
        }
        1.0
    }
}

/// Water-hammer solver configuration.
#[derive(Debug, Clone)]
pub struct WaterHammerConfig {
    /// Pipe material elastic modulus [Pa], used by the Korteweg wave-speed
    /// reduction.
    pub pipe_modulus_pa: f64,
    pub upstream: BoundaryType,
    pub downstream: BoundaryType,
    /// Reference head the valve discharges against [m] (`H_d` in the
    /// valve boundary equation).
    pub downstream_reference_head_m: f64,
    pub valve_schedule: ValveSchedule,
}

impl Default for WaterHammerConfig {
    fn default() -> Self {
        Self {
            pipe_modulus_pa: 200.0e9,
            upstream: BoundaryType::Reservoir { head_m: 100.0 },
            downstream: BoundaryType::Valve,
            downstream_reference_head_m: 0.0,
            valve_schedule: ValveSchedule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_holds_before_first_and_after_last_point() {
        let sched = ValveSchedule::new(vec![(1.0, 1.0), (1.1, 0.0)]);
        assert_eq!(sched.tau_at(0.0), 1.0);
        assert_eq!(sched.tau_at(2.0), 0.0);
    }

    #[test]
    fn schedule_interpolates_linearly_between_points() {
        let sched = ValveSchedule::new(vec![(0.0, 1.0), (1.0, 0.0)]);
        assert!((sched.tau_at(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_schedule_is_always_fully_open() {
        let sched = ValveSchedule::default();
        assert_eq!(sched.tau_at(42.0), 1.0);
    }
}
