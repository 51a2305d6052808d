//! Generic RK4 time integrator. The state type is abstract behind
//! `add`/`scale` so the same stepping kernel serves any conservative system;
//! the two-fluid solver instantiates it over a per-cell conservative-vector
//! state.

pub trait TransientModel {
    type State: Clone;

    fn rhs(&self, state: &Self::State) -> Self::State;
    fn add(a: &Self::State, b: &Self::State) -> Self::State;
    fn scale(a: &Self::State, factor: f64) -> Self::State;
}

/// Classical 4th-order Runge-Kutta step, autonomous in time (the RHS here
/// never depends explicitly on `t`, only on state).
pub fn rk4_step<M: TransientModel>(model: &M, state: &M::State, dt: f64) -> M::State {
    let k1 = model.rhs(state);

    let s2 = M::add(state, &M::scale(&k1, dt / 2.0));
    let k2 = model.rhs(&s2);

    let s3 = M::add(state, &M::scale(&k2, dt / 2.0));
    let k3 = model.rhs(&s3);

    let s4 = M::add(state, &M::scale(&k3, dt));
    let k4 = model.rhs(&s4);

    let weighted = M::add(&M::add(&k1, &M::scale(&k2, 2.0)), &M::add(&M::scale(&k3, 2.0), &k4));
    M::add(state, &M::scale(&weighted, dt / 6.0))
}

/// Conservative state vector: one `[α_gρ_g, α_Lρ_L, α_gρ_gv_g, α_Lρ_Lv_L]·A`
/// tuple per cell, matching `TwoFluidCell`'s conservative fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservativeState(pub Vec<[f64; 4]>);

impl ConservativeState {
    pub fn zeros(n: usize) -> Self {
        Self(vec![[0.0; 4]; n])
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
                .collect(),
        )
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|u| u.map(|v| v * factor)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay {
        rate: f64,
    }

    impl TransientModel for Decay {
        type State = ConservativeState;

        fn rhs(&self, state: &Self::State) -> Self::State {
            state.scale(-self.rate)
        }

        fn add(a: &Self::State, b: &Self::State) -> Self::State {
            a.add(b)
        }

        fn scale(a: &Self::State, factor: f64) -> Self::State {
            a.scale(factor)
        }
    }

    #[test]
    fn rk4_matches_exponential_decay_closely() {
        let model = Decay { rate: 1.0 };
        let mut state = ConservativeState(vec![[1.0, 0.0, 0.0, 0.0]]);
        let dt = 0.01;
        for _ in 0..100 {
            state = rk4_step(&model, &state, dt);
        }
        let expected = (-1.0_f64).exp();
        assert!((state.0[0][0] - expected).abs() < 1e-6);
    }
}
