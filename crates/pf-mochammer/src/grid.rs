//! `MoCGrid`: fixed-size head/flow arrays, running pressure envelopes and
//! outlet (t, P) history. Arrays are pre-allocated to N+1 and overwritten,
//! never regrown.

#[derive(Debug, Clone)]
pub struct MoCGrid {
    pub h_m: Vec<f64>,
    pub q_m3s: Vec<f64>,
    pub envelope_max_pa: Vec<f64>,
    pub envelope_min_pa: Vec<f64>,
    pub outlet_history: Vec<(f64, f64)>,
}

impl MoCGrid {
    pub fn new(n_nodes: usize) -> Self {
        Self {
            h_m: vec![0.0; n_nodes],
            q_m3s: vec![0.0; n_nodes],
            envelope_max_pa: vec![f64::MIN; n_nodes],
            envelope_min_pa: vec![f64::MAX; n_nodes],
            outlet_history: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.h_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h_m.is_empty()
    }

    pub fn update_envelopes(&mut self, pressure_pa: &[f64]) {
        for (i, &p) in pressure_pa.iter().enumerate() {
            self.envelope_max_pa[i] = self.envelope_max_pa[i].max(p);
            self.envelope_min_pa[i] = self.envelope_min_pa[i].min(p);
        }
    }

    pub fn push_outlet(&mut self, t: f64, pressure_pa: f64) {
        self.outlet_history.push((t, pressure_pa));
    }

    pub fn reset_envelopes(&mut self, seed_pressure_pa: &[f64]) {
        self.envelope_max_pa = seed_pressure_pa.to_vec();
        self.envelope_min_pa = seed_pressure_pa.to_vec();
        self.outlet_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_has_requested_length() {
        let grid = MoCGrid::new(11);
        assert_eq!(grid.len(), 11);
        assert_eq!(grid.q_m3s.len(), 11);
    }

    #[test]
    fn envelopes_track_extrema_across_updates() {
        let mut grid = MoCGrid::new(2);
        grid.reset_envelopes(&[100.0, 100.0]);
        grid.update_envelopes(&[150.0, 80.0]);
        grid.update_envelopes(&[90.0, 200.0]);
        assert_eq!(grid.envelope_max_pa, vec![150.0, 200.0]);
        assert_eq!(grid.envelope_min_pa, vec![90.0, 80.0]);
    }

    #[test]
    fn outlet_history_records_in_order() {
        let mut grid = MoCGrid::new(2);
        grid.push_outlet(0.0, 5.0e6);
        grid.push_outlet(0.1, 5.2e6);
        assert_eq!(grid.outlet_history, vec![(0.0, 5.0e6), (0.1, 5.2e6)]);
    }
}
