//! Slug/accumulation-zone tracking: identifies valley zones from the
//! elevation profile and integrates liquid inventory trapped there over
//! time, for the optional slug-tracking output.

use crate::cell::TwoFluidCell;

#[derive(Debug, Clone, Copy)]
pub struct AccumulationZone {
    pub start_index: usize,
    pub end_index: usize,
    /// Liquid volume currently held in the zone beyond its baseline [m^3].
    pub accumulated_volume_m3: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AccumulationTracker {
    zones: Vec<AccumulationZone>,
    baseline_volume: Vec<f64>,
}

impl AccumulationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zones(&self) -> &[AccumulationZone] {
        &self.zones
    }

    /// Identify valley zones (a local elevation minimum bracketed by
    /// downhill-then-uphill inclination) from the current cell set.
    fn identify_valleys(cells: &[TwoFluidCell]) -> Vec<(usize, usize)> {
        let mut zones = Vec::new();
        let mut i = 1;
        while i + 1 < cells.len() {
            if cells[i - 1].theta < -0.01 && cells[i].theta > 0.01 {
                let start = i.saturating_sub(2);
                let end = (i + 2).min(cells.len() - 1);
                zones.push((start, end));
                i += 2;
            } else {
                i += 1;
            }
        }
        zones
    }

    fn zone_liquid_volume(cells: &[TwoFluidCell], area: f64, start: usize, end: usize) -> f64 {
        cells[start..=end].iter().map(|c| c.alpha_l * area * c.dx).sum()
    }

    /// Recompute zones from the current terrain and integrate `dt` worth of
    /// liquid-inventory change (current volume minus the zone's first-seen
    /// baseline) into each zone's running accumulation.
    pub fn update(&mut self, cells: &[TwoFluidCell], area: f64, dt: f64) {
        let valleys = Self::identify_valleys(cells);

        if self.baseline_volume.len() != valleys.len() {
            self.baseline_volume = valleys
                .iter()
                .map(|&(s, e)| Self::zone_liquid_volume(cells, area, s, e))
                .collect();
        }

        self.zones = valleys
            .iter()
            .enumerate()
            .map(|(idx, &(start, end))| {
                let volume = Self::zone_liquid_volume(cells, area, start, end);
                let excess = (volume - self.baseline_volume[idx]).max(0.0);
                AccumulationZone {
                    start_index: start,
                    end_index: end,
                    accumulated_volume_m3: excess * dt.max(0.0),
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlowRegime;

    fn cell(theta: f64, alpha_l: f64) -> TwoFluidCell {
        TwoFluidCell {
            x: 0.0,
            dx: 100.0,
            theta,
            elevation: 0.0,
            roughness: 4.6e-5,
            pressure_pa: 50.0e5,
            temperature_k: 300.0,
            alpha_g: 1.0 - alpha_l,
            alpha_l,
            v_g: 5.0,
            v_l: 1.0,
            alpha_w: None,
            v_w: None,
            water_cut: 0.0,
            rho_g: 50.0,
            rho_l: 700.0,
            mu_g: 1.2e-5,
            mu_l: 5.0e-4,
            c_g: 380.0,
            c_l: 1200.0,
            h_g: 7.0e5,
            h_l: 3.0e5,
            sigma: 0.02,
            regime: FlowRegime::StratifiedSmooth,
        }
    }

    #[test]
    fn a_valley_profile_is_identified_as_a_zone() {
        let cells = vec![cell(0.1, 0.2), cell(-0.1, 0.2), cell(-0.2, 0.3), cell(0.1, 0.3), cell(0.2, 0.2)];
        let mut tracker = AccumulationTracker::new();
        tracker.update(&cells, 0.03, 1.0);
        assert!(!tracker.zones().is_empty());
    }

    #[test]
    fn a_flat_horizontal_profile_has_no_zones() {
        let cells = vec![cell(0.0, 0.2); 5];
        let mut tracker = AccumulationTracker::new();
        tracker.update(&cells, 0.03, 1.0);
        assert!(tracker.zones().is_empty());
    }
}
