//! `ThermalBuildup`: composes a [`PipeGeometry`]'s wall/coating/insulation
//! stack with inner/outer film coefficients into an overall U.

use pf_correlations::overall_u;

use crate::pipe_geometry::PipeGeometry;

/// Resolves a pipe's layered thermal resistance into an overall
/// heat-transfer coefficient referenced to the inner area.
#[derive(Debug, Clone, Copy)]
pub struct ThermalBuildup<'a> {
    geometry: &'a PipeGeometry,
}

impl<'a> ThermalBuildup<'a> {
    pub fn new(geometry: &'a PipeGeometry) -> Self {
        Self { geometry }
    }

    /// Overall U [W/(m^2*K)] given inner and outer film coefficients.
    pub fn overall_u(&self, h_in: f64, h_out: f64) -> f64 {
        let g = self.geometry;
        let (t_coat, k_coat) = g.coating().map(|l| (l.thickness.value, l.conductivity.value)).unwrap_or((0.0, 1.0));
        let (t_ins, k_ins) = g.insulation().map(|l| (l.thickness.value, l.conductivity.value)).unwrap_or((0.0, 1.0));
        let buried = g.is_buried();
        let h_bury = g.burial_depth().map(|d| d.value).unwrap_or(0.0);
        let k_soil = g.soil_conductivity().map(|k| k.value).unwrap_or(1.0);

        overall_u(
            g.diameter().value,
            g.wall_thickness().value,
            g.wall_conductivity().value,
            t_coat,
            k_coat,
            t_ins,
            k_ins,
            h_in,
            h_out,
            buried,
            h_bury,
            k_soil,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe_geometry::Layer;
    use pf_core::units::{k, m};
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    fn steel_k() -> pf_core::units::ThermalConductivity {
        pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(45.0)
    }

    #[test]
    fn insulated_pipe_has_lower_u_than_bare() {
        let bare = PipeGeometry::from_length_and_angle(m(1000.0), m(0.2), m(0.01), m(1e-5), 0.0, steel_k(), k(288.15)).unwrap();
        let insulated = bare.clone().with_insulation(Layer {
            thickness: m(0.05),
            conductivity: pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(0.03),
        });

        let u_bare = ThermalBuildup::new(&bare).overall_u(500.0, 20.0);
        let u_insulated = ThermalBuildup::new(&insulated).overall_u(500.0, 20.0);
        assert!(u_insulated < u_bare);
    }
}
