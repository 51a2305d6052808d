//! Pipe geometry: length, diameter, roughness, elevation profile and the
//! insulation/coating stack `ThermalBuildup` reads from.

use pf_core::units::{Area, Length, Temperature};

use crate::error::{GeomError, GeomResult};

/// A single layer of the wall/coating/insulation stack.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    pub thickness: Length,
    pub conductivity: pf_core::units::ThermalConductivity,
}

/// Static pipe geometry, immutable for the lifetime of a solve.
#[derive(Debug, Clone)]
pub struct PipeGeometry {
    length: Length,
    diameter: Length,
    wall_thickness: Length,
    roughness: Length,
    /// Net elevation change inlet→outlet [m], signed.
    elevation_change: Length,
    /// Inclination implied by `elevation_change` over `length` [rad].
    inclination: f64,
    /// Optional explicit per-node elevation profile (overrides linear
    /// interpolation between 0 and `elevation_change` when present).
    elevation_profile: Option<Vec<f64>>,
    /// Fittings equivalent length, added to `length` for friction purposes.
    fittings_equivalent_length: Length,
    wall_conductivity: pf_core::units::ThermalConductivity,
    coating: Option<Layer>,
    insulation: Option<Layer>,
    ambient_temperature: Temperature,
    burial_depth: Option<Length>,
    soil_conductivity: Option<pf_core::units::ThermalConductivity>,
}

impl PipeGeometry {
    /// Build from length, diameter and an explicit inclination angle [rad].
    /// Elevation change is derived as `length * sin(inclination)`.
    pub fn from_length_and_angle(
        length: Length,
        diameter: Length,
        wall_thickness: Length,
        roughness: Length,
        inclination_rad: f64,
        wall_conductivity: pf_core::units::ThermalConductivity,
        ambient_temperature: Temperature,
    ) -> GeomResult<Self> {
        Self::validate_core(length, diameter, roughness)?;
        let elevation_change = pf_core::units::m(length.value * inclination_rad.sin());
        Ok(Self {
            length,
            diameter,
            wall_thickness,
            roughness,
            elevation_change,
            inclination: inclination_rad,
            elevation_profile: None,
            fittings_equivalent_length: pf_core::units::m(0.0),
            wall_conductivity,
            coating: None,
            insulation: None,
            ambient_temperature,
            burial_depth: None,
            soil_conductivity: None,
        })
    }

    /// Build from length, diameter and a net elevation change [m]. Requires
    /// `|Δz| <= L`; inclination is derived as `asin(Δz/L)`.
    pub fn from_length_and_elevation(
        length: Length,
        diameter: Length,
        wall_thickness: Length,
        roughness: Length,
        elevation_change: Length,
        wall_conductivity: pf_core::units::ThermalConductivity,
        ambient_temperature: Temperature,
    ) -> GeomResult<Self> {
        Self::validate_core(length, diameter, roughness)?;
        if elevation_change.value.abs() > length.value {
            return Err(GeomError::InconsistentElevation {
                what: "|elevation change| exceeds pipe length",
            });
        }
        let inclination = (elevation_change.value / length.value).asin();
        Ok(Self {
            length,
            diameter,
            wall_thickness,
            roughness,
            elevation_change,
            inclination,
            elevation_profile: None,
            fittings_equivalent_length: pf_core::units::m(0.0),
            wall_conductivity,
            coating: None,
            insulation: None,
            ambient_temperature,
            burial_depth: None,
            soil_conductivity: None,
        })
    }

    fn validate_core(length: Length, diameter: Length, roughness: Length) -> GeomResult<()> {
        if !(length.value.is_finite() && length.value > 0.0) {
            return Err(GeomError::InvalidGeometry { what: "length" });
        }
        if !(diameter.value.is_finite() && diameter.value > 0.0) {
            return Err(GeomError::InvalidGeometry { what: "diameter" });
        }
        if !(roughness.value.is_finite() && roughness.value >= 0.0) {
            return Err(GeomError::InvalidGeometry { what: "roughness" });
        }
        Ok(())
    }

    /// Attach an explicit per-node elevation profile (length N_inc+1, meters
    /// from the inlet reference). Must start at 0 and end within `length`'s
    /// implied elevation change tolerance; callers are responsible for
    /// providing a profile consistent with `elevation_change`.
    pub fn with_elevation_profile(mut self, profile: Vec<f64>) -> GeomResult<Self> {
        if profile.len() < 2 {
            return Err(GeomError::InvalidGeometry {
                what: "elevation profile needs at least two nodes",
            });
        }
        if profile[0].abs() > 1e-9 {
            return Err(GeomError::InconsistentElevation {
                what: "elevation profile must start at zero",
            });
        }
        self.elevation_profile = Some(profile);
        Ok(self)
    }

    pub fn with_fittings_equivalent_length(mut self, value: Length) -> Self {
        self.fittings_equivalent_length = value;
        self
    }

    pub fn with_coating(mut self, layer: Layer) -> Self {
        self.coating = Some(layer);
        self
    }

    pub fn with_insulation(mut self, layer: Layer) -> Self {
        self.insulation = Some(layer);
        self
    }

    pub fn with_burial(mut self, depth: Length, soil_k: pf_core::units::ThermalConductivity) -> Self {
        self.burial_depth = Some(depth);
        self.soil_conductivity = Some(soil_k);
        self
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn diameter(&self) -> Length {
        self.diameter
    }

    pub fn wall_thickness(&self) -> Length {
        self.wall_thickness
    }

    pub fn roughness(&self) -> Length {
        self.roughness
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn elevation_change(&self) -> Length {
        self.elevation_change
    }

    pub fn fittings_equivalent_length(&self) -> Length {
        self.fittings_equivalent_length
    }

    pub fn wall_conductivity(&self) -> pf_core::units::ThermalConductivity {
        self.wall_conductivity
    }

    pub fn coating(&self) -> Option<Layer> {
        self.coating
    }

    pub fn insulation(&self) -> Option<Layer> {
        self.insulation
    }

    pub fn ambient_temperature(&self) -> Temperature {
        self.ambient_temperature
    }

    pub fn is_buried(&self) -> bool {
        self.burial_depth.is_some()
    }

    pub fn burial_depth(&self) -> Option<Length> {
        self.burial_depth
    }

    pub fn soil_conductivity(&self) -> Option<pf_core::units::ThermalConductivity> {
        self.soil_conductivity
    }

    /// Inner cross-section area, πD²/4.
    pub fn cross_section_area(&self) -> Area {
        use uom::si::area::square_meter;
        Area::new::<square_meter>(std::f64::consts::PI * self.diameter.value.powi(2) / 4.0)
    }

    /// Per-node elevation [m] at `n_inc + 1` equally spaced nodes. Uses the
    /// explicit profile if one was supplied (resampled by linear
    /// interpolation onto the requested node count), otherwise linear
    /// interpolation between 0 and `elevation_change`.
    pub fn node_elevations(&self, n_inc: usize) -> Vec<f64> {
        let n_nodes = n_inc + 1;
        match &self.elevation_profile {
            Some(profile) => resample_linear(profile, n_nodes),
            None => {
                let dz = self.elevation_change.value;
                (0..n_nodes)
                    .map(|i| dz * (i as f64) / (n_inc.max(1) as f64))
                    .collect()
            }
        }
    }

    /// Segment inclination [rad] between node `i` and `i+1` out of `n_inc`
    /// segments, derived from the elevation profile and segment length.
    pub fn segment_inclination(&self, n_inc: usize, segment_index: usize) -> f64 {
        let elevations = self.node_elevations(n_inc);
        let seg_len = self.length.value / (n_inc.max(1) as f64);
        let dz = elevations[segment_index + 1] - elevations[segment_index];
        (dz / seg_len).clamp(-1.0, 1.0).asin()
    }
}

fn resample_linear(profile: &[f64], n_nodes: usize) -> Vec<f64> {
    if profile.len() == n_nodes {
        return profile.to_vec();
    }
    let last = profile.len() - 1;
    (0..n_nodes)
        .map(|i| {
            let t = i as f64 / (n_nodes - 1).max(1) as f64 * last as f64;
            let lo = t.floor() as usize;
            let hi = (lo + 1).min(last);
            let frac = t - lo as f64;
            profile[lo] * (1.0 - frac) + profile[hi] * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{k, m};
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    fn steel_k() -> pf_core::units::ThermalConductivity {
        pf_core::units::ThermalConductivity::new::<watt_per_meter_kelvin>(45.0)
    }

    #[test]
    fn horizontal_pipe_has_zero_inclination() {
        let geom = PipeGeometry::from_length_and_angle(
            m(1000.0),
            m(0.2),
            m(0.01),
            m(1e-5),
            0.0,
            steel_k(),
            k(288.15),
        )
        .unwrap();
        assert!(geom.inclination().abs() < 1e-12);
        assert!(geom.elevation_change().value.abs() < 1e-9);
    }

    #[test]
    fn elevation_exceeding_length_is_rejected() {
        let result = PipeGeometry::from_length_and_elevation(
            m(100.0),
            m(0.2),
            m(0.01),
            m(1e-5),
            m(200.0),
            steel_k(),
            k(288.15),
        );
        assert!(result.is_err());
    }

    #[test]
    fn cross_section_area_matches_formula() {
        let geom = PipeGeometry::from_length_and_angle(
            m(100.0),
            m(0.2),
            m(0.01),
            m(1e-5),
            0.0,
            steel_k(),
            k(288.15),
        )
        .unwrap();
        let expected = std::f64::consts::PI * 0.2_f64.powi(2) / 4.0;
        assert!((geom.cross_section_area().value - expected).abs() < 1e-12);
    }

    #[test]
    fn node_elevations_linear_by_default() {
        let geom = PipeGeometry::from_length_and_elevation(
            m(1000.0),
            m(0.2),
            m(0.01),
            m(1e-5),
            m(100.0),
            steel_k(),
            k(288.15),
        )
        .unwrap();
        let elevations = geom.node_elevations(10);
        assert_eq!(elevations.len(), 11);
        assert!((elevations[0]).abs() < 1e-9);
        assert!((elevations[10] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_profile_overrides_linear() {
        let geom = PipeGeometry::from_length_and_angle(
            m(1000.0),
            m(0.2),
            m(0.01),
            m(1e-5),
            0.0,
            steel_k(),
            k(288.15),
        )
        .unwrap()
        .with_elevation_profile(vec![0.0, 50.0, 0.0, -50.0, 0.0])
        .unwrap();
        let elevations = geom.node_elevations(4);
        assert_eq!(elevations, vec![0.0, 50.0, 0.0, -50.0, 0.0]);
    }
}
