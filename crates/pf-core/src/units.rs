//! Canonical SI unit aliases (built on `uom`) plus the imperial constants
//! the Beggs-Brill stepper needs at its segment boundaries.

use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea, DynamicViscosity as UomDynamicViscosity,
    Energy as UomEnergy, Length as UomLength, Mass as UomMass, MassDensity as UomMassDensity,
    MassRate as UomMassRate, Power as UomPower, Pressure as UomPressure, Ratio as UomRatio,
    ThermalConductivity as UomThermalConductivity, ThermodynamicTemperature as UomTemperature,
    Time as UomTime, Velocity as UomVelocity, Volume as UomVolume,
    VolumeRate as UomVolumeRate,
};

pub type Accel = UomAcceleration;
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type ThermalConductivity = UomThermalConductivity;
pub type Temperature = UomTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bara(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn kgph(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_hour;
    MassRate::new::<kilogram_per_hour>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Recognised pressure unit strings for the thermo-client and facade contracts.
///
/// Unrecognised strings are a programmer error (`UnknownUnit`), never silently defaulted.
pub fn pressure_from_unit(value: f64, unit: &str) -> Result<Pressure, crate::error::PfError> {
    use uom::si::pressure::{bar, pascal, psi};
    Ok(match unit {
        "Pa" => Pressure::new::<pascal>(value),
        "bara" => Pressure::new::<bar>(value),
        "barg" => Pressure::new::<bar>(value) + pa(101_325.0),
        "MPa" => Pressure::new::<pascal>(value * 1.0e6),
        "psi" => Pressure::new::<psi>(value),
        other => {
            return Err(crate::error::PfError::UnknownUnit {
                unit: other.to_string(),
            });
        }
    })
}

pub fn temperature_from_unit(value: f64, unit: &str) -> Result<Temperature, crate::error::PfError> {
    Ok(match unit {
        "K" => k(value),
        "C" => celsius(value),
        other => {
            return Err(crate::error::PfError::UnknownUnit {
                unit: other.to_string(),
            });
        }
    })
}

/// Imperial unit-system constants used by the Beggs-Brill stepper's scoped
/// `ImperialView` conversions, kept local so no global mutable unit state leaks
/// between solver runs.
pub mod imperial {
    /// Meters per foot.
    pub const M_PER_FT: f64 = 0.3048;
    /// Kilograms per pound-mass.
    pub const KG_PER_LBM: f64 = 0.453_592_37;
    /// Pascal per psi.
    pub const PA_PER_PSI: f64 = 6894.757_293_168;
    /// Seconds per hour.
    pub const S_PER_HR: f64 = 3600.0;

    /// Convert a length in meters to feet.
    #[inline]
    pub fn m_to_ft(v: f64) -> f64 {
        v / M_PER_FT
    }

    /// Convert a length in feet to meters.
    #[inline]
    pub fn ft_to_m(v: f64) -> f64 {
        v * M_PER_FT
    }

    /// Convert density kg/m^3 to lbm/ft^3.
    #[inline]
    pub fn density_si_to_imperial(rho: f64) -> f64 {
        rho * M_PER_FT.powi(3) / KG_PER_LBM
    }

    /// Convert density lbm/ft^3 to kg/m^3.
    #[inline]
    pub fn density_imperial_to_si(rho: f64) -> f64 {
        rho * KG_PER_LBM / M_PER_FT.powi(3)
    }

    /// Convert pressure Pa to psi.
    #[inline]
    pub fn pressure_si_to_imperial(p: f64) -> f64 {
        p / PA_PER_PSI
    }

    /// Convert pressure psi to Pa.
    #[inline]
    pub fn pressure_imperial_to_si(p: f64) -> f64 {
        p * PA_PER_PSI
    }
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}
