// pf-core/src/units.rs

use crate::PfError;
use crate::numeric::ensure_positive;
use uom::si::f64::{
    Length as UomLength, Mass as UomMass, MassDensity as UomMassDensity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn au(v: f64) -> Length {
    m(v * constants::AU_M)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn msol(v: f64) -> Mass {
    kg(v * constants::MSOL_KG)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kelvin(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

pub mod constants {
    /// Newton's gravitational constant (m^3 kg^-1 s^-2).
    pub const G_SI: f64 = 6.674_08e-11;
    /// Boltzmann constant (J K^-1).
    pub const BOLTZMANN_K_SI: f64 = 1.380_648_52e-23;
    /// Hydrogen atom mass (kg).
    pub const HYDROGEN_MASS_SI: f64 = 1.673_723_6e-27;
    /// Speed of light in vacuum (m s^-1).
    pub const SPEED_OF_LIGHT_SI: f64 = 299_792_458.0;
    /// Astronomical unit (m).
    pub const AU_M: f64 = 1.496e11;
    /// Solar mass (kg).
    pub const MSOL_KG: f64 = 1.9891e30;
    /// Julian year (s).
    pub const YEAR_S: f64 = 365.25 * 24.0 * 3600.0;
}

/// Conversion factors between the hydro solver's internal units and SI.
///
/// The hydro state (radii, densities, velocities, pressures, time) lives in
/// internal units; the photon transport works in SI. All factors are
/// "one internal unit expressed in SI".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSystem {
    pub length_in_si: f64,
    pub mass_in_si: f64,
    pub time_in_si: f64,
}

impl UnitSystem {
    /// Create a unit system from explicit length, mass and time units.
    pub fn new(length: Length, mass: Mass, time: Time) -> Result<Self, PfError> {
        Ok(Self {
            length_in_si: ensure_positive(length.value, "unit length")?,
            mass_in_si: ensure_positive(mass.value, "unit mass")?,
            time_in_si: ensure_positive(time.value, "unit time")?,
        })
    }

    /// Create a unit system in which the gravitational constant equals 1.
    ///
    /// The time unit follows from `G M T^2 / L^3 = 1`.
    pub fn gravitational(length: Length, mass: Mass) -> Result<Self, PfError> {
        let l = ensure_positive(length.value, "unit length")?;
        let mm = ensure_positive(mass.value, "unit mass")?;
        let t = (l * l * l / (constants::G_SI * mm)).sqrt();
        Self::new(length, mass, s(t))
    }

    #[inline]
    pub fn density_in_si(&self) -> f64 {
        self.mass_in_si / (self.length_in_si * self.length_in_si * self.length_in_si)
    }

    #[inline]
    pub fn velocity_in_si(&self) -> f64 {
        self.length_in_si / self.time_in_si
    }

    #[inline]
    pub fn pressure_in_si(&self) -> f64 {
        let v = self.velocity_in_si();
        self.density_in_si() * v * v
    }

    /// Gravitational constant in internal units.
    #[inline]
    pub fn g_internal(&self) -> f64 {
        constants::G_SI * self.mass_in_si * self.time_in_si * self.time_in_si
            / (self.length_in_si * self.length_in_si * self.length_in_si)
    }

    #[inline]
    pub fn length_to_internal(&self, length: Length) -> f64 {
        length.value / self.length_in_si
    }

    #[inline]
    pub fn mass_to_internal(&self, mass: Mass) -> f64 {
        mass.value / self.mass_in_si
    }

    #[inline]
    pub fn density_to_internal(&self, density: Density) -> f64 {
        density.value / self.density_in_si()
    }

    /// Hydrogen number density (m^-3) of gas with internal mass density `rho`.
    #[inline]
    pub fn hydrogen_number_density(&self, rho: f64) -> f64 {
        rho * self.density_in_si() / constants::HYDROGEN_MASS_SI
    }

    /// Isothermal sound speed squared, in internal velocity units squared,
    /// for pure atomic hydrogen at the given temperature.
    pub fn isothermal_sound_speed_squared(&self, temperature: Temperature) -> f64 {
        let cs2_si = constants::BOLTZMANN_K_SI * temperature.value / constants::HYDROGEN_MASS_SI;
        let v = self.velocity_in_si();
        cs2_si / (v * v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerances, nearly_equal};

    fn rel(r: f64) -> Tolerances {
        Tolerances { abs: 0.0, rel: r }
    }

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _a = au(1.0);
        let _m = msol(18.0);
        let _rho = kg_per_m3(1e-16);
        let _t = kelvin(500.0);
        let _dt = s(0.1);
    }

    #[test]
    fn gravitational_units_match_reference_setup() {
        // Reference Bondi setup: L = 1.2e13 m, M = 2.479e31 kg
        let units = UnitSystem::gravitational(m(1.2e13), kg(2.479e31)).unwrap();
        assert!(nearly_equal(units.time_in_si, 1.02197e9, rel(1e-5)));
        assert!(nearly_equal(units.density_in_si(), 1.43461e-8, rel(1e-5)));
        assert!(nearly_equal(units.velocity_in_si(), 11742.0, rel(1e-4)));
        assert!(nearly_equal(units.pressure_in_si(), 1.97797, rel(1e-4)));
        assert!(nearly_equal(units.g_internal(), 1.0, rel(1e-12)));
    }

    #[test]
    fn rejects_non_positive_units() {
        assert!(UnitSystem::new(m(0.0), kg(1.0), s(1.0)).is_err());
        assert!(UnitSystem::gravitational(m(1.0), kg(-1.0)).is_err());
    }

    #[test]
    fn number_density_of_unit_density_gas() {
        let units = UnitSystem::new(m(1.0), kg(1.0), s(1.0)).unwrap();
        let n = units.hydrogen_number_density(constants::HYDROGEN_MASS_SI);
        assert!(nearly_equal(n, 1.0, rel(1e-12)));
    }
}
