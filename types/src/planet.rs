use derive_more::Display;

/// Bodies of the nominal solar system
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum Planet {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Sun,
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Moon,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
    ];

    /// Gravitational constant [m³·kg⁻¹·s⁻²]
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.6740831E-11;

    pub const EARTH_RADIUS_MAJOR: f64 = 6378137.0;
    pub const EARTH_RADIUS_MINOR: f64 = 6356752.0;
    pub const EARTH_AXIAL_TILT_DEGREES: f64 = -23.439;

    /// Mass [kg]
    pub const fn mass(self) -> f64 {
        use Planet::*;
        match self {
            Sun => 1.98855E30,
            Mercury => 3.3011E23,
            Venus => 4.8675E24,
            Earth => 5.97237E24,
            Moon => 7.342E22,
            Mars => 6.4171E23,
            Jupiter => 1.8982E27,
            Saturn => 5.6834E26,
        }
    }

    /// Equatorial radius [m]
    pub const fn radius(self) -> f64 {
        use Planet::*;
        match self {
            Sun => 695700E3,
            Mercury => 2440E3,
            Venus => 6051E3,
            Earth => Self::EARTH_RADIUS_MAJOR,
            Moon => 1737100.0,
            Mars => 3396E3,
            Jupiter => 69911E3,
            Saturn => 58232E3,
        }
    }

    /// Polar radius [m], only the Earth is modeled as oblate
    pub const fn polar_radius(self) -> Option<f64> {
        match self {
            Planet::Earth => Some(Self::EARTH_RADIUS_MINOR),
            _ => None,
        }
    }

    /// Axial tilt about the X axis of the reference frame [deg]
    pub const fn axial_tilt(self) -> f64 {
        match self {
            Planet::Earth => Self::EARTH_AXIAL_TILT_DEGREES,
            _ => 0.0,
        }
    }

    /// Rotation rate [rad/s]
    pub fn rotation_rate(self) -> Option<f64> {
        match self {
            Planet::Earth => Some(std::f64::consts::TAU / 86400.0),
            _ => None,
        }
    }

    /// The planets are drawn larger than life so they are visible at solar system scale
    pub const fn display_radius_scale(self) -> f64 {
        use Planet::*;
        match self {
            Mercury | Venus | Mars | Jupiter | Saturn => 300.0,
            Sun | Earth | Moon => 1.0,
        }
    }

    /// The Sun is lit from within
    pub const fn is_emissive(self) -> bool {
        matches!(self, Planet::Sun)
    }

    pub const fn ephemeris_file_name(self) -> &'static str {
        use Planet::*;
        match self {
            Sun => "JPLSun.txt",
            Mercury => "JPLMercury.txt",
            Venus => "JPLVenus.txt",
            Earth => "JPLEarth.txt",
            Moon => "JPLMoon.txt",
            Mars => "JPLMars.txt",
            Jupiter => "JPLJupiter.txt",
            Saturn => "JPLSaturn.txt",
        }
    }

    pub const fn texture_file_name(self) -> &'static str {
        use Planet::*;
        match self {
            Sun => "sun.jpg",
            Mercury => "mercury.jpg",
            Venus => "venus.jpg",
            Earth => "earth.jpg",
            Moon => "moon.jpg",
            Mars => "mars.jpg",
            Jupiter => "jupiter.jpg",
            Saturn => "saturn.jpg",
        }
    }

    pub fn from_name(name: &str) -> Option<Planet> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.to_string().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Planet::from_name("earth"), Some(Planet::Earth));
        assert_eq!(Planet::from_name(" Saturn "), Some(Planet::Saturn));
        assert_eq!(Planet::from_name("Pluto"), None);
    }

    #[test]
    fn every_planet_is_a_gravitational_source() {
        for p in Planet::ALL {
            assert!(p.mass() > 1.0, "{p}");
            assert!(p.radius() > 0.0, "{p}");
        }
        assert!(Planet::Earth.polar_radius().unwrap() < Planet::Earth.radius());
    }
}
