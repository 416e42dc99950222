use orrery_types::prelude::Planet;
use std::path::{Path, PathBuf};
use tracing::info;

use self::config::{Body, Config, ConfigError};
use crate::{
    body::BodyState,
    celestial::{BodyKind, CelestialBody},
    ephemeris::EphemerisStore,
    mesh::MeshLayout,
    orientation::OrientationClock,
    units::{AngularVelocity, Mass, Time, Timestamp},
};

pub mod config;
pub mod nominal;

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub start: Timestamp,
    pub time_step: Time,
    /// Meters to render units
    pub display_scale: f64,
    pub bodies: Vec<BodyConfig>,
}

/// Everything needed to put one body into the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass: Mass,
    pub kind: BodyKind,
    pub rotation_rate: AngularVelocity,
    pub ephemeris: Option<PathBuf>,
    pub texture: Option<PathBuf>,
    pub layout: MeshLayout,
    pub radius_scale: f64,
}

impl BodyConfig {
    pub fn celestial_body(&self, ephemeris: EphemerisStore) -> CelestialBody {
        let mut body = CelestialBody::new(
            BodyState::new(self.name.clone(), self.mass, ephemeris),
            self.kind,
            OrientationClock::new(self.rotation_rate),
            self.layout,
        )
        .with_radius_scale(self.radius_scale);
        body.texture = self.texture.clone();
        body
    }

    fn apply(&mut self, cfg: &Body, ephemeris_dir: &Path) -> Result<(), ConfigError> {
        if let Some(m) = cfg.mass {
            self.mass = Mass::from_kilograms(m);
        }

        let radius_major = cfg.radius_major.or(cfg.radius);
        self.kind = match self.kind {
            BodyKind::Geoid {
                radius_major: major,
                radius_minor,
                axial_tilt_degrees,
            } => BodyKind::Geoid {
                radius_major: radius_major.unwrap_or(major),
                radius_minor: cfg.radius_minor.unwrap_or(radius_minor),
                axial_tilt_degrees: cfg.axial_tilt.unwrap_or(axial_tilt_degrees),
            },
            BodyKind::Sphere { radius, emissive } => {
                let radius = radius_major.unwrap_or(radius);
                if cfg.radius_minor.is_some() || cfg.axial_tilt.is_some() {
                    BodyKind::Geoid {
                        radius_major: radius,
                        radius_minor: cfg.radius_minor.unwrap_or(radius),
                        axial_tilt_degrees: cfg.axial_tilt.unwrap_or(0.0),
                    }
                } else {
                    BodyKind::Sphere { radius, emissive }
                }
            }
        };

        if let Some(period) = cfg.rotation_period()? {
            self.rotation_rate = AngularVelocity::from_period(period);
        }
        if let Some(e) = cfg.ephemeris.as_ref() {
            self.ephemeris = Some(ephemeris_dir.join(e));
        }
        if let Some(t) = cfg.texture.as_ref() {
            self.texture = Some(t.into());
        }
        self.layout = cfg.layout(self.layout)?;
        if let Some(s) = cfg.radius_scale {
            self.radius_scale = s;
        }
        Ok(())
    }

    /// A body that only exists in the config file
    fn from_config(name: &str, cfg: &Body, ephemeris_dir: &Path) -> Result<Self, ConfigError> {
        let mass = cfg.mass.ok_or_else(|| ConfigError::MissingMass {
            name: name.to_owned(),
        })?;
        let mut body = BodyConfig {
            name: name.to_owned(),
            mass: Mass::from_kilograms(mass),
            kind: BodyKind::Sphere {
                radius: 0.0,
                emissive: false,
            },
            rotation_rate: AngularVelocity::from_radians_per_second(0.0),
            ephemeris: None,
            texture: None,
            layout: MeshLayout::SPHERE,
            radius_scale: 1.0,
        };
        body.apply(cfg, ephemeris_dir)?;
        Ok(body)
    }
}

impl Scenario {
    /// Every body of the nominal solar system, reading ephemerides from `ephemeris_dir`
    pub fn nominal<P: AsRef<Path>>(ephemeris_dir: P) -> Self {
        Scenario {
            name: "nominal".to_owned(),
            start: nominal::start(),
            time_step: nominal::time_step(),
            display_scale: nominal::DISPLAY_SCALE,
            bodies: Planet::ALL
                .iter()
                .map(|p| nominal::body_config(*p, ephemeris_dir.as_ref()))
                .collect(),
        }
    }

    pub fn load<P: AsRef<Path>, D: AsRef<Path>>(
        config: Option<P>,
        ephemeris_dir: D,
    ) -> Result<Self, ConfigError> {
        match config {
            Some(cfg_path) => {
                info!(
                    config = %cfg_path.as_ref().display(),
                    "Loading scenario from config file",
                );
                let cfg = Config::load(cfg_path)?;
                Self::from_config(&cfg, ephemeris_dir)
            }
            None => {
                info!("Loading default nominal scenario");
                Ok(Self::nominal(ephemeris_dir))
            }
        }
    }

    /// The nominal scenario with `cfg` applied
    pub fn from_config<D: AsRef<Path>>(cfg: &Config, ephemeris_dir: D) -> Result<Self, ConfigError> {
        let ephemeris_dir = ephemeris_dir.as_ref();
        let mut scenario = Self::nominal(ephemeris_dir);

        if let Some(name) = cfg.name.as_ref() {
            scenario.name = name.clone();
        }
        if let Some(start) = cfg.start()? {
            scenario.start = start;
        }
        if let Some(dt) = cfg.time_step()? {
            scenario.time_step = dt;
        }
        if let Some(scale) = cfg.display_scale {
            scenario.display_scale = scale;
        }

        // Unknown names add a body, anything else must select a nominal one
        for entry in cfg.bodies.iter() {
            if scenario.bodies.iter().any(|b| entry.matches_body(&b.name)) {
                continue;
            }
            match entry.name.as_ref() {
                Some(name) => {
                    if entry.is_enabled() {
                        let body = BodyConfig::from_config(name.trim(), entry, ephemeris_dir)?;
                        scenario.bodies.push(body);
                    }
                }
                None => {
                    return Err(ConfigError::UnmatchedBody {
                        name: entry.name.clone(),
                        matches: entry.matches.clone(),
                    })
                }
            }
        }

        let mut bodies = Vec::with_capacity(scenario.bodies.len());
        for mut body in scenario.bodies.into_iter() {
            match cfg.body(&body.name) {
                Some(entry) if !entry.is_enabled() => {
                    info!(body = %body.name, "Body disabled by config");
                }
                Some(entry) => {
                    body.apply(entry, ephemeris_dir)?;
                    bodies.push(body);
                }
                None => bodies.push(body),
            }
        }
        scenario.bodies = bodies;

        Ok(scenario)
    }

    pub fn body(&self, name: &str) -> Option<&BodyConfig> {
        self.bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indoc::indoc;

    fn load(toml: &str) -> Result<Scenario, ConfigError> {
        let cfg = Config::from_str_checked(toml)?;
        Scenario::from_config(&cfg, "ephem")
    }

    #[test]
    fn nominal_has_every_planet() {
        let s = Scenario::load(None::<&Path>, "ephem").unwrap();
        assert_eq!(s.bodies.len(), Planet::ALL.len());
        assert_relative_eq!(s.time_step.as_secs(), 600.0);
        assert_eq!(s.display_scale, 1.0E-6);
        assert_eq!(
            s.body("moon").unwrap().ephemeris,
            Some(Path::new("ephem").join("JPLMoon.txt"))
        );
    }

    #[test]
    fn overrides_apply_to_selected_bodies() {
        let s = load(indoc! {r#"
            name = 'tilted'
            time-step = '1h'

            [[body]]
            name = 'Earth'
            axial-tilt = 0.0
            ephemeris = 'earth2.txt'

            [[body]]
            matches = '^M'
            radius-scale = 1.0

            [[body]]
            name = 'Saturn'
            enabled = false

            [[body]]
            name = 'Venus'
            radius-minor = 6000e3
        "#})
        .unwrap();

        assert_eq!(s.name, "tilted");
        assert_relative_eq!(s.time_step.as_secs(), 3600.0);
        assert!(s.body("Saturn").is_none());
        assert_eq!(s.bodies.len(), Planet::ALL.len() - 1);

        let earth = s.body("Earth").unwrap();
        assert!(matches!(
            earth.kind,
            BodyKind::Geoid { axial_tilt_degrees, .. } if axial_tilt_degrees == 0.0
        ));
        assert_eq!(earth.ephemeris, Some(Path::new("ephem").join("earth2.txt")));

        assert_eq!(s.body("Mercury").unwrap().radius_scale, 1.0);
        assert_eq!(s.body("Mars").unwrap().radius_scale, 1.0);
        assert_eq!(s.body("Moon").unwrap().radius_scale, 1.0);
        assert_eq!(s.body("Jupiter").unwrap().radius_scale, 300.0);

        assert!(matches!(
            s.body("Venus").unwrap().kind,
            BodyKind::Geoid { radius_major, radius_minor, .. }
                if radius_major == 6051E3 && radius_minor == 6000E3
        ));
    }

    #[test]
    fn new_bodies_and_unmatched_entries() {
        let s = load(indoc! {r#"
            [[body]]
            name = 'Ceres'
            mass = 9.38e20
            radius = 469.7e3
            ephemeris = 'ceres.txt'
        "#})
        .unwrap();
        let ceres = s.body("Ceres").unwrap();
        assert_eq!(ceres.mass.as_kilograms(), 9.38e20);
        assert!(matches!(ceres.kind, BodyKind::Sphere { radius, emissive: false } if radius == 469.7e3));
        assert_eq!(ceres.layout, MeshLayout::SPHERE);

        let err = load(indoc! {r#"
            [[body]]
            matches = '^Pluto'
        "#})
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnmatchedBody { .. }));

        // New bodies are gravitational sources too
        let err = load(indoc! {r#"
            [[body]]
            name = 'Ceres'
            radius = 469.7e3
        "#})
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingMass { name } if name == "Ceres"));

        // Unless they're left out
        let s = load(indoc! {r#"
            [[body]]
            name = 'Ceres'
            enabled = false
        "#})
        .unwrap();
        assert!(s.body("Ceres").is_none());
    }

    #[test]
    fn celestial_body_from_config() {
        let s = Scenario::nominal("ephem");
        let cfg = s.body("Earth").unwrap();
        let earth = cfg.celestial_body(EphemerisStore::default());
        assert_eq!(earth.name(), "Earth");
        assert_eq!(earth.layout, MeshLayout::GEOID);
        assert_eq!(earth.texture, Some(PathBuf::from("earth.jpg")));
        assert!(earth.clock.rate().as_radians_per_second() > 0.0);
    }
}
