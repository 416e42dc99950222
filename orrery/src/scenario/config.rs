use crate::{
    mesh::{MeshError, MeshLayout},
    units::{Time, Timestamp},
};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::{collections::HashSet, fs, io, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),
    #[error("Duplicate configuration entry for body '{0}'")]
    DuplicateBody(String),
    #[error("Body configurations must contain one of the fields 'name' or 'matches'")]
    MissingSelector,
    #[error("Body configuration contains an invalid 'matches' regex '{pattern}'")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Configuration entry for body (name='{name:?}', matches='{matches:?}') doesn't match any body")]
    UnmatchedBody {
        name: Option<String>,
        matches: Option<String>,
    },
    #[error("Invalid RFC 3339 timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Invalid duration '{value}'")]
    InvalidDuration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("Rotation period '{value}' must be longer than zero")]
    ZeroRotationPeriod { value: String },
    #[error("Body '{name}' has a mass of {mass} kg, gravitational sources need a positive mass")]
    InvalidMass { name: String, mass: f64 },
    #[error("Body '{name}' is not part of the nominal solar system and needs a 'mass'")]
    MissingMass { name: String },
    #[error(transparent)]
    InvalidLayout(#[from] MeshError),
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub name: Option<String>,
    /// RFC 3339
    pub start: Option<String>,
    /// Integrator step, e.g. '10m'
    pub time_step: Option<String>,
    pub display_scale: Option<f64>,
    #[serde(alias = "body")]
    pub bodies: Vec<Body>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        cfg.start()?;
        cfg.time_step()?;

        let mut names = HashSet::new();
        for body in cfg.bodies.iter() {
            match (body.name.as_ref(), body.matches.as_ref()) {
                (Some(name), _) => {
                    if !names.insert(name.to_lowercase()) {
                        return Err(ConfigError::DuplicateBody(name.clone()));
                    }
                }
                (None, Some(pattern)) => {
                    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
                        pattern: pattern.clone(),
                        source,
                    })?;
                }
                (None, None) => return Err(ConfigError::MissingSelector),
            }
            if let Some(mass) = body.mass {
                if mass.is_nan() || mass <= 0.0 {
                    return Err(ConfigError::InvalidMass {
                        name: body.label().to_owned(),
                        mass,
                    });
                }
            }
            body.rotation_period()?;
            body.layout(MeshLayout::SPHERE)?;
        }

        Ok(cfg)
    }

    pub fn start(&self) -> Result<Option<Timestamp>, ConfigError> {
        self.start.as_deref().map(parse_timestamp).transpose()
    }

    pub fn time_step(&self) -> Result<Option<Time>, ConfigError> {
        self.time_step.as_deref().map(parse_duration).transpose()
    }

    /// First entry that selects `name`, exact names win over regexes
    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|b| b.name.is_some() && b.matches_body(name))
            .or_else(|| self.bodies.iter().find(|b| b.matches_body(name)))
    }
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Body {
    pub name: Option<String>,
    pub matches: Option<String>,
    /// Leave the body out of the simulation
    pub enabled: Option<bool>,
    /// [kg]
    pub mass: Option<f64>,
    /// Equatorial radius [m]
    pub radius: Option<f64>,
    /// Same as `radius`, for geoids
    pub radius_major: Option<f64>,
    /// Polar radius [m], makes the body a geoid
    pub radius_minor: Option<f64>,
    /// [deg], makes the body a geoid
    pub axial_tilt: Option<f64>,
    pub rotation_period: Option<String>,
    pub ephemeris: Option<String>,
    pub texture: Option<String>,
    pub rows: Option<usize>,
    pub max_vertexes_per_row: Option<usize>,
    /// Multiplier on the drawn radius
    pub radius_scale: Option<f64>,
}

impl Body {
    pub fn matches_body(&self, body_name: &str) -> bool {
        if let Some(name) = self.name.as_ref() {
            name.trim().eq_ignore_ascii_case(body_name)
        } else if let Some(pattern) = self.matches.as_ref() {
            Regex::new(pattern)
                .map(|re| re.is_match(body_name))
                .unwrap_or(false)
        } else {
            false
        }
    }

    /// Name, or the regex for entries without one
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.matches.as_deref())
            .unwrap_or_default()
    }

    pub fn rotation_period(&self) -> Result<Option<Time>, ConfigError> {
        let Some(value) = self.rotation_period.as_deref() else {
            return Ok(None);
        };
        let period = parse_duration(value)?;
        if period.as_secs() > 0.0 {
            Ok(Some(period))
        } else {
            Err(ConfigError::ZeroRotationPeriod {
                value: value.to_owned(),
            })
        }
    }

    /// `fallback` with any row settings from this entry applied
    pub fn layout(&self, fallback: MeshLayout) -> Result<MeshLayout, MeshError> {
        if self.rows.is_none() && self.max_vertexes_per_row.is_none() {
            return Ok(fallback);
        }
        MeshLayout::new(
            self.rows.unwrap_or(fallback.rows),
            self.max_vertexes_per_row
                .unwrap_or(fallback.max_vertexes_per_row),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

pub fn parse_timestamp(value: &str) -> Result<Timestamp, ConfigError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| Timestamp::from_utc(t.with_timezone(&Utc)))
        .map_err(|source| ConfigError::InvalidTimestamp {
            value: value.to_owned(),
            source,
        })
}

pub fn parse_duration(value: &str) -> Result<Time, ConfigError> {
    humantime::parse_duration(value)
        .map(Time::from_std_duration)
        .map_err(|source| ConfigError::InvalidDuration {
            value: value.to_owned(),
            source,
        })
}
