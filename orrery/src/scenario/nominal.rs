use orrery_types::prelude::*;
use std::path::Path;

use super::BodyConfig;
use crate::{
    celestial::BodyKind,
    mesh::MeshLayout,
    units::{AngularVelocity, Mass, Time, Timestamp},
};

/// Meters to render units
pub const DISPLAY_SCALE: f64 = 1.0E-6;

pub fn time_step() -> Time {
    Time::from_minutes(10.0)
}

/// First record of the bundled Horizons tables
pub fn start() -> Timestamp {
    Timestamp::from_utc(
        TimeIndex::from_millis(1_528_848_000_000)
            .to_utc()
            .unwrap_or_default(),
    )
}

pub fn body_config(planet: Planet, ephemeris_dir: &Path) -> BodyConfig {
    let kind = match planet.polar_radius() {
        Some(radius_minor) => BodyKind::Geoid {
            radius_major: planet.radius(),
            radius_minor,
            axial_tilt_degrees: planet.axial_tilt(),
        },
        None => BodyKind::Sphere {
            radius: planet.radius(),
            emissive: planet.is_emissive(),
        },
    };

    let layout = match kind {
        BodyKind::Geoid { .. } => MeshLayout::GEOID,
        BodyKind::Sphere { .. } => MeshLayout::SPHERE,
    };

    BodyConfig {
        name: planet.to_string(),
        mass: Mass::from_kilograms(planet.mass()),
        kind,
        rotation_rate: AngularVelocity::from_radians_per_second(
            planet.rotation_rate().unwrap_or(0.0),
        ),
        ephemeris: Some(ephemeris_dir.join(planet.ephemeris_file_name())),
        texture: Some(planet.texture_file_name().into()),
        layout,
        radius_scale: planet.display_radius_scale(),
    }
}
