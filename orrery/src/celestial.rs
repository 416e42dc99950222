use crate::body::BodyState;
use crate::diagnostics::Diagnostics;
use crate::math::{AxisRotation, Vector3};
use crate::mesh::{MeshError, MeshLayout, SurfaceMesh, SurfaceMeshBuilder};
use crate::orientation::OrientationClock;
use std::path::PathBuf;
use tracing::debug;

/// Shape of a body's surface
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum BodyKind {
    /// Oblate ellipsoid with its polar axis tilted about X
    Geoid {
        radius_major: f64,
        radius_minor: f64,
        axial_tilt_degrees: f64,
    },
    Sphere { radius: f64, emissive: bool },
}

impl BodyKind {
    pub fn is_emissive(&self) -> bool {
        matches!(self, BodyKind::Sphere { emissive: true, .. })
    }

    /// Equatorial radius [m]
    pub fn radius(&self) -> f64 {
        match *self {
            BodyKind::Geoid { radius_major, .. } => radius_major,
            BodyKind::Sphere { radius, .. } => radius,
        }
    }

    pub fn tilt(&self) -> AxisRotation {
        match *self {
            BodyKind::Geoid {
                axial_tilt_degrees, ..
            } => AxisRotation::tilt_about_x(axial_tilt_degrees),
            BodyKind::Sphere { .. } => AxisRotation::identity(),
        }
    }
}

/// Something that can produce a renderable surface
pub trait SurfaceModel {
    /// Rebuild the surface at the current orientation and install it.
    ///
    /// On error the previously installed mesh stays in place.
    fn build_mesh(&mut self, diagnostics: &mut dyn Diagnostics)
        -> Result<&SurfaceMesh, MeshError>;

    fn current_mesh(&self) -> Option<&SurfaceMesh>;
}

/// A body in the simulation: dynamics, rotation and surface
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub state: BodyState,
    pub kind: BodyKind,
    pub clock: OrientationClock,
    pub layout: MeshLayout,
    /// Image the renderer wraps around the mesh
    pub texture: Option<PathBuf>,
    /// Radii are multiplied by this when building the mesh
    pub radius_scale: f64,
    mesh: Option<SurfaceMesh>,
}

impl CelestialBody {
    pub fn new(state: BodyState, kind: BodyKind, clock: OrientationClock, layout: MeshLayout) -> Self {
        CelestialBody {
            state,
            kind,
            clock,
            layout,
            texture: None,
            radius_scale: 1.0,
            mesh: None,
        }
    }

    pub fn with_texture<P: Into<PathBuf>>(mut self, texture: P) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_radius_scale(mut self, radius_scale: f64) -> Self {
        self.radius_scale = radius_scale;
        self
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn is_emissive(&self) -> bool {
        self.kind.is_emissive()
    }

    /// Geoids that turn, the bodies whose day is aligned to the sun
    pub fn is_spinning_geoid(&self) -> bool {
        matches!(self.kind, BodyKind::Geoid { .. })
            && self.clock.rate().as_radians_per_second() != 0.0
    }

    /// Unit vector along the body's spin axis
    pub fn north_pole_vector(&self) -> Vector3 {
        self.kind.tilt().rotate(&Vector3::z())
    }

    pub fn mesh_builder(&self) -> SurfaceMeshBuilder {
        let s = self.radius_scale;
        match self.kind {
            BodyKind::Geoid {
                radius_major,
                radius_minor,
                axial_tilt_degrees,
            } => SurfaceMeshBuilder::ellipsoid(
                radius_major * s,
                radius_minor * s,
                axial_tilt_degrees,
                self.layout,
            ),
            BodyKind::Sphere { radius, .. } => SurfaceMeshBuilder::sphere(radius * s, self.layout),
        }
    }
}

impl SurfaceModel for CelestialBody {
    fn build_mesh(
        &mut self,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<&SurfaceMesh, MeshError> {
        let mesh = self
            .mesh_builder()
            .build(self.clock.angle(), diagnostics)?;
        debug!(body = %self.state.name, angle = self.clock.angle().as_degrees(), "Installed mesh");
        Ok(self.mesh.insert(mesh))
    }

    fn current_mesh(&self) -> Option<&SurfaceMesh> {
        self.mesh.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::ephemeris::EphemerisStore;
    use crate::units::{AngularVelocity, Mass, Time};
    use approx::assert_relative_eq;
    use orrery_types::prelude::Planet;

    fn earth(layout: MeshLayout) -> CelestialBody {
        CelestialBody::new(
            BodyState::new(
                "Earth",
                Mass::from_kilograms(Planet::Earth.mass()),
                EphemerisStore::default(),
            ),
            BodyKind::Geoid {
                radius_major: Planet::EARTH_RADIUS_MAJOR,
                radius_minor: Planet::EARTH_RADIUS_MINOR,
                axial_tilt_degrees: Planet::EARTH_AXIAL_TILT_DEGREES,
            },
            OrientationClock::new(AngularVelocity::from_period(Time::from_hours(24.0))),
            layout,
        )
    }

    #[test]
    fn north_pole_follows_tilt() {
        let e = earth(MeshLayout::GEOID);
        let n = e.north_pole_vector();
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(n.z, 23.439_f64.to_radians().cos(), epsilon = 1e-9);
        assert!(n.y > 0.0);
        assert!(e.is_spinning_geoid());
        assert!(!e.is_emissive());
    }

    #[test]
    fn only_turning_geoids_spin() {
        let mut upright = earth(MeshLayout::GEOID);
        upright.kind = BodyKind::Geoid {
            radius_major: Planet::EARTH_RADIUS_MAJOR,
            radius_minor: Planet::EARTH_RADIUS_MINOR,
            axial_tilt_degrees: 0.0,
        };
        assert!(upright.is_spinning_geoid());

        upright.clock = OrientationClock::default();
        assert!(!upright.is_spinning_geoid());
    }

    #[test]
    fn build_installs_and_failure_keeps_last_mesh() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let mut e = earth(MeshLayout::new(7, 16).unwrap());
        assert!(e.current_mesh().is_none());
        let count = e.build_mesh(&mut diags).unwrap().vertex_count();
        assert_eq!(count, 42);

        let before = e.current_mesh().cloned();
        e.layout = MeshLayout {
            rows: 4,
            max_vertexes_per_row: 16,
        };
        assert!(e.build_mesh(&mut diags).is_err());
        assert_eq!(e.current_mesh().cloned(), before);
    }

    #[test]
    fn rotation_changes_the_mesh() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let mut e = earth(MeshLayout::new(7, 16).unwrap());
        let first = e.build_mesh(&mut diags).unwrap().clone();
        e.clock.advance_hours(6.0);
        let second = e.build_mesh(&mut diags).unwrap();
        assert_eq!(first.positions[0], second.positions[0]);
        assert_ne!(first.positions[10], second.positions[10]);
        assert_eq!(first.texture_coordinates, second.texture_coordinates);
    }

    #[test]
    fn radius_scale_applies_to_mesh() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let mut sun = CelestialBody::new(
            BodyState::new("Sun", Mass::from_kilograms(1.0), EphemerisStore::default()),
            BodyKind::Sphere {
                radius: 10.0,
                emissive: true,
            },
            OrientationClock::default(),
            MeshLayout::SPHERE,
        )
        .with_radius_scale(3.0)
        .with_texture("sun.jpg");
        assert!(sun.is_emissive());
        assert!(!sun.is_spinning_geoid());
        assert_eq!(sun.north_pole_vector(), Vector3::z());
        let mesh = sun.build_mesh(&mut diags).unwrap();
        assert_eq!(mesh.positions[0], Vector3::new(0.0, 0.0, 30.0));
    }
}
