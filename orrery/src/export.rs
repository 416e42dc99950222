use crate::{
    celestial::SurfaceModel, math::Vector3, mesh::SurfaceMesh, solar_system::SolarSystem,
};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write mesh export '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize mesh export")]
    Json(#[from] serde_json::Error),
}

/// One body's surface, placed in render units
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeshRecord<'a> {
    pub body: &'a str,
    pub emissive: bool,
    pub texture: Option<&'a Path>,
    /// Body center in render units
    pub position: Vector3,
    pub mesh: SurfaceMesh,
}

/// Bodies that don't have a mesh yet are left out
pub fn mesh_records(system: &SolarSystem) -> Vec<MeshRecord<'_>> {
    let scale = system.display_scale();
    system
        .bodies()
        .iter()
        .filter_map(|b| {
            let mesh = b.current_mesh()?;
            Some(MeshRecord {
                body: b.name(),
                emissive: b.is_emissive(),
                texture: b.texture.as_deref(),
                position: b.state.position * scale,
                mesh: mesh.placed(&b.state.position, scale),
            })
        })
        .collect()
}

pub fn write_json<W: Write>(system: &SolarSystem, writer: W) -> Result<usize, ExportError> {
    let records = mesh_records(system);
    serde_json::to_writer(writer, &records)?;
    Ok(records.len())
}

pub fn write_json_file<P: AsRef<Path>>(system: &SolarSystem, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let io_err = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    let count = write_json(system, &mut writer)?;
    writer.flush().map_err(io_err)?;
    info!(path = %path.display(), bodies = count, "Wrote mesh export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        body::BodyState,
        celestial::{BodyKind, CelestialBody},
        diagnostics::Diagnostic,
        ephemeris::EphemerisStore,
        integrator::NBodyIntegrator,
        mesh::MeshLayout,
        orientation::OrientationClock,
        units::{Mass, Timestamp},
    };
    use approx::assert_relative_eq;

    fn system() -> SolarSystem {
        let mut moon = CelestialBody::new(
            BodyState::new("Moon", Mass::from_kilograms(7.342E22), EphemerisStore::default()),
            BodyKind::Sphere {
                radius: 1.0E6,
                emissive: false,
            },
            OrientationClock::default(),
            MeshLayout::new(5, 4).unwrap(),
        )
        .with_texture("moon.jpg");
        moon.state.position = Vector3::new(4.0E8, 0.0, 0.0);
        let ghost = CelestialBody::new(
            BodyState::new("Ghost", Mass::from_kilograms(1.0), EphemerisStore::default()),
            BodyKind::Sphere {
                radius: 1.0,
                emissive: true,
            },
            OrientationClock::default(),
            MeshLayout::new(5, 4).unwrap(),
        );
        SolarSystem::new(
            vec![moon, ghost],
            NBodyIntegrator::default(),
            Timestamp::epoch(),
            1.0E-6,
        )
    }

    #[test]
    fn records_are_placed_in_render_units() {
        let mut s = system();
        let mut diags: Vec<Diagnostic> = Vec::new();
        s.body_mut("Moon").unwrap().build_mesh(&mut diags).unwrap();

        let records = mesh_records(&s);
        assert_eq!(records.len(), 1);
        let moon = &records[0];
        assert_eq!(moon.body, "Moon");
        assert!(!moon.emissive);
        assert_eq!(moon.texture, Some(Path::new("moon.jpg")));
        assert_relative_eq!(
            moon.position,
            Vector3::new(400.0, 0.0, 0.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            moon.mesh.positions[0],
            Vector3::new(400.0, 0.0, 1.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn json_shape() {
        let mut s = system();
        let mut diags: Vec<Diagnostic> = Vec::new();
        s.rebuild_meshes(&mut diags);

        let mut buf = Vec::new();
        assert_eq!(write_json(&s, &mut buf).unwrap(), 2);
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let first = &v[0];
        assert_eq!(first["body"], "Moon");
        assert_eq!(first["texture"], "moon.jpg");
        assert_eq!(first["mesh"]["positions"].as_array().unwrap().len(), 1 + 4 + 4 + 4 + 1);
        assert!(first["mesh"]["triangle-indices"].is_array());
        assert!(first["mesh"]["texture-coordinates"].is_array());
        assert_eq!(v[1]["emissive"], true);
        assert!(v[1]["texture"].is_null());
    }
}
