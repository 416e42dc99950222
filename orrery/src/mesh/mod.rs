//! Procedural surface meshes for spheres and oblate ellipsoids.
//!
//! A surface is a stack of latitude rings running north to south. The poles are
//! single vertices, the rings next to them hold 4 vertices, and each ring toward
//! the equator doubles in size up to a cap. Each ring repeats its first vertex at
//! +180° so texture X can run from 0 to 1 without wrapping.

use crate::math::Vector3;
use serde::Serialize;

pub use self::builder::SurfaceMeshBuilder;
pub use self::reference_row::{ReferenceRow, RowParams};

pub mod builder;
pub mod reference_row;
pub mod seam;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Mesh layout needs an odd row count of at least 5 and a power of two row cap of at least 4 (rows={rows}, cap={max_vertexes_per_row})")]
    InvalidLayout {
        rows: usize,
        max_vertexes_per_row: usize,
    },
    #[error("Latitude {latitude}° is too close to a pole for a ring of {count} vertexes")]
    LatitudeOutOfRange { latitude: f64, count: usize },
    #[error("Surface tangent at latitude {latitude}° points downhill")]
    TangentInverted { latitude: f64 },
    #[error("Surface tangent at latitude {latitude}° points below the horizon")]
    TangentBelowHorizon { latitude: f64 },
    #[error("Surface tangent at latitude {latitude}° is not above the horizon plane")]
    TangentAgainstUp { latitude: f64 },
    #[error("Ring at latitude {latitude}° has a non-finite radius, rotation or tilt")]
    NonFinite { latitude: f64 },
}

/// One surface vertex with everything the renderer needs
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LatLongVertex {
    /// Index into the flattened vertex buffers
    pub graphics_index: u32,
    /// Degrees, -180 to 180
    pub longitude: f64,
    pub texture_x: f64,
    pub texture_y: f64,
    pub position: Vector3,
    pub normal: Vector3,
}

/// Flattened buffers ready to hand to a renderer
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SurfaceMesh {
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub texture_coordinates: Vec<[f64; 2]>,
    pub triangle_indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    pub(crate) fn push_vertex(&mut self, v: &LatLongVertex) {
        self.positions.push(v.position);
        self.normals.push(v.normal);
        self.texture_coordinates.push([v.texture_x, v.texture_y]);
    }

    /// A copy moved to `center` and uniformly scaled, e.g. into render units.
    ///
    /// Normals are direction only and are left alone.
    pub fn placed(&self, center: &Vector3, scale: f64) -> SurfaceMesh {
        SurfaceMesh {
            positions: self
                .positions
                .iter()
                .map(|p| (p + center) * scale)
                .collect(),
            ..self.clone()
        }
    }
}

/// How many rings a surface has and how dense they get
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MeshLayout {
    pub rows: usize,
    pub max_vertexes_per_row: usize,
}

impl MeshLayout {
    /// 5° rings, used for the Earth
    pub const GEOID: MeshLayout = MeshLayout {
        rows: 37,
        max_vertexes_per_row: 128,
    };

    /// 10° rings, used for everything else
    pub const SPHERE: MeshLayout = MeshLayout {
        rows: 19,
        max_vertexes_per_row: 64,
    };

    pub fn new(rows: usize, max_vertexes_per_row: usize) -> Result<Self, MeshError> {
        let layout = MeshLayout {
            rows,
            max_vertexes_per_row,
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let rows_ok = self.rows >= 5 && self.rows % 2 == 1;
        let cap_ok = self.max_vertexes_per_row >= 4 && self.max_vertexes_per_row.is_power_of_two();
        if rows_ok && cap_ok {
            Ok(())
        } else {
            Err(MeshError::InvalidLayout {
                rows: self.rows,
                max_vertexes_per_row: self.max_vertexes_per_row,
            })
        }
    }

    /// Parametric latitude of row `row` in degrees, 90 at row 0
    pub fn latitude(&self, row: usize) -> f64 {
        90.0 - (row as f64) * 180.0 / ((self.rows - 1) as f64)
    }

    /// Vertex count of every row, north to south
    pub fn ring_sizes(&self) -> Vec<usize> {
        let mid = (self.rows - 1) / 2;
        let mut sizes = vec![1; self.rows];

        let mut count = 4;
        for size in sizes.iter_mut().take(mid + 1).skip(1) {
            *size = count;
            count = (count * 2).min(self.max_vertexes_per_row);
        }

        let mut count = 4;
        for row in ((mid + 1)..(self.rows - 1)).rev() {
            sizes[row] = count;
            count = (count * 2).min(self.max_vertexes_per_row);
        }

        sizes
    }

    pub fn vertex_count(&self) -> usize {
        self.ring_sizes().iter().sum()
    }
}
