use super::{seam, LatLongVertex, MeshError, MeshLayout, ReferenceRow, RowParams, SurfaceMesh};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::math::AxisRotation;
use crate::units::Angle;
use tracing::debug;

/// Builds the closed, textured surface of one body in body-centered meters
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SurfaceMeshBuilder {
    pub layout: MeshLayout,
    pub radius_major: f64,
    pub radius_minor: f64,
    pub tilt: AxisRotation,
}

impl SurfaceMeshBuilder {
    pub fn sphere(radius: f64, layout: MeshLayout) -> Self {
        SurfaceMeshBuilder {
            layout,
            radius_major: radius,
            radius_minor: radius,
            tilt: AxisRotation::identity(),
        }
    }

    pub fn ellipsoid(
        radius_major: f64,
        radius_minor: f64,
        axial_tilt_degrees: f64,
        layout: MeshLayout,
    ) -> Self {
        SurfaceMeshBuilder {
            layout,
            radius_major,
            radius_minor,
            tilt: AxisRotation::tilt_about_x(axial_tilt_degrees),
        }
    }

    /// Every ring, north pole first, with graphics indexes assigned in order
    pub fn rows(&self, longitude_phase: Angle) -> Result<Vec<Vec<LatLongVertex>>, MeshError> {
        self.layout.validate()?;

        let mut next_index = 0_u32;
        let mut rows = Vec::with_capacity(self.layout.rows);
        for (row, count) in self.layout.ring_sizes().into_iter().enumerate() {
            let params = RowParams {
                latitude: self.layout.latitude(row),
                radius_major: self.radius_major,
                radius_minor: self.radius_minor,
                longitude_phase: longitude_phase.as_radians(),
                count,
            };
            let vertexes = ReferenceRow::build(&params, &self.tilt)?.vertexes(next_index);
            next_index += vertexes.len() as u32;
            rows.push(vertexes);
        }
        Ok(rows)
    }

    /// Build the whole mesh.
    ///
    /// A ring that violates the surface geometry aborts the build. A seam whose
    /// rings don't fit a stitching pattern is reported and left open.
    pub fn build(
        &self,
        longitude_phase: Angle,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<SurfaceMesh, MeshError> {
        let rows = self.rows(longitude_phase)?;
        Ok(triangulate(&rows, diagnostics))
    }
}

/// Stitch rings, north pole first, into one mesh.
///
/// `rows` holds a single-vertex pole at each end and at least one ring between.
pub(crate) fn triangulate(
    rows: &[Vec<LatLongVertex>],
    diagnostics: &mut dyn Diagnostics,
) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::default();
    for v in rows.iter().flatten() {
        mesh.push_vertex(v);
    }

    let last = rows.len() - 1;
    let mut report = |upper_row: usize, lower_row: usize, e: seam::SeamMismatch| {
        diagnostics.report(Diagnostic::SeamSkipped {
            upper_row,
            lower_row,
            upper_len: e.upper,
            lower_len: e.lower,
        })
    };

    if let Err(e) = seam::north_pole_fan(&rows[0][0], &rows[1], &mut mesh.triangle_indices) {
        report(0, 1, e);
    }
    for upper in 1..(last - 1) {
        let lower = upper + 1;
        if let Err(e) = seam::stitch(&rows[upper], &rows[lower], &mut mesh.triangle_indices) {
            report(upper, lower, e);
        }
    }
    if let Err(e) =
        seam::south_pole_fan(&rows[last - 1], &rows[last][0], &mut mesh.triangle_indices)
    {
        report(last - 1, last, e);
    }

    debug!(
        vertexes = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Built surface mesh"
    );
    mesh
}
