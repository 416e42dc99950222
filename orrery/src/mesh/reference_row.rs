use super::{LatLongVertex, MeshError};
use crate::math::{vector, AxisRotation, Vector3};

/// Finite difference step for the surface tangent [rad]
pub const LATITUDE_DELTA_RADIANS: f64 = 1e-7;

/// Rings with |latitude| below this use the horizontal normal directly [deg]
const EQUATOR_LATITUDE_EPSILON: f64 = 1e-5;

/// No ring of more than one vertex may sit closer to a pole than this [deg]
const MAX_RING_LATITUDE: f64 = 89.999;

/// Geodetic latitude is taken as-is within these bands [deg]
const GEODETIC_POLE_LATITUDE: f64 = 89.9999;
const GEODETIC_EQUATOR_LATITUDE: f64 = 0.0001;

/// Inputs for one latitude ring
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RowParams {
    /// Parametric latitude [deg]
    pub latitude: f64,
    /// Equatorial radius [m]
    pub radius_major: f64,
    /// Polar radius [m]
    pub radius_minor: f64,
    /// Added to every longitude, the body's rotation [rad]
    pub longitude_phase: f64,
    pub count: usize,
}

/// Positions and normals of one latitude ring, after the body's tilt is applied
#[derive(Clone, PartialEq, Debug)]
pub struct ReferenceRow {
    pub latitude: f64,
    pub geodetic_latitude: f64,
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
}

impl ReferenceRow {
    pub fn build(params: &RowParams, tilt: &AxisRotation) -> Result<Self, MeshError> {
        let non_finite = MeshError::NonFinite {
            latitude: params.latitude,
        };
        // NaN slips through every tangent comparison below
        let inputs = [
            params.latitude,
            params.radius_major,
            params.radius_minor,
            params.longitude_phase,
        ];
        if !inputs.iter().all(|v| v.is_finite()) {
            return Err(non_finite);
        }

        let mut row = if params.count < 2 {
            Self::pole(params)
        } else {
            Self::ring(params)?
        };
        tilt.rotate_all(&mut row.positions);
        tilt.rotate_all(&mut row.normals);

        let finite = |v: &Vector3| v.iter().all(|c| c.is_finite());
        if !row.positions.iter().chain(row.normals.iter()).all(finite) {
            return Err(non_finite);
        }
        Ok(row)
    }

    fn pole(params: &RowParams) -> Self {
        let sign = if params.latitude < 0.0 { -1.0 } else { 1.0 };
        ReferenceRow {
            latitude: params.latitude,
            geodetic_latitude: params.latitude,
            positions: vec![Vector3::new(0.0, 0.0, sign * params.radius_minor)],
            normals: vec![Vector3::new(0.0, 0.0, sign)],
        }
    }

    fn ring(params: &RowParams) -> Result<Self, MeshError> {
        if params.latitude.abs() > MAX_RING_LATITUDE {
            return Err(MeshError::LatitudeOutOfRange {
                latitude: params.latitude,
                count: params.count,
            });
        }

        let latitude_radians = params.latitude.to_radians();
        let step = 360.0 / ((params.count - 1) as f64);

        let mut positions = Vec::with_capacity(params.count);
        let mut normals = Vec::with_capacity(params.count);
        for k in 0..params.count {
            let longitude = -180.0 + step * (k as f64);
            let longitude_radians = longitude.to_radians() + params.longitude_phase;
            let position = surface_point(params, latitude_radians, longitude_radians);
            let normal = if params.latitude.abs() < EQUATOR_LATITUDE_EPSILON {
                vector::normalize(&Vector3::new(position.x, position.y, 0.0))
            } else {
                let flat = tangent(params, &position, latitude_radians, longitude_radians)?;
                let normal = vector::make_perpendicular(&flat, &vector::straight_up());
                if position.z < 0.0 {
                    -normal
                } else {
                    normal
                }
            };
            positions.push(position);
            normals.push(normal);
        }

        Ok(ReferenceRow {
            latitude: params.latitude,
            geodetic_latitude: geodetic_latitude(params)?,
            positions,
            normals,
        })
    }

    /// Same value for the whole ring
    pub fn texture_y(&self) -> f64 {
        (self.geodetic_latitude + 90.0) / 180.0
    }

    /// Label the ring's vertexes, numbering from `first_index`
    pub fn vertexes(&self, first_index: u32) -> Vec<LatLongVertex> {
        let count = self.positions.len();
        let texture_y = self.texture_y();
        self.positions
            .iter()
            .zip(self.normals.iter())
            .enumerate()
            .map(|(k, (position, normal))| {
                let longitude = if count < 2 {
                    0.0
                } else {
                    -180.0 + (360.0 / ((count - 1) as f64)) * (k as f64)
                };
                LatLongVertex {
                    graphics_index: first_index + k as u32,
                    longitude,
                    texture_x: (longitude + 180.0) / 360.0,
                    texture_y,
                    position: *position,
                    normal: *normal,
                }
            })
            .collect()
    }
}

fn surface_point(params: &RowParams, latitude: f64, longitude: f64) -> Vector3 {
    let cos_lat = latitude.cos();
    Vector3::new(
        params.radius_major * cos_lat * longitude.cos(),
        params.radius_major * cos_lat * longitude.sin(),
        params.radius_minor * latitude.sin(),
    )
}

/// Unit tangent pointing north along the meridian through `position`
fn tangent(
    params: &RowParams,
    position: &Vector3,
    latitude: f64,
    longitude: f64,
) -> Result<Vector3, MeshError> {
    let ahead = surface_point(params, latitude + LATITUDE_DELTA_RADIANS, longitude);
    if position.z > ahead.z {
        return Err(MeshError::TangentInverted {
            latitude: params.latitude,
        });
    }

    let flat = vector::normalize(&(ahead - position));
    if flat.z < 0.0 {
        return Err(MeshError::TangentBelowHorizon {
            latitude: params.latitude,
        });
    }
    if flat.dot(&vector::straight_up()) < 0.0 {
        return Err(MeshError::TangentAgainstUp {
            latitude: params.latitude,
        });
    }
    Ok(flat)
}

/// Angle between the surface normal and the equatorial plane, at longitude 0
fn geodetic_latitude(params: &RowParams) -> Result<f64, MeshError> {
    let latitude = params.latitude;
    if latitude.abs() > GEODETIC_POLE_LATITUDE || latitude.abs() < GEODETIC_EQUATOR_LATITUDE {
        return Ok(latitude);
    }

    let latitude_radians = latitude.to_radians();
    let position = surface_point(params, latitude_radians, 0.0);
    let flat = tangent(params, &position, latitude_radians, 0.0)?;
    let degrees = vector::straight_up()
        .dot(&flat)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees();
    Ok(if latitude < 0.0 { -degrees } else { degrees })
}
