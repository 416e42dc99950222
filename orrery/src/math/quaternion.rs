//! Rotation quaternions.
//!
//! Components follow nalgebra's naming: `i`, `j`, `k` are the vector part
//! (X, Y, Z) and `w` is the scalar part.

use super::{Quaternion, Vector3};

/// Quaternions shorter than this normalize to zero
pub const NORMALIZE_EPSILON: f64 = 1e-18;

/// Quaternions with a smaller squared norm have no usable inverse
pub const INVERSE_EPSILON: f64 = 1e-13;

pub fn zero() -> Quaternion {
    Quaternion::new(0.0, 0.0, 0.0, 0.0)
}

/// A quaternion with scalar part 0
pub fn pure(v: &Vector3) -> Quaternion {
    Quaternion::new(0.0, v.x, v.y, v.z)
}

pub fn normalize(q: &Quaternion) -> Quaternion {
    let length = q.norm();
    if length < NORMALIZE_EPSILON {
        return zero();
    }
    q * (1.0 / length)
}

pub fn conjugate(q: &Quaternion) -> Quaternion {
    Quaternion::new(q.w, -q.i, -q.j, -q.k)
}

/// Conjugate over squared norm, or zero for a near-zero quaternion
pub fn inverse(q: &Quaternion) -> Quaternion {
    let norm_squared = q.norm_squared();
    if norm_squared < INVERSE_EPSILON {
        return zero();
    }
    conjugate(q) * (1.0 / norm_squared)
}

/// Hamilton product `l * r`
pub fn multiply(l: &Quaternion, r: &Quaternion) -> Quaternion {
    let x = l.i * r.w + l.w * r.i + l.j * r.k - l.k * r.j;
    let y = -l.i * r.k + l.j * r.w + l.k * r.i + l.w * r.j;
    let z = l.i * r.j - l.j * r.i + l.k * r.w + l.w * r.k;
    let w = -l.i * r.i - l.j * r.j - l.k * r.k + l.w * r.w;
    Quaternion::new(w, x, y, z)
}

/// Rotation of `angle` radians about `axis`.
///
/// The axis is normalized first; a degenerate axis gives the zero quaternion.
pub fn set_as_rotation(axis: &Vector3, angle: f64) -> Quaternion {
    let axis = normalize(&pure(axis));
    let half = angle * 0.5;
    let s = half.sin();
    Quaternion::new(half.cos(), axis.i * s, axis.j * s, axis.k * s)
}

/// Vector part of `q * (v * q_inv)`
pub fn rotate_vector(q: &Quaternion, q_inv: &Quaternion, v: &Vector3) -> Vector3 {
    let rotated = multiply(q, &multiply(&pure(v), q_inv));
    Vector3::new(rotated.i, rotated.j, rotated.k)
}

pub fn rotate(point: &Vector3, axis: &Vector3, angle: f64) -> Vector3 {
    AxisRotation::new(axis, angle).rotate(point)
}

/// A fixed rotation with its inverse computed once, e.g. a body's axial tilt
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AxisRotation {
    q: Quaternion,
    q_inv: Quaternion,
}

impl Default for AxisRotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl AxisRotation {
    pub fn new(axis: &Vector3, angle: f64) -> Self {
        let q = set_as_rotation(axis, angle);
        AxisRotation {
            q,
            q_inv: inverse(&q),
        }
    }

    pub fn identity() -> Self {
        Self::new(&Vector3::x(), 0.0)
    }

    /// Tilt about the X axis of the reference frame
    pub fn tilt_about_x(degrees: f64) -> Self {
        Self::new(&Vector3::x(), degrees.to_radians())
    }

    pub fn quaternion(&self) -> &Quaternion {
        &self.q
    }

    pub fn rotate(&self, v: &Vector3) -> Vector3 {
        rotate_vector(&self.q, &self.q_inv, v)
    }

    pub fn rotate_all(&self, vs: &mut [Vector3]) {
        for v in vs.iter_mut() {
            *v = self.rotate(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_angle_is_identity() {
        let p = Vector3::new(1.5, -2.0, 0.25);
        for axis in [Vector3::x(), Vector3::new(1.0, 1.0, 0.0), Vector3::z() * 7.0] {
            let r = rotate(&p, &axis, 0.0);
            assert_relative_eq!(r, p, epsilon = 1e-15);
        }
    }

    #[test]
    fn rotate_there_and_back() {
        let p = Vector3::new(6378137.0, -1000.0, 6356752.0);
        let axis = Vector3::new(0.3, -0.4, 1.0);
        for degrees in [30.0_f64, 90.0, 180.0] {
            let theta = degrees.to_radians();
            let there = rotate(&p, &axis, theta);
            let back = rotate(&there, &axis, -theta);
            assert_relative_eq!(back, p, epsilon = 1e-6, max_relative = 1e-12);
        }
    }

    #[test]
    fn quarter_turn_about_z() {
        let r = rotate(&Vector3::x(), &Vector3::z(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(r, Vector3::y(), epsilon = 1e-15);
    }

    #[test]
    fn hamilton_product_matches_nalgebra() {
        let l = Quaternion::new(0.5, -1.0, 2.0, 0.25);
        let r = Quaternion::new(-1.5, 0.75, 0.1, -3.0);
        assert_relative_eq!(multiply(&l, &r), l * r, epsilon = 1e-12);
    }

    #[test]
    fn inverse_undoes() {
        let q = Quaternion::new(0.2, 1.0, -0.5, 2.0);
        let one = multiply(&q, &inverse(&q));
        assert_relative_eq!(one, Quaternion::identity(), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_inputs_give_zero() {
        assert_eq!(inverse(&Quaternion::new(1e-7, 0.0, 0.0, 0.0)), zero());
        assert_eq!(normalize(&Quaternion::new(0.0, 1e-19, 0.0, 0.0)), zero());
        let q = set_as_rotation(&Vector3::zeros(), 1.0);
        assert_eq!(q.i, 0.0);
        assert_eq!(q.j, 0.0);
        assert_eq!(q.k, 0.0);
    }

    #[test]
    fn rotation_is_unit_quaternion() {
        let q = set_as_rotation(&Vector3::new(2.0, 0.0, 0.0), 1.2);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn tilt_moves_pole_toward_minus_y() {
        // Positive rotation about +X carries +Z toward -Y
        let tilt = AxisRotation::tilt_about_x(23.439);
        let pole = tilt.rotate(&Vector3::z());
        assert_relative_eq!(pole.z, 23.439_f64.to_radians().cos(), epsilon = 1e-12);
        assert!(pole.y < 0.0);
        assert_relative_eq!(pole.x, 0.0, epsilon = 1e-15);
    }
}
