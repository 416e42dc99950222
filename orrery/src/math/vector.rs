use super::Vector3;

/// Lengths below this are treated as the zero vector
pub const NORMALIZE_EPSILON: f64 = 1e-20;

/// Unit vector pointing the same way as `v`, or zero when `v` is too short to have a direction
pub fn normalize(v: &Vector3) -> Vector3 {
    let length = v.norm();
    if length < NORMALIZE_EPSILON {
        return Vector3::zeros();
    }
    v * (1.0 / length)
}

/// The part of unit vector `b` orthogonal to unit vector `a`, normalized.
///
/// Zero when `b` is parallel to `a`.
pub fn make_perpendicular(a: &Vector3, b: &Vector3) -> Vector3 {
    let along = a.dot(b);
    normalize(&(b - a * along))
}

pub fn straight_up() -> Vector3 {
    Vector3::z()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_unit_length() {
        for v in [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-1e-10, 2e-10, 5e-11),
            Vector3::new(6.4e6, -1.2e11, 7.0),
        ] {
            assert_relative_eq!(normalize(&v).norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn normalize_degenerate_is_zero() {
        assert_eq!(normalize(&Vector3::zeros()), Vector3::zeros());
        assert_eq!(normalize(&Vector3::new(1e-25, 0.0, 0.0)), Vector3::zeros());
    }

    #[test]
    fn perpendicular_is_orthogonal() {
        let a = normalize(&Vector3::new(1.0, 2.0, 3.0));
        for b in [
            Vector3::z(),
            normalize(&Vector3::new(-4.0, 0.5, 1.0)),
            normalize(&Vector3::new(0.0, -1.0, 0.2)),
        ] {
            let p = make_perpendicular(&a, &b);
            assert_relative_eq!(a.dot(&p), 0.0, epsilon = 1e-12);
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn perpendicular_of_parallel_is_zero() {
        let a = Vector3::x();
        assert_eq!(make_perpendicular(&a, &a), Vector3::zeros());
    }

    #[test]
    fn nalgebra_operators_cover_the_rest() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-2.0, 0.5, 4.0);
        assert_eq!(a + b, Vector3::new(-1.0, 2.5, 7.0));
        assert_eq!(a - b, Vector3::new(3.0, 1.5, -1.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(Vector3::x().cross(&Vector3::y()), Vector3::z());
        assert_eq!(a.norm_squared(), 14.0);
    }
}
