//! Small helpers on top of [`glam::DVec3`], the vector type used by the whole pipeline.

use glam::DVec3;

use crate::GeodomeError;

/// Vectors shorter than this are treated as the origin and refuse to normalize.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Midpoint of the segment `a`-`b`.
///
/// Computed as `(a + b) * 0.5`: addition commutes exactly in IEEE arithmetic,
/// so the midpoint of an edge is bit-identical whichever triangle visits it.
#[inline]
#[must_use]
pub fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.5
}

/// Normalize `p`, failing instead of producing NaN for near-zero or non-finite input.
pub fn normalize_checked(p: DVec3) -> Result<DVec3, GeodomeError> {
    let len = p.length();
    if !len.is_finite() || len < NORMALIZE_EPSILON {
        return Err(GeodomeError::ZeroLengthVector {
            x: p.x,
            y: p.y,
            z: p.z,
        });
    }
    Ok(p / len)
}

/// Narrow to the `f32` layout handed to mesh consumers.
#[inline]
#[must_use]
pub fn to_f32(p: DVec3) -> [f32; 3] {
    p.as_vec3().to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_midpoint_is_symmetric_bitwise() {
        let a = DVec3::new(0.1, 0.7, -0.3);
        let b = DVec3::new(-0.9, 0.2, 0.6);
        let ab = midpoint(a, b);
        let ba = midpoint(b, a);
        assert_eq!(ab.x.to_bits(), ba.x.to_bits());
        assert_eq!(ab.y.to_bits(), ba.y.to_bits());
        assert_eq!(ab.z.to_bits(), ba.z.to_bits());
    }

    #[test]
    fn test_normalize_checked_unit_length() {
        let n = normalize_checked(DVec3::new(3.0, 4.0, 12.0)).unwrap();
        assert!((n.length() - 1.0).abs() < EPSILON);
        assert!((n - DVec3::new(3.0, 4.0, 12.0) / 13.0).length() < EPSILON);
    }

    #[test]
    fn test_normalize_checked_rejects_origin() {
        let err = normalize_checked(DVec3::ZERO).unwrap_err();
        assert!(matches!(err, GeodomeError::ZeroLengthVector { .. }));
    }

    #[test]
    fn test_normalize_checked_rejects_nan() {
        assert!(normalize_checked(DVec3::new(f64::NAN, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(to_f32(DVec3::new(1.0, -0.5, 0.25)), [1.0, -0.5, 0.25]);
    }
}
