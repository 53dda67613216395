//! Projection of interpolated edge midpoints onto the target surface.
//!
//! Two interchangeable methods target the unit sphere:
//! - **Radial**: divide by length. The default.
//! - **Spherical**: normalize, then round-trip through [`SphericalCoord`] angles.
//!
//! One method is chosen per build; the engine never mixes them. Other target
//! surfaces plug in by implementing [`Projection`].

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::GeodomeError;
use crate::spherical::SphericalCoord;
use crate::vector::normalize_checked;

/// Maps a point near the surface onto the surface.
pub trait Projection {
    /// # Errors
    ///
    /// [`GeodomeError::ZeroLengthVector`] when `p` is too close to the origin to
    /// have a direction.
    fn project(&self, p: DVec3) -> Result<DVec3, GeodomeError>;
}

/// Radial projection onto the unit sphere: `p / |p|`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitSphere;

impl Projection for UnitSphere {
    #[inline]
    fn project(&self, p: DVec3) -> Result<DVec3, GeodomeError> {
        normalize_checked(p)
    }
}

/// Unit-sphere projection that stores the direction as polar/azimuth angles
/// before converting back to Cartesian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SphericalRoundTrip;

impl Projection for SphericalRoundTrip {
    fn project(&self, p: DVec3) -> Result<DVec3, GeodomeError> {
        let dir = normalize_checked(p)?;
        Ok(SphericalCoord::from_cartesian(dir).to_cartesian())
    }
}

/// Selects which projection the subdivision engine uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionMethod {
    /// Divide by length.
    #[default]
    Radial,
    /// Go through spherical angles.
    Spherical,
}

impl Projection for ProjectionMethod {
    #[inline]
    fn project(&self, p: DVec3) -> Result<DVec3, GeodomeError> {
        match self {
            Self::Radial => UnitSphere.project(p),
            Self::Spherical => SphericalRoundTrip.project(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_radial_outputs_unit_length() {
        for p in [
            DVec3::new(0.5, 0.5, 0.0),
            DVec3::new(-3.0, 2.0, 7.0),
            DVec3::new(1e-6, 0.0, -1e-6),
        ] {
            let q = UnitSphere.project(p).unwrap();
            assert!((q.length() - 1.0).abs() < EPSILON, "{p:?} -> {q:?}");
            assert!(q.dot(p) > 0.0, "projection flipped direction of {p:?}");
        }
    }

    #[test]
    fn test_surface_points_are_fixed() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        for method in [ProjectionMethod::Radial, ProjectionMethod::Spherical] {
            for p in [DVec3::Z, -DVec3::Z, DVec3::new(s, -s, 0.0)] {
                let q = method.project(p).unwrap();
                assert!((q - p).length() < EPSILON, "{method:?} moved {p:?} to {q:?}");
            }
        }
    }

    #[test]
    fn test_methods_agree() {
        let p = DVec3::new(0.3, -0.2, 0.6);
        let radial = ProjectionMethod::Radial.project(p).unwrap();
        let spherical = ProjectionMethod::Spherical.project(p).unwrap();
        assert!((radial - spherical).length() < 1e-9);
    }

    #[test]
    fn test_origin_is_rejected() {
        for method in [ProjectionMethod::Radial, ProjectionMethod::Spherical] {
            let err = method.project(DVec3::ZERO).unwrap_err();
            assert!(matches!(err, GeodomeError::ZeroLengthVector { .. }));
        }
    }

    #[test]
    fn test_default_projection_method_is_radial() {
        assert_eq!(ProjectionMethod::default(), ProjectionMethod::Radial);
    }
}
