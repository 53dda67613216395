//! Spherical coordinates on the unit sphere.
//!
//! `theta` is the polar angle measured from `+Z`, `phi` the azimuth in the XY plane
//! measured from `+X`. The radius is pinned to 1.

use glam::DVec3;

/// Points whose `sin(theta)` falls below this are treated as poles.
const POLE_EPSILON: f64 = 1e-15;

/// A direction expressed as polar/azimuth angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCoord {
    /// Polar angle in `[0, π]`.
    pub theta: f64,
    /// Azimuth in `(-π, π]`.
    pub phi: f64,
}

impl SphericalCoord {
    /// Polar angle `theta` from +Z and azimuth `phi` from +X, in radians.
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Convert a point on the unit sphere to angles.
    ///
    /// `z` is clamped before `acos` so rounding just outside `[-1, 1]` cannot
    /// produce NaN. At the poles the azimuth is undefined and reported as 0.
    #[must_use]
    pub fn from_cartesian(p: DVec3) -> Self {
        let theta = p.z.clamp(-1.0, 1.0).acos();
        let phi = if theta.sin().abs() < POLE_EPSILON {
            0.0
        } else {
            p.y.atan2(p.x)
        };
        Self { theta, phi }
    }

    /// Convert back to a unit-length Cartesian point.
    #[must_use]
    pub fn to_cartesian(self) -> DVec3 {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        DVec3::new(sin_t * cos_p, sin_t * sin_p, cos_t)
    }
}
