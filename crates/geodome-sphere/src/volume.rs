//! Enclosed volume and volume-preserving rescale.
//!
//! Volume is accumulated per triangle as the tetrahedron it spans with the
//! origin, `det[v1 v2 v3] / 6`. Only meaningful for a closed, consistently wound
//! mesh that contains the origin.

use std::f64::consts::PI;

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::GeodomeError;
use crate::mesh::Mesh;

/// How the rescale factor is derived from `target / current`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolumeScaling {
    /// `(target / current)^(1/3)`: the uniform scale that actually hits the target volume.
    #[default]
    CubeRoot,
    /// `(target / current)^(1/2)`: legacy factor, lands short of (or past) the target.
    SquareRoot,
}

impl VolumeScaling {
    /// Scale factor for a given `target / current` ratio.
    pub fn factor(self, ratio: f64) -> f64 {
        match self {
            Self::CubeRoot => ratio.cbrt(),
            Self::SquareRoot => ratio.sqrt(),
        }
    }
}

#[inline]
fn tetra_det(v1: DVec3, v2: DVec3, v3: DVec3) -> f64 {
    DMat3::from_cols(v1, v2, v3).determinant()
}

/// Sum of unsigned origin-tetrahedron volumes.
pub fn volume(mesh: &Mesh) -> f64 {
    (0..mesh.triangle_count())
        .map(|t| {
            let [v1, v2, v3] = mesh.triangle_positions(t);
            tetra_det(v1, v2, v3).abs() / 6.0
        })
        .sum()
}

/// Sum of signed origin-tetrahedron volumes; positive when faces wind
/// counter-clockwise seen from outside.
pub fn signed_volume(mesh: &Mesh) -> f64 {
    (0..mesh.triangle_count())
        .map(|t| {
            let [v1, v2, v3] = mesh.triangle_positions(t);
            tetra_det(v1, v2, v3) / 6.0
        })
        .sum()
}

/// Scale every vertex so the mesh volume moves towards `target_volume`.
///
/// # Errors
///
/// - [`GeodomeError::NonPositiveTargetVolume`] if `target_volume` is not finite and positive.
/// - [`GeodomeError::ZeroVolume`] if the mesh encloses no volume.
pub fn rescale(
    mesh: &Mesh,
    target_volume: f64,
    scaling: VolumeScaling,
) -> Result<Mesh, GeodomeError> {
    if !(target_volume.is_finite() && target_volume > 0.0) {
        return Err(GeodomeError::NonPositiveTargetVolume(target_volume));
    }
    let current = volume(mesh);
    if !(current.is_finite() && current > 0.0) {
        return Err(GeodomeError::ZeroVolume(current));
    }

    let factor = scaling.factor(target_volume / current);
    mesh.map_vertices(|v| v * factor)
}

/// Volume of a ball of radius `r`.
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3)
}

/// Mesh volume compared with the ball through its vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeReport {
    /// Enclosed mesh volume.
    pub volume: f64,
    /// Volume of the ball whose radius is the mean vertex distance from the origin.
    pub sphere_volume: f64,
    /// `volume / sphere_volume`.
    pub ratio: f64,
}

impl VolumeReport {
    /// Measure `mesh` against the ball through its mean vertex radius.
    pub fn new(mesh: &Mesh) -> Self {
        let n = mesh.vertex_count().max(1) as f64;
        let mean_radius = mesh.vertices().iter().map(|v| v.length()).sum::<f64>() / n;
        let volume = volume(mesh);
        let sphere_volume = sphere_volume(mean_radius);
        let ratio = if sphere_volume > 0.0 {
            volume / sphere_volume
        } else {
            0.0
        };
        Self {
            volume,
            sphere_volume,
            ratio,
        }
    }

    /// `ratio` as a percentage.
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}
