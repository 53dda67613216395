//! The regular octahedron every geodesic sphere starts from.

use std::f64::consts::FRAC_1_SQRT_2;

use glam::DVec3;

use crate::mesh::Mesh;

/// Octahedron vertices: north pole, four equatorial points, south pole.
///
/// The equatorial points sit at `(±s, ±s, 0)` with `s = 1/√2`, so all six
/// already lie on the unit sphere and projecting them is a no-op.
pub const OCTAHEDRON_VERTICES: [DVec3; 6] = [
    DVec3::new(0.0, 0.0, 1.0),
    DVec3::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0),
    DVec3::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
    DVec3::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
    DVec3::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0),
    DVec3::new(0.0, 0.0, -1.0),
];

/// Octahedron faces, counter-clockwise when viewed from outside.
pub const OCTAHEDRON_TRIANGLES: [[u32; 3]; 8] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 1],
    [5, 2, 1],
    [5, 3, 2],
    [5, 4, 3],
    [5, 1, 4],
];

/// The level-0 mesh: 6 vertices, 8 outward-wound triangles.
pub fn octahedron() -> Mesh {
    Mesh::from_trusted_parts(OCTAHEDRON_VERTICES.to_vec(), OCTAHEDRON_TRIANGLES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuilder;
    use crate::topology::{all_wind_outward, euler_characteristic, is_closed_manifold};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_octahedron_passes_builder_validation() {
        let built = MeshBuilder::build(OCTAHEDRON_VERTICES.to_vec(), OCTAHEDRON_TRIANGLES.to_vec());
        assert_eq!(built.unwrap(), octahedron());
    }

    #[test]
    fn test_octahedron_counts() {
        let mesh = octahedron();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_octahedron_on_unit_sphere() {
        for v in octahedron().vertices() {
            assert!(
                (v.length() - 1.0).abs() < EPSILON,
                "{v:?} is not on the unit sphere"
            );
        }
    }

    #[test]
    fn test_octahedron_winding_outward() {
        assert!(all_wind_outward(&octahedron()));
    }

    #[test]
    fn test_octahedron_closed() {
        let mesh = octahedron();
        assert!(is_closed_manifold(&mesh));
        assert_eq!(euler_characteristic(&mesh), 2);
    }

    #[test]
    fn test_octahedron_is_stable_across_calls() {
        assert_eq!(octahedron(), octahedron());
    }
}
