//! Topological and geometric sanity checks for generated meshes.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::mesh::Mesh;

#[inline]
fn undirected(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Number of triangles using each undirected edge.
pub fn edge_use_counts(mesh: &Mesh) -> FxHashMap<(u32, u32), u32> {
    let mut counts = FxHashMap::default();
    for &[a, b, c] in mesh.triangles() {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            *counts.entry(undirected(p, q)).or_insert(0) += 1;
        }
    }
    counts
}

/// Number of distinct undirected edges.
pub fn edge_count(mesh: &Mesh) -> usize {
    edge_use_counts(mesh).len()
}

/// Every edge borders exactly two triangles, which traverse it in opposite
/// directions (so orientation is consistent across the surface).
pub fn is_closed_manifold(mesh: &Mesh) -> bool {
    let mut directed: FxHashMap<(u32, u32), u32> = FxHashMap::default();
    for &[a, b, c] in mesh.triangles() {
        for edge in [(a, b), (b, c), (c, a)] {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }
    directed
        .iter()
        .all(|(&(a, b), &n)| n == 1 && directed.get(&(b, a)) == Some(&1))
}

/// `V - E + F`; 2 for any closed genus-0 surface.
///
/// Vertices no triangle references are not counted.
pub fn euler_characteristic(mesh: &Mesh) -> i64 {
    let mut used = vec![false; mesh.vertex_count()];
    for tri in mesh.triangles() {
        for &i in tri {
            used[i as usize] = true;
        }
    }
    let v = used.iter().filter(|&&u| u).count() as i64;
    let e = edge_count(mesh) as i64;
    let f = mesh.triangle_count() as i64;
    v - e + f
}

/// Smallest distance between two distinct vertex entries (`f64::INFINITY` for
/// fewer than two vertices). Quadratic; meant for tests and diagnostics.
pub fn min_vertex_separation(mesh: &Mesh) -> f64 {
    let vertices = mesh.vertices();
    let mut best = f64::INFINITY;
    for (i, a) in vertices.iter().enumerate() {
        for b in &vertices[i + 1..] {
            best = best.min(a.distance(*b));
        }
    }
    best
}

/// Whether the cross-product normal of `v0, v1, v2` points away from the origin.
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Every triangle winds counter-clockwise seen from outside.
pub fn all_wind_outward(mesh: &Mesh) -> bool {
    (0..mesh.triangle_count()).all(|t| {
        let [v0, v1, v2] = mesh.triangle_positions(t);
        triangle_winds_outward(v0, v1, v2)
    })
}

/// Smallest and largest vertex distance from the origin.
pub fn radius_range(mesh: &Mesh) -> (f64, f64) {
    mesh.vertices()
        .iter()
        .map(|v| v.length())
        .fold((f64::INFINITY, 0.0), |(lo, hi), r| (lo.min(r), hi.max(r)))
}
