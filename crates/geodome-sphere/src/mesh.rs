//! Indexed triangle mesh and its validating builder.
//!
//! Vertices live in an arena addressed by `u32` index. Triangles only store
//! indices, so the vertex table can grow between passes without invalidating
//! anything already emitted.

use glam::DVec3;

use crate::GeodomeError;
use crate::vector::to_f32;

/// Triangles are rejected as degenerate when `|e1 × e2| <= ε · |e1| · |e2|`.
///
/// The bound is on the sine of the corner angle, so it does not depend on the
/// mesh's scale: a uniformly shrunk sphere stays valid.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-14;

/// Immutable indexed triangle mesh.
///
/// Built through [`MeshBuilder::build`], so every `Mesh` satisfies the
/// index invariants: indices in range, pairwise distinct, non-zero area.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Wrap constant data already known to satisfy the invariants.
    pub(crate) fn from_trusted_parts(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Vertex positions; the slice index is the vertex id.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Triangles as index triples into [`Mesh::vertices`].
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of vertices in the table.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Position of vertex `index`.
    pub fn position(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// The three corner positions of triangle `t`.
    pub fn triangle_positions(&self, t: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[t];
        [self.position(a), self.position(b), self.position(c)]
    }

    /// Copy the mesh into the `f32` layout consumed by renderers.
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers {
            positions: self.vertices.iter().copied().map(to_f32).collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Give back the vertex table and triangle list.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        (self.vertices, self.triangles)
    }

    /// Apply `f` to every vertex, keeping the triangle list.
    ///
    /// Re-runs validation, since a transform can collapse triangles.
    pub fn map_vertices(&self, f: impl Fn(DVec3) -> DVec3) -> Result<Mesh, GeodomeError> {
        let vertices = self.vertices.iter().copied().map(f).collect();
        MeshBuilder::build(vertices, self.triangles.clone())
    }
}

/// Assembles a [`Mesh`] from raw parts, checking the index invariants.
pub struct MeshBuilder;

impl MeshBuilder {
    /// Validate and wrap `vertices` / `triangles`.
    ///
    /// # Errors
    ///
    /// - [`GeodomeError::IndexOutOfRange`] if an index is `>= vertices.len()`.
    /// - [`GeodomeError::RepeatedIndex`] if a triangle uses a vertex twice.
    /// - [`GeodomeError::DegenerateTriangle`] if a triangle has (near) zero area.
    pub fn build(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Result<Mesh, GeodomeError> {
        for (t, &indices) in triangles.iter().enumerate() {
            for &index in &indices {
                if index as usize >= vertices.len() {
                    return Err(GeodomeError::IndexOutOfRange {
                        triangle: t,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }

            let [a, b, c] = indices;
            if a == b || b == c || a == c {
                return Err(GeodomeError::RepeatedIndex {
                    triangle: t,
                    indices,
                });
            }

            let (pa, pb, pc) = (
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
            );
            let (e1, e2) = (pb - pa, pc - pa);
            let doubled = e1.cross(e2).length();
            if doubled.is_nan() || doubled <= DEGENERATE_AREA_EPSILON * e1.length() * e2.length()
            {
                let area = 0.5 * doubled;
                return Err(GeodomeError::DegenerateTriangle { triangle: t, area });
            }
        }

        Ok(Mesh {
            vertices,
            triangles,
        })
    }
}

/// `f32` vertex positions plus triangle indices, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions, indexed by the triangle entries.
    pub positions: Vec<[f32; 3]>,
    /// Counter-clockwise index triples into `positions`.
    pub triangles: Vec<[u32; 3]>,
}

impl MeshBuffers {
    /// Triangle indices flattened to a single index buffer.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// Receiver of a finished mesh: the rendering side that computes normals and uploads.
pub trait MeshSink {
    /// Why the consumer refused the mesh.
    type Error;

    /// Take a finished mesh. Called once per build.
    fn accept(&mut self, buffers: &MeshBuffers) -> Result<(), Self::Error>;
}
