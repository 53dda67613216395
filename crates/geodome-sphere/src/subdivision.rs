//! Midpoint subdivision: every triangle becomes four, new points are projected
//! onto the sphere and merged with those already emitted by neighbouring triangles.
//!
//! ```text
//!            i1
//!           /  \
//!         i4----i6
//!         / \  / \
//!       i2---i5---i3
//! ```
//!
//! Children `(i1,i4,i6)`, `(i4,i2,i5)`, `(i5,i3,i6)`, `(i4,i5,i6)` keep the
//! parent's winding.

use tracing::{debug, warn};

use crate::GeodomeError;
use crate::dedup::{DedupPolicy, VertexTable};
use crate::mesh::{Mesh, MeshBuilder};
use crate::projection::{Projection, ProjectionMethod};
use crate::vector::midpoint;

/// Faces of the level-0 octahedron.
pub const BASE_TRIANGLE_COUNT: u64 = 8;

/// Deepest level whose vertex count still fits in `u32` indices.
pub const MAX_SUBDIVISION_LEVEL: u32 = 14;

/// Levels above this log a warning: work and memory grow as `4^level`.
pub const EXPONENTIAL_WARN_LEVEL: u32 = 8;

/// Number of refinement passes applied to the base octahedron.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubdivisionLevel(u32);

impl SubdivisionLevel {
    /// # Errors
    ///
    /// - [`GeodomeError::NegativeIterations`] for `iterations < 0`.
    /// - [`GeodomeError::TooManyVertices`] past [`MAX_SUBDIVISION_LEVEL`].
    pub fn new(iterations: i64) -> Result<Self, GeodomeError> {
        if iterations < 0 {
            return Err(GeodomeError::NegativeIterations(iterations));
        }
        let level = u32::try_from(iterations).unwrap_or(u32::MAX);
        Self::from_u32(level)
    }

    /// # Errors
    ///
    /// [`GeodomeError::TooManyVertices`] past [`MAX_SUBDIVISION_LEVEL`].
    pub fn from_u32(level: u32) -> Result<Self, GeodomeError> {
        if level > MAX_SUBDIVISION_LEVEL {
            return Err(GeodomeError::TooManyVertices(level));
        }
        Ok(Self(level))
    }

    /// Number of passes.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// `8 · 4^level`, or `None` on overflow.
pub fn expected_triangle_count(level: u32) -> Option<u64> {
    4u64.checked_pow(level)?.checked_mul(BASE_TRIANGLE_COUNT)
}

/// `4 · 4^level + 2`, from `V - E + F = 2` with `E = 3F / 2`.
pub fn expected_vertex_count(level: u32) -> Option<u64> {
    4u64.checked_pow(level)?.checked_mul(4)?.checked_add(2)
}

/// Applies refinement passes with a fixed projection and dedup policy.
///
/// The projection is any [`Projection`]; the configurable [`ProjectionMethod`]
/// is the default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubdivisionEngine<P = ProjectionMethod> {
    projection: P,
    dedup: DedupPolicy,
}

impl Default for SubdivisionEngine {
    fn default() -> Self {
        Self {
            projection: ProjectionMethod::default(),
            dedup: DedupPolicy::default(),
        }
    }
}

impl<P: Projection> SubdivisionEngine<P> {
    /// # Errors
    ///
    /// [`GeodomeError::InvalidEpsilon`] for an unusable dedup tolerance.
    pub fn new(projection: P, dedup: DedupPolicy) -> Result<Self, GeodomeError> {
        dedup.validate()?;
        Ok(Self { projection, dedup })
    }

    /// The projection applied to every new midpoint.
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// The policy used to merge coincident midpoints.
    pub fn dedup(&self) -> DedupPolicy {
        self.dedup
    }

    /// One pass: split every triangle of `mesh` into four.
    ///
    /// The input's vertices keep their indices; new midpoints are appended.
    pub fn refine(&self, mesh: Mesh) -> Result<Mesh, GeodomeError> {
        let (vertices, parents) = mesh.into_parts();
        let mut table = VertexTable::seeded(vertices, self.dedup)?;
        let mut triangles = Vec::with_capacity(parents.len() * 4);

        for [i1, i2, i3] in parents {
            let [v1, v2, v3] = [i1, i2, i3].map(|i| table.vertices()[i as usize]);

            let i4 = table.find_or_insert(self.projection.project(midpoint(v1, v2))?)?;
            let i5 = table.find_or_insert(self.projection.project(midpoint(v2, v3))?)?;
            let i6 = table.find_or_insert(self.projection.project(midpoint(v3, v1))?)?;

            triangles.push([i1, i4, i6]);
            triangles.push([i4, i2, i5]);
            triangles.push([i5, i3, i6]);
            triangles.push([i4, i5, i6]);
        }

        MeshBuilder::build(table.into_vertices(), triangles)
    }

    /// Apply [`SubdivisionEngine::refine`] `level` times, starting from `mesh`.
    pub fn refine_n(&self, mesh: Mesh, level: SubdivisionLevel) -> Result<Mesh, GeodomeError> {
        if level.get() > EXPONENTIAL_WARN_LEVEL {
            warn!(
                level = level.get(),
                triangles = expected_triangle_count(level.get()),
                "subdivision cost grows as 4^level"
            );
        }

        let mut mesh = mesh;
        for pass in 0..level.get() {
            debug!(
                pass,
                vertices = mesh.vertex_count(),
                faces = mesh.triangle_count(),
                "starting subdivision pass"
            );
            mesh = self.refine(mesh)?;
            debug!(
                pass,
                vertices = mesh.vertex_count(),
                faces = mesh.triangle_count(),
                "finished subdivision pass"
            );
        }
        Ok(mesh)
    }
}
