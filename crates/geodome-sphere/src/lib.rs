//! Geodesic sphere generation: a regular octahedron repeatedly split by edge
//! midpoints, projected onto the unit sphere, with shared vertices merged.
//!
//! ```
//! let mesh = geodome_sphere::geodesic_sphere(2).unwrap();
//! assert_eq!(mesh.triangle_count(), 128);
//! ```

mod base;
mod dedup;
mod error;
mod mesh;
mod pipeline;
mod projection;
mod spherical;
mod subdivision;
pub mod topology;
mod vector;
mod volume;

pub use base::{OCTAHEDRON_TRIANGLES, OCTAHEDRON_VERTICES, octahedron};
pub use dedup::{DEFAULT_DEDUP_EPSILON, DedupPolicy, VertexTable};
pub use error::{ErrorKind, GeodomeError};
pub use mesh::{DEGENERATE_AREA_EPSILON, Mesh, MeshBuffers, MeshBuilder, MeshSink};
pub use pipeline::{BuildError, GeodesicSettings, GeodesicSphere, geodesic_sphere};
pub use projection::{Projection, ProjectionMethod, SphericalRoundTrip, UnitSphere};
pub use spherical::SphericalCoord;
pub use subdivision::{
    EXPONENTIAL_WARN_LEVEL, MAX_SUBDIVISION_LEVEL, SubdivisionEngine, SubdivisionLevel,
    expected_triangle_count, expected_vertex_count,
};
pub use vector::{NORMALIZE_EPSILON, midpoint, normalize_checked, to_f32};
pub use volume::{VolumeReport, VolumeScaling, rescale, signed_volume, sphere_volume, volume};
