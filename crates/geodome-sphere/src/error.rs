//! Error types for geodesic sphere construction.

use thiserror::Error;

/// Broad category of a [`GeodomeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied parameter was rejected before any computation ran.
    InvalidParameter,
    /// A geometric operation hit an undefined case (zero-length vector, zero volume).
    DegenerateGeometry,
    /// A triangle referenced an invalid or repeated vertex index.
    IndexInvariantViolation,
}

/// Errors produced while building, refining or rescaling a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodomeError {
    /// Subdivision depth below zero.
    #[error("iteration count must be non-negative, got {0}")]
    NegativeIterations(i64),

    /// Subdivision depth whose output would not fit the `u32` index space.
    #[error("subdivision level {0} would exceed the u32 vertex index space")]
    TooManyVertices(u32),

    /// The vertex table ran out of `u32` indices.
    #[error("vertex table is full at {0} entries")]
    VertexTableFull(usize),

    /// Rescale target that is zero, negative or not finite.
    #[error("target volume must be finite and positive, got {0}")]
    NonPositiveTargetVolume(f64),

    /// Deduplication tolerance that is zero, negative or not finite.
    #[error("dedup epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),

    /// Attempted to normalize a vector too close to the origin.
    #[error("cannot normalize near-zero vector ({x}, {y}, {z})")]
    ZeroLengthVector { x: f64, y: f64, z: f64 },

    /// Attempted to rescale a mesh that encloses no volume.
    #[error("mesh volume is {0}, cannot rescale")]
    ZeroVolume(f64),

    /// A triangle references a vertex past the end of the vertex table.
    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A triangle uses the same vertex index more than once.
    #[error("triangle {triangle} repeats a vertex index: {indices:?}")]
    RepeatedIndex { triangle: usize, indices: [u32; 3] },

    /// A triangle has (near) zero area under the current positions.
    #[error("triangle {triangle} is degenerate (area {area:e})")]
    DegenerateTriangle { triangle: usize, area: f64 },
}

impl GeodomeError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeIterations(_)
            | Self::TooManyVertices(_)
            | Self::VertexTableFull(_)
            | Self::NonPositiveTargetVolume(_)
            | Self::InvalidEpsilon(_) => ErrorKind::InvalidParameter,
            Self::ZeroLengthVector { .. } | Self::ZeroVolume(_) => ErrorKind::DegenerateGeometry,
            Self::IndexOutOfRange { .. }
            | Self::RepeatedIndex { .. }
            | Self::DegenerateTriangle { .. } => ErrorKind::IndexInvariantViolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            GeodomeError::NegativeIterations(-1).kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            GeodomeError::ZeroVolume(0.0).kind(),
            ErrorKind::DegenerateGeometry
        );
        assert_eq!(
            GeodomeError::RepeatedIndex {
                triangle: 0,
                indices: [1, 1, 2]
            }
            .kind(),
            ErrorKind::IndexInvariantViolation
        );
    }

    #[test]
    fn test_display_mentions_values() {
        let err = GeodomeError::IndexOutOfRange {
            triangle: 4,
            index: 9,
            vertex_count: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains("triangle 4"));
        assert!(msg.contains("vertex 9"));
        assert!(msg.contains("6 vertices"));
    }
}
