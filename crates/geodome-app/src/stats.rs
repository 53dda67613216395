//! Stand-in mesh consumer: summarises what a renderer would receive.

use std::fmt;

use geodome_sphere::{MeshBuffers, MeshSink};
use glam::Vec3;
use tracing::info;

/// Rejections from [`StatsSink`].
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("mesh has no triangles")]
    Empty,
}

/// What the sink saw in the last mesh handed to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub index_bytes: usize,
    pub vertex_bytes: usize,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl MeshStats {
    fn from_buffers(buffers: &MeshBuffers) -> Self {
        let (min_radius, max_radius) = buffers
            .positions
            .iter()
            .map(|p| Vec3::from_array(*p).length())
            .fold((f32::INFINITY, 0.0_f32), |(lo, hi), r| (lo.min(r), hi.max(r)));
        Self {
            vertices: buffers.positions.len(),
            triangles: buffers.triangles.len(),
            vertex_bytes: std::mem::size_of_val(buffers.positions.as_slice()),
            index_bytes: std::mem::size_of_val(buffers.triangles.as_slice()),
            min_radius,
            max_radius,
        }
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices:  {}", self.vertices)?;
        writeln!(f, "triangles: {}", self.triangles)?;
        writeln!(
            f,
            "buffers:   {} B positions, {} B indices",
            self.vertex_bytes, self.index_bytes
        )?;
        write!(
            f,
            "radius:    {:.6} .. {:.6}",
            self.min_radius, self.max_radius
        )
    }
}

/// Records [`MeshStats`] for every mesh it accepts.
#[derive(Debug, Default)]
pub struct StatsSink {
    pub last: Option<MeshStats>,
}

impl MeshSink for StatsSink {
    type Error = SinkError;

    fn accept(&mut self, buffers: &MeshBuffers) -> Result<(), SinkError> {
        if buffers.triangles.is_empty() {
            return Err(SinkError::Empty);
        }
        let stats = MeshStats::from_buffers(buffers);
        info!(
            vertices = stats.vertices,
            triangles = stats.triangles,
            "mesh accepted"
        );
        self.last = Some(stats);
        Ok(())
    }
}
