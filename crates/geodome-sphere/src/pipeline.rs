//! End-to-end construction: octahedron, refinement passes, optional volume
//! rescale, validated mesh.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::GeodomeError;
use crate::base::octahedron;
use crate::dedup::DedupPolicy;
use crate::mesh::{Mesh, MeshSink};
use crate::projection::ProjectionMethod;
use crate::subdivision::{SubdivisionEngine, SubdivisionLevel};
use crate::volume::{VolumeReport, VolumeScaling, rescale};

/// Everything that parameterises one build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeodesicSettings {
    /// Number of subdivision passes. Cost grows as `4^iterations`.
    pub iterations: u32,
    /// How edge midpoints are mapped onto the sphere.
    pub projection: ProjectionMethod,
    /// How coincident midpoints are merged.
    pub dedup: DedupPolicy,
    /// Rescale the finished mesh to enclose this volume.
    pub target_volume: Option<f64>,
    /// Factor rule used when `target_volume` is set.
    pub volume_scaling: VolumeScaling,
}

impl Default for GeodesicSettings {
    fn default() -> Self {
        Self {
            iterations: 3,
            projection: ProjectionMethod::default(),
            dedup: DedupPolicy::default(),
            target_volume: None,
            volume_scaling: VolumeScaling::default(),
        }
    }
}

/// Errors from [`GeodesicSphere::build_into`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Geometry(#[from] GeodomeError),
    #[error("mesh sink rejected the mesh: {0}")]
    Sink(#[source] E),
}

/// A validated build plan for one geodesic sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodesicSphere {
    level: SubdivisionLevel,
    engine: SubdivisionEngine,
    target_volume: Option<f64>,
    volume_scaling: VolumeScaling,
}

impl GeodesicSphere {
    /// Check `settings` up front so a bad parameter fails before any work.
    pub fn new(settings: &GeodesicSettings) -> Result<Self, GeodomeError> {
        let level = SubdivisionLevel::from_u32(settings.iterations)?;
        let engine = SubdivisionEngine::new(settings.projection, settings.dedup)?;
        if let Some(target) = settings.target_volume
            && !(target.is_finite() && target > 0.0)
        {
            return Err(GeodomeError::NonPositiveTargetVolume(target));
        }
        if !settings.dedup.merges() {
            warn!("deduplication disabled: shared edges will carry duplicate vertices");
        }

        Ok(Self {
            level,
            engine,
            target_volume: settings.target_volume,
            volume_scaling: settings.volume_scaling,
        })
    }

    /// Number of refinement passes this build applies.
    pub fn level(&self) -> SubdivisionLevel {
        self.level
    }

    /// Run the pipeline and return the finished mesh.
    pub fn build(&self) -> Result<Mesh, GeodomeError> {
        let mesh = self.engine.refine_n(octahedron(), self.level)?;

        let report = VolumeReport::new(&mesh);
        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.triangle_count(),
            volume = report.volume,
            sphere_volume = report.sphere_volume,
            "dome volume is {:.4}% of the circumscribing sphere",
            report.percent()
        );

        match self.target_volume {
            Some(target) => {
                let scaled = rescale(&mesh, target, self.volume_scaling)?;
                info!(
                    before = report.volume,
                    after = VolumeReport::new(&scaled).volume,
                    target,
                    "rescaled mesh volume"
                );
                Ok(scaled)
            }
            None => Ok(mesh),
        }
    }

    /// Build and hand the buffers to `sink`. The finished mesh is returned too.
    pub fn build_into<S>(&self, sink: &mut S) -> Result<Mesh, BuildError<S::Error>>
    where
        S: MeshSink,
        S::Error: std::error::Error + 'static,
    {
        let mesh = self.build()?;
        sink.accept(&mesh.to_buffers()).map_err(BuildError::Sink)?;
        Ok(mesh)
    }
}

/// Build a geodesic sphere with default settings at the given depth.
pub fn geodesic_sphere(iterations: u32) -> Result<Mesh, GeodomeError> {
    GeodesicSphere::new(&GeodesicSettings {
        iterations,
        ..GeodesicSettings::default()
    })?
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuffers;
    use crate::volume::volume;

    #[derive(Debug, thiserror::Error)]
    #[error("sink is full")]
    struct SinkFull;

    #[derive(Default)]
    struct Recorder {
        received: Vec<MeshBuffers>,
        reject: bool,
    }

    impl MeshSink for Recorder {
        type Error = SinkFull;

        fn accept(&mut self, buffers: &MeshBuffers) -> Result<(), SinkFull> {
            if self.reject {
                return Err(SinkFull);
            }
            self.received.push(buffers.clone());
            Ok(())
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = GeodesicSettings::default();
        assert_eq!(settings.iterations, 3);
        assert_eq!(settings.projection, ProjectionMethod::Radial);
        assert_eq!(settings.dedup, DedupPolicy::default());
        assert_eq!(settings.target_volume, None);
        assert_eq!(settings.volume_scaling, VolumeScaling::CubeRoot);
    }

    #[test]
    fn test_settings_reject_bad_target_before_building() {
        let settings = GeodesicSettings {
            target_volume: Some(-2.0),
            ..Default::default()
        };
        assert_eq!(
            GeodesicSphere::new(&settings),
            Err(GeodomeError::NonPositiveTargetVolume(-2.0))
        );
    }

    #[test]
    fn test_settings_reject_bad_epsilon() {
        let settings = GeodesicSettings {
            dedup: DedupPolicy::SpatialHash { epsilon: 0.0 },
            ..Default::default()
        };
        assert!(GeodesicSphere::new(&settings).is_err());
    }

    #[test]
    fn test_settings_reject_huge_level() {
        let settings = GeodesicSettings {
            iterations: 30,
            ..Default::default()
        };
        assert_eq!(
            GeodesicSphere::new(&settings),
            Err(GeodomeError::TooManyVertices(30))
        );
    }

    #[test]
    fn test_geodesic_sphere_counts() {
        let mesh = geodesic_sphere(2).unwrap();
        assert_eq!(mesh.triangle_count(), 128);
        assert_eq!(mesh.vertex_count(), 66);
    }

    #[test]
    fn test_build_with_target_volume() {
        let settings = GeodesicSettings {
            iterations: 2,
            target_volume: Some(1.0),
            ..Default::default()
        };
        let mesh = GeodesicSphere::new(&settings).unwrap().build().unwrap();
        assert!((volume(&mesh) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_into_hands_buffers_to_sink() {
        let sphere = GeodesicSphere::new(&GeodesicSettings {
            iterations: 1,
            ..Default::default()
        })
        .unwrap();
        let mut sink = Recorder::default();
        let mesh = sphere.build_into(&mut sink).unwrap();
        assert_eq!(sink.received.len(), 1);
        assert_eq!(sink.received[0].positions.len(), mesh.vertex_count());
        assert_eq!(sink.received[0].triangles, mesh.triangles());
    }

    #[test]
    fn test_build_into_reports_sink_failure() {
        let sphere = GeodesicSphere::new(&GeodesicSettings::default()).unwrap();
        let mut sink = Recorder {
            reject: true,
            ..Default::default()
        };
        let err = sphere.build_into(&mut sink).unwrap_err();
        assert!(matches!(err, BuildError::Sink(SinkFull)));
    }

    #[test]
    fn test_settings_ron_round_trip() {
        let settings = GeodesicSettings {
            iterations: 4,
            projection: ProjectionMethod::Spherical,
            dedup: DedupPolicy::SpatialHash { epsilon: 1e-6 },
            target_volume: Some(4.0),
            volume_scaling: VolumeScaling::SquareRoot,
        };
        let text = ron::to_string(&settings).unwrap();
        let back: GeodesicSettings = ron::from_str(&text).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: GeodesicSettings = ron::from_str("(iterations: 5)").unwrap();
        assert_eq!(settings.iterations, 5);
        assert_eq!(settings.dedup, DedupPolicy::default());
    }
}
