//! Command-line argument parsing for geodome.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use geodome_sphere::{DEFAULT_DEDUP_EPSILON, DedupPolicy, ProjectionMethod, VolumeScaling};

use crate::Config;

/// Vertex merge policy as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DedupArg {
    Exact,
    Tolerance,
    SpatialHash,
    None,
}

/// Projection method as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProjectionArg {
    Radial,
    Spherical,
}

/// Volume scaling rule as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScalingArg {
    CubeRoot,
    SquareRoot,
}

/// geodome command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "geodome", about = "Generate a geodesic sphere mesh")]
pub struct CliArgs {
    /// Subdivision depth (cost grows as 4^n).
    #[arg(long, short = 'n')]
    pub iterations: Option<u32>,

    /// Vertex deduplication policy.
    #[arg(long, value_enum)]
    pub dedup: Option<DedupArg>,

    /// Merge distance for tolerance and spatial-hash dedup.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Midpoint projection method.
    #[arg(long, value_enum)]
    pub projection: Option<ProjectionArg>,

    /// Rescale the mesh to enclose this volume.
    #[arg(long)]
    pub target_volume: Option<f64>,

    /// Rule for the rescale factor.
    #[arg(long, value_enum)]
    pub volume_scaling: Option<ScalingArg>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn current_epsilon(policy: DedupPolicy) -> f64 {
    match policy {
        DedupPolicy::Tolerance { epsilon } | DedupPolicy::SpatialHash { epsilon } => epsilon,
        DedupPolicy::Exact | DedupPolicy::None => DEFAULT_DEDUP_EPSILON,
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let sphere = &mut self.sphere;
        if let Some(n) = args.iterations {
            sphere.iterations = n;
        }

        if args.dedup.is_some() || args.epsilon.is_some() {
            let epsilon = args.epsilon.unwrap_or(current_epsilon(sphere.dedup));
            sphere.dedup = match (args.dedup, sphere.dedup) {
                (Some(DedupArg::Exact), _) => DedupPolicy::Exact,
                (Some(DedupArg::Tolerance), _) => DedupPolicy::Tolerance { epsilon },
                (Some(DedupArg::SpatialHash), _) => DedupPolicy::SpatialHash { epsilon },
                (Some(DedupArg::None), _) => DedupPolicy::None,
                // A bare --epsilon retunes whichever tolerance policy is configured.
                (None, DedupPolicy::SpatialHash { .. }) => DedupPolicy::SpatialHash { epsilon },
                (None, DedupPolicy::Tolerance { .. }) => DedupPolicy::Tolerance { epsilon },
                (None, other) => other,
            };
        }

        if let Some(p) = args.projection {
            sphere.projection = match p {
                ProjectionArg::Radial => ProjectionMethod::Radial,
                ProjectionArg::Spherical => ProjectionMethod::Spherical,
            };
        }
        if let Some(v) = args.target_volume {
            sphere.target_volume = Some(v);
        }
        if let Some(s) = args.volume_scaling {
            sphere.volume_scaling = match s {
                ScalingArg::CubeRoot => VolumeScaling::CubeRoot,
                ScalingArg::SquareRoot => VolumeScaling::SquareRoot,
            };
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
