//! `geodome`: build a geodesic sphere and report what a renderer would receive.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p geodome-app -- --iterations 5` to override the depth.

mod platform;
mod stats;

use clap::Parser;
use geodome_config::{CliArgs, Config};
use geodome_sphere::GeodesicSphere;
use tracing::{error, info};

use crate::platform::PlatformDirs;
use crate::stats::StatsSink;

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirs = PlatformDirs::resolve()?;
    if let Some(ref custom) = args.config {
        dirs.config_dir = custom.clone();
    }
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    geodome_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!(config_dir = %dirs.config_dir.display(), "configuration loaded");

    let sphere = GeodesicSphere::new(&config.sphere)?;
    let mut sink = StatsSink::default();
    sphere.build_into(&mut sink)?;

    if let Some(stats) = sink.last {
        println!("geodesic sphere, level {}", sphere.level().get());
        println!("{stats}");
    }
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        error!("{e}");
        eprintln!("geodome: {e}");
        std::process::exit(1);
    }
}
