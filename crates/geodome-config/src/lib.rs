//! Configuration for the geodome tool.
//!
//! Settings persist to disk as a RON file, with CLI overrides via clap.
//! Every struct uses `#[serde(default)]` so partial files stay loadable.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, DedupArg, ProjectionArg, ScalingArg};
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig};
pub use error::ConfigError;
