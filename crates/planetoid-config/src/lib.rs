//! Configuration for planetoid growth runs.
//!
//! Settings persist to disk as a RON file, accept CLI overrides via clap, and
//! support hot-reload detection. Every section uses `#[serde(default)]`, so
//! old files keep loading as fields are added.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, CarveSide, Config, DebugConfig, FloorConfig, GrowthConfig, RunConfig, ShapeKind,
    SphereConfig, default_config_dir,
};
pub use error::ConfigError;
