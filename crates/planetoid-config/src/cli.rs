//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ShapeKind};

/// Planetoid command-line arguments.
///
/// CLI values override settings loaded from `planetoid.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "planetoid", about = "Grow asteroid-like terrain on a sphere")]
pub struct CliArgs {
    /// Tessellation scheme.
    #[arg(long, value_enum)]
    pub shape: Option<ShapeKind>,

    /// Sphere radius.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Icosphere subdivision passes.
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// UV sphere longitude segments.
    #[arg(long)]
    pub longitude_segments: Option<u32>,

    /// UV sphere latitude rings.
    #[arg(long)]
    pub latitude_rings: Option<u32>,

    /// RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Carving iterations before the floor clamp.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Stop after this many ticks (0 = until settled).
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(shape) = args.shape {
            self.sphere.shape = shape;
        }
        if let Some(radius) = args.radius {
            self.sphere.radius = radius;
        }
        if let Some(n) = args.subdivisions {
            self.sphere.subdivisions = n;
        }
        if let Some(n) = args.longitude_segments {
            self.sphere.longitude_segments = n;
        }
        if let Some(n) = args.latitude_rings {
            self.sphere.latitude_rings = n;
        }
        if let Some(seed) = args.seed {
            self.growth.seed = seed;
        }
        if let Some(n) = args.iterations {
            self.growth.iterations = n;
        }
        if let Some(ticks) = args.ticks {
            self.run.max_ticks = ticks;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            shape: Some(ShapeKind::Icosphere),
            subdivisions: Some(3),
            seed: Some(17),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.sphere.shape, ShapeKind::Icosphere);
        assert_eq!(config.sphere.subdivisions, 3);
        assert_eq!(config.growth.seed, 17);
        // Non-overridden fields retain defaults
        assert_eq!(config.sphere.radius, 1.0);
        assert_eq!(config.growth.iterations, 10_000);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "planetoid",
            "--shape",
            "ico",
            "--radius",
            "2.5",
            "--ticks",
            "40",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.shape, Some(ShapeKind::Icosphere));
        assert_eq!(args.radius, Some(2.5));
        assert_eq!(args.ticks, Some(40));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(CliArgs::try_parse_from(["planetoid", "--shape", "cube"]).is_err());
    }
}
