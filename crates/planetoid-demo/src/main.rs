//! Headless planetoid growth run.
//!
//! Configuration is loaded from `planetoid.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p planetoid-demo -- --shape ico --subdivisions 5`.

mod harness;

use std::process::ExitCode;

use clap::Parser;
use planetoid_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let (mut config, load_error) = match config_dir.as_deref() {
        Some(dir) => match Config::load_or_create(dir) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err.to_string())),
        },
        None => (
            Config::default(),
            Some("no config directory available".to_string()),
        ),
    };
    config.apply_cli_overrides(&args);

    planetoid_log::init_logging(Some(&config.debug));
    if let Some(reason) = load_error {
        warn!(%reason, "using default config");
    }

    match harness::run(&config) {
        Ok((summary, sink)) => {
            let (min_radius, max_radius) = summary.radius_range.unwrap_or_default();
            info!(
                ticks = summary.ticks,
                phase = ?summary.phase,
                uploads = summary.uploads,
                bytes = sink.bytes_uploaded,
                min_radius,
                max_radius,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}
