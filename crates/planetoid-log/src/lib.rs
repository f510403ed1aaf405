//! Structured logging for planetoid runs.
//!
//! Console output goes through `tracing-subscriber`'s fmt layer with uptime
//! timestamps. When [`DebugConfig::json_log_dir`] is set, every event is also
//! written as one JSON object per line to `planetoid.log` in that directory,
//! which makes long growth runs easy to inspect afterwards.

use std::fs::File;
use std::path::{Path, PathBuf};

use planetoid_config::DebugConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file.
pub const LOG_FILE: &str = "planetoid.log";

/// Filter directives for a config: its `log_level`, or [`DEFAULT_FILTER`] when
/// that is blank.
pub fn filter_directives(config: Option<&DebugConfig>) -> String {
    match config {
        Some(debug) if !debug.log_level.trim().is_empty() => debug.log_level.trim().to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Build the active filter. `RUST_LOG` wins over the config.
pub fn env_filter(config: Option<&DebugConfig>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(config)))
}

/// Create the JSON log file inside `dir`, creating the directory if needed.
fn open_log_file(dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed (common in tests).
/// A JSON log directory that cannot be created is reported on the console
/// and otherwise ignored.
pub fn init_logging(config: Option<&DebugConfig>) -> bool {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console_layer);

    let Some(dir) = config.and_then(|debug| debug.json_log_dir.as_deref()) else {
        return subscriber.try_init().is_ok();
    };

    match open_log_file(dir) {
        Ok((path, file)) => {
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::uptime())
                .json();
            let installed = subscriber.with(file_layer).try_init().is_ok();
            if installed {
                tracing::debug!(path = %path.display(), "json logging enabled");
            }
            installed
        }
        Err(err) => {
            let installed = subscriber.try_init().is_ok();
            tracing::warn!(dir = %dir.display(), %err, "json log file unavailable");
            installed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_filter_without_config() {
        assert_eq!(filter_directives(None), "info");
    }

    #[test]
    fn test_blank_level_falls_back() {
        let debug = DebugConfig {
            log_level: "  ".to_string(),
            json_log_dir: None,
        };
        assert_eq!(filter_directives(Some(&debug)), DEFAULT_FILTER);
    }

    #[test]
    fn test_config_level_used() {
        let debug = DebugConfig {
            log_level: "warn,planetoid_terrain=trace".to_string(),
            json_log_dir: None,
        };
        let directives = filter_directives(Some(&debug));
        assert_eq!(directives, "warn,planetoid_terrain=trace");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_open_log_file_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("run");
        let (path, _file) = open_log_file(&nested).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), LOG_FILE);
    }

    #[test]
    fn test_json_layer_emits_fields() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .json(),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(vertices = 42_u64, "mesh built");
        });

        let bytes = captured.0.lock().unwrap().clone();
        let line = String::from_utf8(bytes).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["fields"]["message"], "mesh built");
        assert_eq!(value["fields"]["vertices"], 42);
        assert_eq!(value["level"], "INFO");
    }
}
