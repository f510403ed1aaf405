//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "planetoid.ron";

/// Platform config directory for planetoid (`~/.config/planetoid` on Linux).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("planetoid"))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Which sphere to tessellate.
    pub sphere: SphereConfig,
    /// Terrain growth settings.
    pub growth: GrowthConfig,
    /// Tick loop settings.
    pub run: RunConfig,
    /// Logging settings.
    pub debug: DebugConfig,
}

/// Tessellation scheme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ShapeKind {
    /// Latitude/longitude sphere.
    #[value(name = "uv")]
    UvSphere,
    /// Subdivided icosahedron.
    #[value(name = "ico")]
    Icosphere,
}

/// Sphere tessellation settings. Only the fields for the chosen `shape` are
/// used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    pub shape: ShapeKind,
    pub radius: f32,
    /// UV sphere longitude segments (at least 3).
    pub longitude_segments: u32,
    /// UV sphere latitude rings, poles excluded (at least 1).
    pub latitude_rings: u32,
    /// Icosphere subdivision passes.
    pub subdivisions: u32,
}

/// Which side of a cutting plane grows outward.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarveSide {
    /// Negative signed distance grows outward.
    #[default]
    OutwardBelow,
    /// Positive signed distance grows outward.
    OutwardAbove,
}

/// Terrain growth settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrowthConfig {
    /// RNG seed; the same seed reproduces the same terrain.
    pub seed: u64,
    /// Carving iterations before the floor clamp.
    pub iterations: u32,
    /// Iterations batched per tick.
    pub iterations_per_tick: u32,
    /// Starting displacement scale.
    pub initial_scale: f32,
    /// Per-iteration scale multiplier.
    pub decay: f32,
    /// Carving stops below this scale.
    pub min_scale: f32,
    /// Radial step per iteration at full scale.
    pub step: f32,
    /// Vertices this close to the plane are not moved.
    pub plane_epsilon: f32,
    /// Plane offset range, as a fraction of the radius.
    pub offset_range: f32,
    /// Sign convention.
    pub carve_side: CarveSide,
    /// Floor clamp settings.
    pub floor: FloorConfig,
}

/// Floor clamp settings, relative to the sphere radius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FloorConfig {
    pub ratio: f32,
    pub jitter: f32,
}

/// Tick loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Stop after this many ticks even if growth has not settled (0 = run
    /// until settled).
    pub max_ticks: u32,
    /// Re-sync normals and buffers every this many ticks.
    pub sync_interval_ticks: u32,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g., "debug", "info", "planetoid_terrain=trace").
    pub log_level: String,
    /// Directory for a JSON log file; `None` logs to the console only.
    pub json_log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::UvSphere,
            radius: 1.0,
            longitude_segments: 1200,
            latitude_rings: 600,
            subdivisions: 6,
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            iterations: 10_000,
            iterations_per_tick: 5,
            initial_scale: 1.0,
            decay: 0.9995,
            min_scale: 0.01,
            step: 0.0004,
            plane_epsilon: 0.0001,
            offset_range: 0.5,
            carve_side: CarveSide::OutwardBelow,
            floor: FloorConfig::default(),
        }
    }
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            ratio: 0.997,
            jitter: 0.001,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: 0,
            sync_interval_ticks: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_log_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `planetoid.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("shape: UvSphere"));
        assert!(ron_str.contains("longitude_segments: 1200"));
        assert!(ron_str.contains("iterations: 10000"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.sphere.shape = ShapeKind::Icosphere;
        config.growth.carve_side = CarveSide::OutwardAbove;
        config.debug.json_log_dir = Some(PathBuf::from("logs"));

        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(sphere: (shape: Icosphere, subdivisions: 4))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.sphere.shape, ShapeKind::Icosphere);
        assert_eq!(config.sphere.subdivisions, 4);
        assert_eq!(config.sphere.radius, 1.0);
        assert_eq!(config.growth, GrowthConfig::default());
    }

    #[test]
    fn test_nested_floor_override() {
        let ron_str = "(growth: (floor: (ratio: 0.9)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.growth.floor.ratio, 0.9);
        assert_eq!(config.growth.floor.jitter, 0.001);
        assert_eq!(config.growth.iterations, 10_000);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.sphere.radius = 2.5;
        config.growth.seed = 99;

        config.save(dir.path()).unwrap();
        assert!(dir.path().join(CONFIG_FILE).exists());
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.growth.iterations = 500;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.growth.iterations), Some(500));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_default_config_dir_is_namespaced() {
        if let Some(dir) = default_config_dir() {
            assert!(dir.ends_with("planetoid"));
        }
    }
}
