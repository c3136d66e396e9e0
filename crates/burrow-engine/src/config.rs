//! Engine configuration.
//!
//! Wraps the world configuration with settings for a headless session.
//! Configuration can be loaded from and saved to a TOML file.

use burrow_world::WorldConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "burrow.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Session Settings ===
    /// Number of game-loop ticks to simulate
    pub ticks: u32,
    /// Simulated ticks per second (sets the delta time passed to updates)
    pub tick_rate: u32,
    /// Carve a cavern holding a driller part after generation
    pub place_driller: bool,
    /// Print the final grid as text
    pub print_map: bool,
    /// Default log filter directive (overridden by `RUST_LOG`)
    pub log_filter: String,

    // === World Settings ===
    /// World generation and simulation settings
    pub world: WorldConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_rate: 60,
            place_driller: true,
            print_map: false,
            log_filter: "burrow=info".to_string(),
            world: WorldConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp session values to sensible ranges.
    ///
    /// World settings are not clamped; invalid ones are rejected when the
    /// world is generated.
    pub fn validate(&mut self) {
        self.ticks = self.ticks.min(1_000_000);
        self.tick_rate = self.tick_rate.clamp(1, 1000);
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
    }

    /// Delta time passed to each world update, in seconds.
    #[must_use]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.ticks, 600);
        assert_eq!(config.tick_rate, 60);
        assert!(config.place_driller);
        assert_eq!(config.world.tile_size, 32);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();
        config.tick_rate = 0;
        config.ticks = u32::MAX;
        config.log_filter = "  ".to_string();

        config.validate();

        assert_eq!(config.tick_rate, 1);
        assert_eq!(config.ticks, 1_000_000);
        assert_eq!(config.log_filter, "burrow=info");
        assert!((config.tick_dt() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("burrow.toml");

        let mut config = EngineConfig::default();
        config.ticks = 42;
        config.print_map = true;
        config.world.seed = 12345;
        config.world.kind_roll_seed = Some(9);

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded.ticks, 42);
        assert!(loaded.print_map);
        assert_eq!(loaded.world.seed, 12345);
        assert_eq!(loaded.world.kind_roll_seed, Some(9));
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/burrow.toml");
        assert_eq!(config.tick_rate, 60);
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "ticks = \"many\"").expect("Failed to write");

        let config = EngineConfig::load_from(&config_path);
        assert_eq!(config.ticks, 600);
    }

    #[test]
    fn test_partial_world_section() {
        let config: EngineConfig =
            toml::from_str("ticks = 5\n[world]\nseed = 77\n[world.fluid]\nradius = 4\n")
                .expect("Failed to parse");
        assert_eq!(config.ticks, 5);
        assert_eq!(config.world.seed, 77);
        assert_eq!(config.world.fluid.radius, 4);
        assert_eq!(config.world.fluid.interval, 10);
        assert_eq!(config.world.chunk_size, 16);
    }
}
