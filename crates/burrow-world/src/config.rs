//! World configuration.

use burrow_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::noise::NoiseParams;

/// Fluid simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    /// The fluid step runs once every `interval` update calls
    pub interval: u32,
    /// Half-width of the square window around the anchor, in tiles
    pub radius: u32,
    /// Seed for lateral-spill coin flips (None = entropy)
    pub coin_seed: Option<u64>,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            interval: 10,
            radius: 20,
            coin_seed: None,
        }
    }
}

/// Everything needed to build a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in pixels
    pub world_width: u32,
    /// World height in pixels
    pub world_height: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Generation chunk edge length in tiles
    pub chunk_size: u32,
    /// Base seed for the noise layers
    pub seed: u64,
    /// Seed for ore/hazard kind rolls (None = different every run)
    pub kind_roll_seed: Option<u64>,
    /// Noise shape shared by all layers
    pub noise: NoiseParams,
    /// Fluid simulation settings
    pub fluid: FluidConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: 1024,
            world_height: 2048,
            tile_size: 32,
            chunk_size: 16,
            seed: fastrand::u64(0..10_000),
            kind_roll_seed: None,
            noise: NoiseParams::default(),
            fluid: FluidConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Default configuration with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Same configuration with fully reproducible generation and flow.
    #[must_use]
    pub fn deterministic(mut self, roll_seed: u64) -> Self {
        self.kind_roll_seed = Some(roll_seed);
        self.fluid.coin_seed = Some(roll_seed.wrapping_add(1));
        self
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn tile_width(&self) -> u32 {
        if self.tile_size == 0 {
            return 0;
        }
        self.world_width / self.tile_size
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn tile_height(&self) -> u32 {
        if self.tile_size == 0 {
            return 0;
        }
        self.world_height / self.tile_size
    }

    /// Rejects configurations that cannot produce a world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("tile_size", self.tile_size),
            ("chunk_size", self.chunk_size),
        ];
        for (name, value) in dims {
            if value == 0 {
                return Err(ConfigError::NonPositiveDimension {
                    name,
                    value: u64::from(value),
                });
            }
        }

        if self.tile_width() == 0 {
            return Err(ConfigError::EmptyGrid {
                axis: "x",
                world_px: self.world_width,
                tile_size: self.tile_size,
            });
        }
        if self.tile_height() == 0 {
            return Err(ConfigError::EmptyGrid {
                axis: "y",
                world_px: self.world_height,
                tile_size: self.tile_size,
            });
        }

        self.noise.validate()?;

        if self.fluid.interval == 0 {
            return Err(ConfigError::ZeroFluidInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let config = WorldConfig::with_seed(1);
        assert_eq!(config.tile_width(), 32);
        assert_eq!(config.tile_height(), 64);
        assert_eq!(config.seed, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_seed_in_range() {
        assert!(WorldConfig::default().seed < 10_000);
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let config = WorldConfig {
            tile_size: 0,
            ..WorldConfig::with_seed(1)
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension {
                name: "tile_size",
                value: 0
            })
        );
    }

    #[test]
    fn test_world_smaller_than_tile_rejected() {
        let config = WorldConfig {
            world_width: 16,
            ..WorldConfig::with_seed(1)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { axis: "x", .. })
        ));
    }

    #[test]
    fn test_bad_noise_rejected() {
        let mut config = WorldConfig::with_seed(1);
        config.noise.persistence = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPersistence(_))
        ));
    }

    #[test]
    fn test_zero_fluid_interval_rejected() {
        let mut config = WorldConfig::with_seed(1);
        config.fluid.interval = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFluidInterval));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: WorldConfig = toml::from_str(
            r#"
            seed = 42
            kind_roll_seed = 7

            [noise]
            octaves = 2
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.seed, 42);
        assert_eq!(config.kind_roll_seed, Some(7));
        assert_eq!(config.noise.octaves, 2);
        assert_eq!(config.noise.scale, 50.0);
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.fluid.interval, 10);
    }
}
