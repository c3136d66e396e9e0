//! Error types for Burrow.

use thiserror::Error;

/// Top-level error type for Burrow operations.
#[derive(Debug, Error)]
pub enum BurrowError {
    /// Rejected configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// World generation could not complete
    #[error("Generation error: {0}")]
    Generation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration errors.
///
/// Raised before any generation work starts, so a bad configuration never
/// yields a partially built world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A world or grid dimension is zero
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension {
        /// Field name
        name: &'static str,
        /// Offending value
        value: u64,
    },

    /// World pixel size is smaller than one tile
    #[error("world of {world_px}px along {axis} holds no {tile_size}px tiles")]
    EmptyGrid {
        /// Axis name
        axis: &'static str,
        /// World size in pixels
        world_px: u32,
        /// Tile size in pixels
        tile_size: u32,
    },

    /// Noise scale is zero, negative, or not finite
    #[error("noise scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    /// No octaves requested
    #[error("noise octaves must be at least 1")]
    NoOctaves,

    /// More octaves than the noise generator supports
    #[error("noise octaves must be at most {max}, got {octaves}")]
    TooManyOctaves {
        /// Requested octaves
        octaves: u32,
        /// Largest accepted value
        max: u32,
    },

    /// Persistence is zero, negative, or not finite
    #[error("noise persistence must be a positive finite number, got {0}")]
    InvalidPersistence(f64),

    /// Lacunarity is zero, negative, or not finite
    #[error("noise lacunarity must be a positive finite number, got {0}")]
    InvalidLacunarity(f64),

    /// Fluid step interval of zero calls
    #[error("fluid update interval must be at least 1 call")]
    ZeroFluidInterval,
}

/// Result type alias for Burrow operations.
pub type BurrowResult<T> = Result<T, BurrowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: BurrowError = ConfigError::NoOctaves.into();
        assert!(matches!(err, BurrowError::Config(ConfigError::NoOctaves)));
        assert_eq!(
            err.to_string(),
            "Configuration error: noise octaves must be at least 1"
        );
    }

    #[test]
    fn test_dimension_message_names_field() {
        let err = ConfigError::NonPositiveDimension {
            name: "tile_size",
            value: 0,
        };
        assert_eq!(err.to_string(), "tile_size must be positive, got 0");
    }
}
