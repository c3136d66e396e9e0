//! # Burrow World
//!
//! The tile world of Burrow.
//!
//! This crate handles:
//! - Seeded multi-octave value noise
//! - Tile kinds and their static properties
//! - Chunked procedural terrain generation
//! - Pixel-addressed world queries and digging
//! - Windowed cellular fluid flow

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod chunk;
pub mod config;
pub mod fluid;
pub mod generation;
pub mod grid;
pub mod noise;
pub mod rolls;
pub mod tile;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::chunk::*;
    pub use crate::config::*;
    pub use crate::fluid::FluidSimulator;
    pub use crate::generation::*;
    pub use crate::grid::*;
    pub use crate::noise::*;
    pub use crate::rolls::*;
    pub use crate::tile::*;
    pub use crate::world::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_common::PixelPos;

    #[test]
    fn test_generate_dig_and_flow() {
        let config = WorldConfig::with_seed(42).deterministic(7);
        let mut world = TerrainGenerator::new(config)
            .and_then(|g| g.generate())
            .expect("valid config");

        // Crust row 5 is dirt in every seed; one strong swing mines it
        let (x, y) = (5.0 * 32.0 + 4.0, 5.0 * 32.0 + 4.0);
        assert_eq!(world.get_tile_at(x, y), TileKind::Dirt);
        match world.dig_tile_at(x, y, 10.0) {
            Some(DigOutcome::Collected(resource)) => assert_eq!(resource.kind, TileKind::Dirt),
            other => panic!("unexpected dig outcome: {other:?}"),
        }
        assert_eq!(world.get_tile_at(x, y), TileKind::Air);

        let fluids_before: usize = TileKind::FLUIDS.iter().map(|&k| world.grid().count(k)).sum();
        let anchor = PixelPos::new(16.0 * 32.0, 40.0 * 32.0);
        for _ in 0..50 {
            world.update(1.0 / 60.0, anchor);
        }
        let fluids_after: usize = TileKind::FLUIDS.iter().map(|&k| world.grid().count(k)).sum();
        assert_eq!(fluids_before, fluids_after);
        assert_eq!(world.get_tile_at(0.0, 0.0), TileKind::Boundary);
    }
}
