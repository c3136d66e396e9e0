//! Procedural world generation.
//!
//! Four noise layers drive generation: terrain, caves, ore, and special
//! features. All four share one shape and are decorrelated by seed offsets
//! and scale divisors. Cells are filled chunk by chunk from the surface down:
//!
//! - rows 0-2 are open air and rows 3-7 a dirt crust;
//! - below that, strong cave noise carves air (from row 16 down);
//! - otherwise a depth band picks dirt, stone, hard stone, or dark stone;
//! - strong ore noise swaps in an ore whose kind is rolled per tier;
//! - very strong special noise swaps in hazards, crystals, or alien matter.
//!
//! Noise decides *where* ores and features go. The *kind* picked at a
//! qualifying cell comes from a [`RollSource`], which is entropy-seeded
//! unless `kind_roll_seed` is configured. Finally the side walls and floor
//! are stamped with `boundary`.

use std::thread;

use burrow_common::{BurrowError, BurrowResult, ChunkCoord, ConfigError};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use tracing::{debug, info};

use crate::chunk::{Chunk, ChunkLayout};
use crate::config::WorldConfig;
use crate::grid::TileGrid;
use crate::noise::{NoiseField, NoiseParams};
use crate::rolls::{rng_from, RollSource};
use crate::tile::TileKind;
use crate::world::WorldGrid;

/// Seed offset of the cave layer.
pub const CAVE_SEED_OFFSET: u64 = 1000;
/// Seed offset of the ore layer.
pub const ORE_SEED_OFFSET: u64 = 2000;
/// Seed offset of the special-feature layer.
pub const SPECIAL_SEED_OFFSET: u64 = 3000;

/// Rows above this are open air.
const SURFACE_AIR_ROWS: u32 = 3;
/// Rows above this (and below the air) are dirt crust.
const CRUST_END_ROW: u32 = 8;

const CAVE_THRESHOLD: f64 = 0.7;
const CAVE_MIN_ROW: u32 = 15;

const ORE_THRESHOLD: f64 = 0.8;

const SPECIAL_THRESHOLD: f64 = 0.93;
const SPECIAL_MIN_ROW: u32 = 20;
const HAZARD_THRESHOLD: f64 = 0.97;
const ALIEN_THRESHOLD: f64 = 0.95;
const ALIEN_MIN_ROW: u32 = 30;

/// The four noise layers, computed once per generation and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseLayers {
    /// Base terrain layer
    pub terrain: NoiseField,
    /// Cave carving layer (half scale)
    pub cave: NoiseField,
    /// Ore placement layer (quarter scale)
    pub ore: NoiseField,
    /// Special feature layer (third scale)
    pub special: NoiseField,
}

impl NoiseLayers {
    /// Computes all four layers over a `width` x `height` grid.
    pub fn compute(
        width: u32,
        height: u32,
        params: &NoiseParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let layer = |divisor: f64, offset: u64| {
            NoiseField::generate(
                width,
                height,
                &params.with_scale_divided(divisor),
                seed.wrapping_add(offset),
            )
        };
        let layers = Self {
            terrain: layer(1.0, 0)?,
            cave: layer(2.0, CAVE_SEED_OFFSET)?,
            ore: layer(4.0, ORE_SEED_OFFSET)?,
            special: layer(3.0, SPECIAL_SEED_OFFSET)?,
        };
        debug!(
            width,
            height,
            terrain_mean = layers.terrain.mean(),
            cave_mean = layers.cave.mean(),
            "noise layers computed"
        );
        Ok(layers)
    }

    /// The per-cell samples used by the placement rules.
    #[must_use]
    pub fn sample(&self, x: u32, y: u32) -> CellNoise {
        CellNoise {
            cave: self.cave.get(x, y).unwrap_or(0.0),
            ore: self.ore.get(x, y).unwrap_or(0.0),
            special: self.special.get(x, y).unwrap_or(0.0),
        }
    }
}

/// Noise samples at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellNoise {
    /// Cave layer value
    pub cave: f64,
    /// Ore layer value
    pub ore: f64,
    /// Special layer value
    pub special: f64,
}

/// Base material for a row below the crust.
#[must_use]
pub const fn depth_band(y: u32) -> TileKind {
    if y > 50 {
        TileKind::DarkStone
    } else if y > 30 {
        TileKind::HardStone
    } else if y > 15 {
        TileKind::Stone
    } else {
        TileKind::Dirt
    }
}

/// Ore kind for a cell whose ore noise passed the threshold.
///
/// Deeper tiers need stronger noise. Returns `None` when no tier applies;
/// a roll is drawn only when one does.
fn roll_ore<R: RollSource + ?Sized>(y: u32, ore: f64, rolls: &mut R) -> Option<TileKind> {
    if y > 45 && ore > 0.92 {
        let roll = rolls.roll();
        Some(if roll < 0.3 {
            TileKind::UraniumOre
        } else if roll < 0.6 {
            TileKind::AlienOre
        } else {
            TileKind::GemOre
        })
    } else if y > 25 && ore > 0.85 {
        let roll = rolls.roll();
        Some(if roll < 0.4 {
            TileKind::IronOre
        } else if roll < 0.7 {
            TileKind::SilverOre
        } else {
            TileKind::GoldOre
        })
    } else if y > 10 && ore > ORE_THRESHOLD {
        let roll = rolls.roll();
        Some(if roll < 0.6 {
            TileKind::Coal
        } else {
            TileKind::CopperOre
        })
    } else {
        None
    }
}

/// Feature kind for a cell whose special noise passed the threshold.
///
/// Each candidate is gated on both the roll and a minimum row; a failed gate
/// falls through to the next candidate. The hazard chain always ends in
/// rock. The alien chain can end with nothing, leaving the cell as it was.
fn roll_special<R: RollSource + ?Sized>(
    y: u32,
    special: f64,
    rolls: &mut R,
) -> Option<TileKind> {
    if special > HAZARD_THRESHOLD {
        let roll = rolls.roll();
        Some(if roll < 0.3 && y > 35 {
            TileKind::Lava
        } else if roll < 0.6 && y > 15 {
            TileKind::Gas
        } else if roll < 0.9 && y > 25 {
            TileKind::Water
        } else {
            TileKind::Rock
        })
    } else if special > ALIEN_THRESHOLD && y > ALIEN_MIN_ROW {
        let roll = rolls.roll();
        if roll < 0.3 && y > 40 {
            Some(TileKind::AlienRock)
        } else if roll < 0.5 && y > 35 {
            Some(TileKind::AlienNest)
        } else if roll < 0.7 && y > 30 {
            Some(TileKind::Crystal)
        } else if roll < 0.9 && y > 45 {
            Some(TileKind::VoidCrystal)
        } else if y > 50 {
            Some(TileKind::AlienCrystal)
        } else {
            None
        }
    } else {
        None
    }
}

/// Tile kind for the cell in row `y` given its noise samples.
pub fn cell_kind<R: RollSource + ?Sized>(y: u32, noise: CellNoise, rolls: &mut R) -> TileKind {
    if y < SURFACE_AIR_ROWS {
        return TileKind::Air;
    }
    if y < CRUST_END_ROW {
        return TileKind::Dirt;
    }
    if noise.cave > CAVE_THRESHOLD && y > CAVE_MIN_ROW {
        return TileKind::Air;
    }

    let mut kind = depth_band(y);

    if noise.ore > ORE_THRESHOLD {
        if let Some(ore) = roll_ore(y, noise.ore, rolls) {
            kind = ore;
        }
    }

    if noise.special > SPECIAL_THRESHOLD && y > SPECIAL_MIN_ROW {
        if let Some(feature) = roll_special(y, noise.special, rolls) {
            kind = feature;
        }
    }

    kind
}

/// Builds worlds from a validated configuration.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: WorldConfig,
}

impl TerrainGenerator {
    /// Creates a generator, rejecting invalid configurations up front.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// One-shot generation from world pixel dimensions, tile size, noise
    /// shape, and seed. Kind rolls are entropy-seeded.
    pub fn generate_world(
        world_width: u32,
        world_height: u32,
        tile_size: u32,
        noise: NoiseParams,
        seed: u64,
    ) -> Result<WorldGrid, ConfigError> {
        Self::new(WorldConfig {
            world_width,
            world_height,
            tile_size,
            noise,
            ..WorldConfig::with_seed(seed)
        })?
        .generate()
    }

    /// Generates a world, rolling kinds from the configured source.
    pub fn generate(&self) -> Result<WorldGrid, ConfigError> {
        let mut rolls = rng_from(self.config.kind_roll_seed);
        self.generate_with(&mut rolls)
    }

    /// Generates a world, rolling kinds from `rolls`.
    pub fn generate_with<R: RollSource + ?Sized>(
        &self,
        rolls: &mut R,
    ) -> Result<WorldGrid, ConfigError> {
        let width = self.config.tile_width();
        let height = self.config.tile_height();
        let layout = ChunkLayout::new(width, height, self.config.chunk_size);

        info!(
            width,
            height,
            chunks_x = layout.chunks_x(),
            chunks_y = layout.chunks_y(),
            seed = self.config.seed,
            "generating world"
        );

        let layers = NoiseLayers::compute(width, height, &self.config.noise, self.config.seed)?;

        let mut grid = TileGrid::new(width, height, TileKind::Air);
        for coord in layout.coords() {
            let chunk = Self::generate_chunk(&layers, &layout, coord, rolls);
            chunk.write_into(&mut grid);
            let placed = chunk.coord();
            debug!(x = placed.x, y = placed.y, "chunk generated");
        }
        grid.stamp_boundary();

        info!(
            air = grid.count(TileKind::Air),
            fluids = TileKind::FLUIDS.iter().map(|&k| grid.count(k)).sum::<usize>(),
            "terrain generation complete"
        );

        Ok(WorldGrid::from_grid(
            grid,
            self.config.tile_size,
            &self.config.fluid,
        ))
    }

    /// Fills one chunk from precomputed layers.
    pub fn generate_chunk<R: RollSource + ?Sized>(
        layers: &NoiseLayers,
        layout: &ChunkLayout,
        coord: ChunkCoord,
        rolls: &mut R,
    ) -> Chunk {
        let mut chunk = Chunk::new(coord, layout.bounds(coord));
        for (x, y) in chunk.bounds().iter() {
            chunk.set(x, y, cell_kind(y, layers.sample(x, y), rolls));
        }
        chunk
    }
}

/// A world being generated on a worker thread.
///
/// The grid only becomes reachable once generation has finished.
#[derive(Debug)]
pub struct GenerationHandle {
    receiver: Receiver<Result<WorldGrid, ConfigError>>,
}

impl GenerationHandle {
    /// Blocks until the world is ready.
    pub fn wait(self) -> BurrowResult<WorldGrid> {
        self.receiver
            .recv()
            .map_err(|_| BurrowError::Generation("generation worker exited early".into()))?
            .map_err(BurrowError::from)
    }

    /// Returns the world if it is ready, without blocking.
    pub fn try_take(&self) -> Option<BurrowResult<WorldGrid>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result.map_err(BurrowError::from)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(BurrowError::Generation(
                "generation worker exited early".into(),
            ))),
        }
    }
}

/// Starts generating a world on a background thread.
pub fn spawn_generation(config: WorldConfig) -> GenerationHandle {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let result = TerrainGenerator::new(config).and_then(|g| g.generate());
        // The receiver may have been dropped; nothing left to do then
        let _ = sender.send(result);
    });
    GenerationHandle { receiver }
}
