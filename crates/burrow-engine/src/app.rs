//! Headless session lifecycle.
//!
//! Generates a world in the background, places the driller cavern, then
//! drives the world with a fixed-rate update loop the way a game loop would.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use burrow_common::{PixelPos, TileCoord};
use burrow_world::{rng_from, spawn_generation, SharedWorld, TileKind, WorldGrid};
use tracing::{debug, info};

use crate::config::EngineConfig;

/// How often the loading loop polls the generation worker.
const LOADING_POLL: Duration = Duration::from_millis(5);

/// Driller depth range in tiles, before clamping to the world.
const DRILLER_DEPTH: (u32, u32) = (100, 200);
/// Columns kept clear of the side walls when placing the driller.
const DRILLER_MARGIN: u32 = 20;
/// Half-width of the cavern around the driller part.
const DRILLER_CAVERN_RADIUS: u32 = 2;

/// Viewport used for the end-of-session summary.
const VIEW_SIZE: (f32, f32) = (800.0, 600.0);

/// Outcome of a session.
#[derive(Debug)]
pub struct Session {
    /// The simulated world
    pub world: SharedWorld,
    /// Where the driller part was placed, if it was
    pub driller: Option<TileCoord>,
    /// Total fluid moves over all ticks
    pub fluid_moves: usize,
    /// Non-air tiles inside the final viewport
    pub visible_solid: usize,
}

/// Picks the driller site: a random depth and column, pulled inside the grid.
pub fn driller_site(width: u32, height: u32, rng: &mut fastrand::Rng) -> TileCoord {
    let depth = rng.u32(DRILLER_DEPTH.0..DRILLER_DEPTH.1);
    let span = width.saturating_sub(DRILLER_MARGIN * 2).max(1);
    let column = DRILLER_MARGIN + rng.u32(0..span);

    // Keep the whole cavern off the walls and floor
    let inset = DRILLER_CAVERN_RADIUS + 1;
    let clamp = |v: u32, len: u32| v.min(len.saturating_sub(inset + 1)).max(inset.min(len / 2));
    TileCoord::new(clamp(column, width) as i32, clamp(depth, height) as i32)
}

/// Blocks on background generation, polling like a loading screen would.
fn load_world(config: &EngineConfig) -> Result<WorldGrid> {
    let started = Instant::now();
    let handle = spawn_generation(config.world.clone());
    let mut polls = 0u32;

    let world = loop {
        if let Some(result) = handle.try_take() {
            break result.context("world generation failed")?;
        }
        polls += 1;
        thread::sleep(LOADING_POLL);
    };

    info!(elapsed_ms = started.elapsed().as_millis(), polls, "World ready");
    Ok(world)
}

/// Runs one session to completion.
pub fn run(config: &EngineConfig) -> Result<Session> {
    let mut world = load_world(config)?;

    let driller = if config.place_driller {
        let mut rng = rng_from(config.world.kind_roll_seed);
        let site = driller_site(world.width(), world.height(), &mut rng);
        let changed = world.carve_cavern(site, DRILLER_CAVERN_RADIUS, TileKind::DrillerPart);
        info!(x = site.x, y = site.y, changed, "Placed driller part");
        Some(site)
    } else {
        None
    };

    // The player stands at the driller site, or mid-surface without one
    let tile_size = world.tile_size();
    let anchor = driller.map_or_else(
        || PixelPos::new((world.width() * tile_size) as f32 / 2.0, 0.0),
        |site| site.center_pixel(tile_size),
    );

    let world = world.into_shared();
    let dt = config.tick_dt();
    let mut fluid_moves = 0;

    info!(ticks = config.ticks, tick_rate = config.tick_rate, "Simulation starting");
    for tick in 0..config.ticks {
        let moves = world.write().update(dt, anchor);
        if moves > 0 {
            debug!(tick, moves, "fluid tick");
        }
        fluid_moves += moves;
    }

    let visible_solid = {
        let world = world.read();
        let view = world.visible_tiles(anchor, VIEW_SIZE.0, VIEW_SIZE.1);
        world
            .tiles_in(view)
            .filter(|&(_, _, kind)| !kind.is_air())
            .count()
    };

    info!("Simulation finished");

    Ok(Session {
        world,
        driller,
        fluid_moves,
        visible_solid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_world::WorldConfig;

    fn session_config(ticks: u32) -> EngineConfig {
        EngineConfig {
            ticks,
            world: WorldConfig::with_seed(321).deterministic(4),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_driller_site_inside_small_world() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..100 {
            let site = driller_site(32, 64, &mut rng);
            assert!((3..=28).contains(&site.x), "x = {}", site.x);
            assert!((3..=60).contains(&site.y), "y = {}", site.y);
        }
    }

    #[test]
    fn test_driller_site_in_tall_world_uses_depth_range() {
        let mut rng = fastrand::Rng::with_seed(2);
        for _ in 0..100 {
            let site = driller_site(100, 400, &mut rng);
            assert!((100..200).contains(&site.y));
            assert!((20..80).contains(&site.x));
        }
    }

    #[test]
    fn test_session_places_driller_and_keeps_walls() {
        let session = run(&session_config(30)).expect("session runs");
        let site = session.driller.expect("driller placed");

        let world = session.world.read();
        assert_eq!(world.grid().get(site), TileKind::DrillerPart);
        assert_eq!(world.grid().count(TileKind::DrillerPart), 1);
        assert_eq!(world.get_tile_at(0.0, 320.0), TileKind::Boundary);
        assert!(session.visible_solid > 0);
    }

    #[test]
    fn test_session_without_driller() {
        let config = EngineConfig {
            place_driller: false,
            ..session_config(0)
        };
        let session = run(&config).expect("session runs");
        assert!(session.driller.is_none());
        assert_eq!(session.fluid_moves, 0);
    }

    #[test]
    fn test_session_rejects_bad_world() {
        let mut config = session_config(1);
        config.world.tile_size = 0;
        assert!(run(&config).is_err());
    }
}
