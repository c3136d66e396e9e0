//! The live world: pixel-space queries, digging, and periodic fluid flow.

use std::sync::Arc;

use burrow_common::{PixelPos, TileCoord, TileRect};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::TileCatalog;
use crate::config::FluidConfig;
use crate::fluid::{self, FluidSimulator};
use crate::grid::TileGrid;
use crate::rolls::{rng_from, RollSource};
use crate::tile::TileKind;

/// World handle for a renderer reading alongside the simulation thread.
pub type SharedWorld = Arc<RwLock<WorldGrid>>;

/// Resource handed out by a completed dig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Kind of the mined tile
    pub kind: TileKind,
    /// Resource value from the catalog
    pub value: u32,
    /// Nutrition from the catalog
    pub nutrition: f32,
}

/// Result of a dig attempt on a diggable tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DigOutcome {
    /// Dig power below durability; the tile is unchanged
    InProgress,
    /// Tile turned to air and its resource collected
    Collected(Resource),
}

/// The mutable tile world owned by the game loop.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    grid: TileGrid,
    tile_size: u32,
    fluid: FluidSimulator,
    coin: fastrand::Rng,
}

impl WorldGrid {
    /// Wraps a generated grid.
    #[must_use]
    pub fn from_grid(grid: TileGrid, tile_size: u32, fluid: &FluidConfig) -> Self {
        Self {
            grid,
            tile_size: tile_size.max(1),
            fluid: FluidSimulator::new(fluid),
            coin: rng_from(fluid.coin_seed),
        }
    }

    /// Moves the world behind a lock for shared access.
    #[must_use]
    pub fn into_shared(self) -> SharedWorld {
        Arc::new(RwLock::new(self))
    }

    /// Underlying tile storage.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Tile edge length in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn tile_of(&self, x: f32, y: f32) -> Option<TileCoord> {
        PixelPos::new(x, y).to_tile(self.tile_size)
    }

    /// Tile kind under a pixel. Off-grid pixels read as `Boundary`.
    #[must_use]
    pub fn get_tile_at(&self, x: f32, y: f32) -> TileKind {
        self.tile_of(x, y)
            .map_or(TileKind::Boundary, |coord| self.grid.get(coord))
    }

    /// Overwrites the tile under a pixel. Returns false off-grid.
    pub fn set_tile_at(&mut self, x: f32, y: f32, kind: TileKind) -> bool {
        match self.tile_of(x, y) {
            Some(coord) => self.grid.set(coord, kind),
            None => false,
        }
    }

    /// Attempts to mine the tile under a pixel.
    ///
    /// Returns `None` off-grid or on air/boundary. Otherwise the tile is
    /// mined in full when `dig_power` reaches its durability, and left
    /// untouched when it does not; no partial progress is kept between calls.
    pub fn dig_tile_at(&mut self, x: f32, y: f32, dig_power: f32) -> Option<DigOutcome> {
        let coord = self.tile_of(x, y).filter(|c| self.grid.contains(*c))?;
        let kind = self.grid.get(coord);
        if matches!(kind, TileKind::Air | TileKind::Boundary) {
            return None;
        }

        let props = TileCatalog::lookup(kind);
        if dig_power >= props.durability {
            self.grid.set(coord, TileKind::Air);
            debug!(%kind, x = coord.x, y = coord.y, "tile mined");
            Some(DigOutcome::Collected(Resource {
                kind,
                value: props.resource_value,
                nutrition: props.nutrition_value,
            }))
        } else {
            Some(DigOutcome::InProgress)
        }
    }

    /// Whether the tile under a pixel blocks movement.
    #[must_use]
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        TileCatalog::is_solid(self.get_tile_at(x, y))
    }

    /// Whether the tile under a pixel is a resource.
    #[must_use]
    pub fn is_ore_at(&self, x: f32, y: f32) -> bool {
        TileCatalog::is_ore(self.get_tile_at(x, y))
    }

    /// Whether the tile under a pixel hurts on contact.
    #[must_use]
    pub fn is_damaging_at(&self, x: f32, y: f32) -> bool {
        TileCatalog::is_damaging(self.get_tile_at(x, y))
    }

    /// Fluid window around an anchor pixel.
    #[must_use]
    pub fn fluid_window(&self, anchor: PixelPos) -> TileRect {
        match anchor.to_tile(self.tile_size) {
            Some(center) => {
                TileRect::around(center, self.fluid.radius(), self.width(), self.height())
            },
            None => TileRect::default(),
        }
    }

    /// Per-tick world update, called once per game-loop tick.
    ///
    /// Only every `interval`-th call does work: one fluid step inside the
    /// window around `anchor`. The step size does not depend on
    /// `delta_time`. Returns the number of fluid moves made.
    pub fn update(&mut self, _delta_time: f32, anchor: PixelPos) -> usize {
        match self.due_window(anchor) {
            Some(window) => fluid::step(&mut self.grid, window, &mut self.coin),
            None => 0,
        }
    }

    /// [`WorldGrid::update`] with an explicit coin source.
    pub fn update_with<R: RollSource + ?Sized>(
        &mut self,
        _delta_time: f32,
        anchor: PixelPos,
        coin: &mut R,
    ) -> usize {
        match self.due_window(anchor) {
            Some(window) => fluid::step(&mut self.grid, window, coin),
            None => 0,
        }
    }

    /// Counts one update call; the fluid window when a step is due.
    fn due_window(&mut self, anchor: PixelPos) -> Option<TileRect> {
        if !self.fluid.tick() {
            return None;
        }
        if !anchor.is_finite() {
            warn!(?anchor, "skipping fluid step for non-finite anchor");
            return None;
        }
        Some(self.fluid_window(anchor))
    }

    /// Tile rectangle visible to a camera centred on `center`.
    #[must_use]
    pub fn visible_tiles(&self, center: PixelPos, view_width: f32, view_height: f32) -> TileRect {
        if !(center.is_finite() && view_width.is_finite() && view_height.is_finite()) {
            return TileRect::default();
        }
        let ts = self.tile_size as f32;
        let span = |c: f32, view: f32, limit: u32| {
            let start = ((c / ts).floor() - (view / ts / 2.0).ceil()).max(0.0) as i64;
            let end = (start + (view / ts).ceil() as i64 + 2).min(i64::from(limit));
            (start.min(i64::from(limit)) as u32, end.max(0) as u32)
        };
        let (x0, x1) = span(center.x, view_width, self.width());
        let (y0, y1) = span(center.y, view_height, self.height());
        TileRect::new(x0, y0, x1, y1)
    }

    /// Iterates `(x, y, kind)` over a tile rectangle.
    pub fn tiles_in(&self, rect: TileRect) -> impl Iterator<Item = (u32, u32, TileKind)> + '_ {
        self.grid.tiles_in(rect)
    }

    /// Clears a square cavern and places `centerpiece` in its middle.
    ///
    /// Boundary tiles are left standing. Returns the number of tiles changed.
    pub fn carve_cavern(&mut self, center: TileCoord, radius: u32, centerpiece: TileKind) -> usize {
        let r = radius.min(self.width().max(self.height())) as i32;
        let mut changed = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                let coord = center.offset(dx, dy);
                let target = if dx == 0 && dy == 0 {
                    centerpiece
                } else {
                    TileKind::Air
                };
                let current = self.grid.get(coord);
                if current == TileKind::Boundary || current == target {
                    continue;
                }
                if self.grid.set(coord, target) {
                    changed += 1;
                }
            }
        }
        debug!(%centerpiece, x = center.x, y = center.y, changed, "cavern carved");
        changed
    }
}
