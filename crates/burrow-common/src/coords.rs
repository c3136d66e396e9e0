//! Coordinate types for pixel, tile, and chunk positions.

use serde::{Deserialize, Serialize};

/// Position in world pixel space.
///
/// This is the space the player, camera, and collision code work in. A pixel
/// position maps onto a tile by floor division with the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPos {
    /// X coordinate in pixels
    pub x: f32,
    /// Y coordinate in pixels (grows downward)
    pub y: f32,
}

impl PixelPos {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns true if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Converts to the tile containing this position.
    ///
    /// Returns `None` for non-finite positions, which callers treat as
    /// out of bounds.
    #[must_use]
    pub fn to_tile(self, tile_size: u32) -> Option<TileCoord> {
        if !self.is_finite() || tile_size == 0 {
            return None;
        }
        let size = tile_size as f32;
        // `as` saturates, so huge values still land out of bounds
        Some(TileCoord {
            x: (self.x / size).floor() as i32,
            y: (self.y / size).floor() as i32,
        })
    }
}

/// Tile coordinate (column, row) in the world grid.
///
/// Row 0 is the surface; larger rows are deeper. Negative values are valid
/// coordinates that simply fall outside any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column
    pub x: i32,
    /// Row (depth)
    pub y: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the top-left pixel of this tile.
    #[must_use]
    pub fn to_pixel(self, tile_size: u32) -> PixelPos {
        let size = tile_size as f32;
        PixelPos::new(self.x as f32 * size, self.y as f32 * size)
    }

    /// Returns the centre pixel of this tile.
    #[must_use]
    pub fn center_pixel(self, tile_size: u32) -> PixelPos {
        let half = tile_size as f32 / 2.0;
        let corner = self.to_pixel(tile_size);
        PixelPos::new(corner.x + half, corner.y + half)
    }

    /// Returns this coordinate shifted by the given deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Chunk coordinate (identifies a square block of tiles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate in chunk space
    pub x: i32,
    /// Y coordinate in chunk space
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to the tile coordinate of the chunk's top-left corner.
    #[must_use]
    pub const fn origin(self, chunk_size: u32) -> TileCoord {
        let size = chunk_size as i32;
        TileCoord {
            x: self.x * size,
            y: self.y * size,
        }
    }
}

/// Half-open rectangle of tiles: columns `x0..x1`, rows `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileRect {
    /// First column (inclusive)
    pub x0: u32,
    /// First row (inclusive)
    pub y0: u32,
    /// Last column (exclusive)
    pub x1: u32,
    /// Last row (exclusive)
    pub y1: u32,
}

impl TileRect {
    /// Creates a rectangle. Inverted bounds collapse to an empty rectangle.
    #[must_use]
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        }
    }

    /// The full extent of a `width` x `height` grid.
    #[must_use]
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Square window `[c - radius, c + radius)` on both axes, clamped to a
    /// `width` x `height` grid.
    #[must_use]
    pub fn around(center: TileCoord, radius: u32, width: u32, height: u32) -> Self {
        let clamp = |v: i64, max: u32| v.clamp(0, i64::from(max)) as u32;
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        Self::new(
            clamp(cx - r, width),
            clamp(cy - r, height),
            clamp(cx + r, width),
            clamp(cy + r, height),
        )
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Returns true if the rectangle covers no tiles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Returns true if the tile lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= i64::from(self.x0)
            && x < i64::from(self.x1)
            && y >= i64::from(self.y0)
            && y < i64::from(self.y1)
    }

    /// Iterates all tiles in row-major order (top to bottom, left to right).
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}
