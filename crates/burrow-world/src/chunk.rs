//! Square generation chunks.
//!
//! Chunks structure generation work only; the finished world is one flat
//! grid. The last chunk in a row or column is cut short when the grid size
//! is not a multiple of the chunk size.

use burrow_common::{ChunkCoord, TileRect};

use crate::grid::TileGrid;
use crate::tile::TileKind;

/// A generated block of tiles awaiting placement in the world grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk coordinate
    coord: ChunkCoord,
    /// Tiles covered, in world tile coordinates
    bounds: TileRect,
    /// Tile data, row-major within `bounds`
    tiles: Vec<TileKind>,
}

impl Chunk {
    /// Creates an all-air chunk covering `bounds`.
    #[must_use]
    pub fn new(coord: ChunkCoord, bounds: TileRect) -> Self {
        let count = bounds.width() as usize * bounds.height() as usize;
        Self {
            coord,
            bounds,
            tiles: vec![TileKind::Air; count],
        }
    }

    /// Returns the chunk coordinate.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the tiles covered.
    #[must_use]
    pub const fn bounds(&self) -> TileRect {
        self.bounds
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if !self.bounds.contains(i64::from(x), i64::from(y)) {
            return None;
        }
        let local_x = (x - self.bounds.x0) as usize;
        let local_y = (y - self.bounds.y0) as usize;
        Some(local_y * self.bounds.width() as usize + local_x)
    }

    /// Sets a tile by world tile coordinates.
    pub fn set(&mut self, x: u32, y: u32, kind: TileKind) -> bool {
        match self.index(x, y).and_then(|i| self.tiles.get_mut(i)) {
            Some(slot) => {
                *slot = kind;
                true
            },
            None => false,
        }
    }

    /// Copies the chunk into its place in `grid`.
    pub fn write_into(&self, grid: &mut TileGrid) {
        for ((x, y), kind) in self.bounds.iter().zip(self.tiles.iter().copied()) {
            grid.put(x, y, kind);
        }
    }
}

/// Partition of a `width` x `height` grid into square chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    width: u32,
    height: u32,
    chunk_size: u32,
}

impl ChunkLayout {
    /// Creates a layout. A zero chunk size is treated as 1.
    #[must_use]
    pub fn new(width: u32, height: u32, chunk_size: u32) -> Self {
        Self {
            width,
            height,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Chunks per row.
    #[must_use]
    pub const fn chunks_x(&self) -> u32 {
        self.width.div_ceil(self.chunk_size)
    }

    /// Chunks per column.
    #[must_use]
    pub const fn chunks_y(&self) -> u32 {
        self.height.div_ceil(self.chunk_size)
    }

    /// Total number of chunks.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.chunks_x() * self.chunks_y()
    }

    /// Returns true if the layout holds no chunks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tiles covered by a chunk, clipped to the grid.
    #[must_use]
    pub fn bounds(&self, coord: ChunkCoord) -> TileRect {
        let origin = coord.origin(self.chunk_size);
        let x0 = u32::try_from(origin.x).unwrap_or(0).min(self.width);
        let y0 = u32::try_from(origin.y).unwrap_or(0).min(self.height);
        TileRect::new(
            x0,
            y0,
            x0.saturating_add(self.chunk_size).min(self.width),
            y0.saturating_add(self.chunk_size).min(self.height),
        )
    }

    /// Chunk coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let chunks_x = self.chunks_x() as i32;
        (0..self.chunks_y() as i32)
            .flat_map(move |y| (0..chunks_x).map(move |x| ChunkCoord::new(x, y)))
    }
}
