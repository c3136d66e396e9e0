//! Rectangular tile storage addressed by tile coordinates.

use burrow_common::{TileCoord, TileRect};

use crate::tile::TileKind;

/// Row-major grid of tile kinds.
///
/// Always fully populated. Reads outside the grid return
/// [`TileKind::Boundary`]; writes outside the grid are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Creates a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
        }
    }

    /// Builds a grid from text rows, one glyph per tile.
    ///
    /// Unrecognized glyphs become [`TileKind::Unknown`]. Short rows are
    /// padded with air.
    #[must_use]
    pub fn from_glyphs(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(width, height, TileKind::Air);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let kind = TileKind::ALL
                    .into_iter()
                    .find(|k| k.glyph() == glyph)
                    .unwrap_or(TileKind::Unknown);
                grid.put(x as u32, y as u32, kind);
            }
        }
        grid
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Rectangle covering the whole grid.
    #[must_use]
    pub fn bounds(&self) -> TileRect {
        TileRect::full(self.width, self.height)
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        let x = u32::try_from(coord.x).ok()?;
        let y = u32::try_from(coord.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Returns true if the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.index(coord).is_some()
    }

    /// Tile at `coord`, or `Boundary` outside the grid.
    #[must_use]
    pub fn get(&self, coord: TileCoord) -> TileKind {
        self.index(coord)
            .and_then(|i| self.tiles.get(i).copied())
            .unwrap_or(TileKind::Boundary)
    }

    /// Writes a tile. Returns false (and changes nothing) outside the grid.
    pub fn set(&mut self, coord: TileCoord, kind: TileKind) -> bool {
        match self.index(coord).and_then(|i| self.tiles.get_mut(i)) {
            Some(slot) => {
                *slot = kind;
                true
            },
            None => false,
        }
    }

    /// Unsigned read used by the scanning loops.
    pub(crate) fn at(&self, x: u32, y: u32) -> TileKind {
        self.get(TileCoord::new(x as i32, y as i32))
    }

    /// Unsigned write used by the scanning loops.
    pub(crate) fn put(&mut self, x: u32, y: u32, kind: TileKind) {
        self.set(TileCoord::new(x as i32, y as i32), kind);
    }

    /// Swaps two in-bounds tiles.
    pub(crate) fn swap(&mut self, a: (u32, u32), b: (u32, u32)) {
        let first = self.at(a.0, a.1);
        let second = self.at(b.0, b.1);
        self.put(a.0, a.1, second);
        self.put(b.0, b.1, first);
    }

    /// All tiles, row-major.
    #[must_use]
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// Iterates rows from the surface down.
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks_exact(self.width.max(1) as usize)
    }

    /// Iterates `(x, y, kind)` for every tile inside `rect`.
    pub fn tiles_in(&self, rect: TileRect) -> impl Iterator<Item = (u32, u32, TileKind)> + '_ {
        let clipped = TileRect::new(
            rect.x0,
            rect.y0,
            rect.x1.min(self.width),
            rect.y1.min(self.height),
        );
        clipped.iter().map(move |(x, y)| (x, y, self.at(x, y)))
    }

    /// Number of tiles of `kind` in the whole grid.
    #[must_use]
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&k| k == kind).count()
    }

    /// Number of tiles of `kind` inside `rect`.
    #[must_use]
    pub fn count_in(&self, rect: TileRect, kind: TileKind) -> usize {
        self.tiles_in(rect).filter(|&(_, _, k)| k == kind).count()
    }

    /// Walls off the left column, right column, and bottom row.
    pub fn stamp_boundary(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        for y in 0..self.height {
            self.put(0, y, TileKind::Boundary);
            self.put(self.width - 1, y, TileKind::Boundary);
        }
        for x in 0..self.width {
            self.put(x, self.height - 1, TileKind::Boundary);
        }
    }

    /// Renders the grid as text, one glyph per tile, one line per row.
    #[must_use]
    pub fn to_glyphs(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.rows() {
            out.extend(row.iter().map(|k| k.glyph()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_boundary() {
        let grid = TileGrid::new(4, 4, TileKind::Dirt);
        assert_eq!(grid.get(TileCoord::new(0, 0)), TileKind::Dirt);
        assert_eq!(grid.get(TileCoord::new(-1, 0)), TileKind::Boundary);
        assert_eq!(grid.get(TileCoord::new(4, 0)), TileKind::Boundary);
        assert_eq!(grid.get(TileCoord::new(0, 4)), TileKind::Boundary);
    }

    #[test]
    fn test_out_of_bounds_write_rejected() {
        let mut grid = TileGrid::new(4, 4, TileKind::Dirt);
        assert!(!grid.set(TileCoord::new(0, -1), TileKind::Gas));
        assert!(!grid.set(TileCoord::new(4, 4), TileKind::Gas));
        assert_eq!(grid.count(TileKind::Gas), 0);
        assert!(grid.set(TileCoord::new(3, 3), TileKind::Gas));
        assert_eq!(grid.count(TileKind::Gas), 1);
    }

    #[test]
    fn test_stamp_boundary() {
        let mut grid = TileGrid::new(5, 4, TileKind::Stone);
        grid.stamp_boundary();
        let text = grid.to_glyphs();
        assert_eq!(text, "|:::|\n|:::|\n|:::|\n|||||\n");
    }

    #[test]
    fn test_glyph_round_trip() {
        let rows = ["| w |", "|.L.|", "|||||"];
        let grid = TileGrid::from_glyphs(&rows);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(TileCoord::new(2, 0)), TileKind::Water);
        assert_eq!(grid.get(TileCoord::new(2, 1)), TileKind::Lava);
        assert_eq!(grid.to_glyphs(), "| w |\n|.L.|\n|||||\n");
    }

    #[test]
    fn test_count_in_rect() {
        let grid = TileGrid::from_glyphs(&["ww w", "w ww"]);
        assert_eq!(grid.count(TileKind::Water), 6);
        assert_eq!(grid.count_in(TileRect::new(0, 0, 2, 2), TileKind::Water), 3);
        assert_eq!(grid.count_in(TileRect::new(0, 0, 99, 99), TileKind::Water), 6);
    }
}
