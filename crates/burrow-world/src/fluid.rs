//! Cellular fluid flow for water, lava, and gas.
//!
//! One step scans a window of the grid in row-major order and mutates the
//! grid in place, so a tile moved earlier in the pass can be visited again
//! later in the same pass (a fluid with open space beneath it drops through
//! the whole window in one step). Every move swaps a fluid tile with an air
//! tile, which keeps the per-kind fluid count inside the window constant.
//! Tiles outside the window are read for the "blocked below" check but never
//! written. Gas with open air both below and above stays where it is and
//! counts as no move.

use burrow_common::TileRect;
use tracing::debug;

use crate::config::FluidConfig;
use crate::grid::TileGrid;
use crate::rolls::RollSource;
use crate::tile::TileKind;

/// Throttle for the fluid step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidSimulator {
    interval: u32,
    radius: u32,
    counter: u32,
}

impl FluidSimulator {
    /// Creates a simulator from its configuration.
    #[must_use]
    pub fn new(config: &FluidConfig) -> Self {
        Self {
            interval: config.interval.max(1),
            radius: config.radius,
            counter: 0,
        }
    }

    /// Window half-width in tiles.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Counts one update call; true when a step is due.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter < self.interval {
            return false;
        }
        self.counter = 0;
        true
    }
}

/// Advances every fluid tile in `window` by one step.
///
/// Returns the number of moves made.
pub fn step<R: RollSource + ?Sized>(
    grid: &mut TileGrid,
    window: TileRect,
    coin: &mut R,
) -> usize {
    let height = grid.height();
    let width = grid.width();
    let writable = |x: u32, y: u32| window.contains(i64::from(x), i64::from(y));
    let mut moves = 0;

    for (x, y) in window.iter() {
        let kind = grid.at(x, y);
        if !kind.is_fluid() {
            continue;
        }
        let (mut cx, mut cy) = (x, y);

        if y + 1 < height {
            let below = grid.at(x, y + 1);
            if below == TileKind::Air {
                if writable(x, y + 1) {
                    // Gas would drop and then rise straight back
                    if kind == TileKind::Gas {
                        continue;
                    }
                    grid.swap((x, y), (x, y + 1));
                    cy = y + 1;
                    moves += 1;
                }
            } else if below != kind {
                // One coin flip, no retry on the other side
                let target = if coin.roll() < 0.5 {
                    x.checked_sub(1)
                } else {
                    Some(x + 1).filter(|&nx| nx < width)
                };
                if let Some(nx) = target {
                    if writable(nx, y) && grid.at(nx, y) == TileKind::Air {
                        grid.swap((x, y), (nx, y));
                        cx = nx;
                        moves += 1;
                    }
                }
            }
        }

        // Gas also rises from wherever it now sits
        if kind == TileKind::Gas
            && cy > 0
            && writable(cx, cy - 1)
            && grid.at(cx, cy - 1) == TileKind::Air
        {
            grid.swap((cx, cy), (cx, cy - 1));
            moves += 1;
        }
    }

    if moves > 0 {
        debug!(moves, ?window, "fluid step");
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolls::ScriptedRolls;
    use proptest::prelude::*;

    fn run(rows: &[&str], rolls: &[f64]) -> String {
        let mut grid = TileGrid::from_glyphs(rows);
        let window = grid.bounds();
        step(&mut grid, window, &mut ScriptedRolls::new(rolls.to_vec()));
        grid.to_glyphs()
    }

    #[test]
    fn test_throttle_every_interval_calls() {
        let mut sim = FluidSimulator::new(&FluidConfig::default());
        let due: Vec<bool> = (0..20).map(|_| sim.tick()).collect();
        assert_eq!(due.iter().filter(|&&d| d).count(), 2);
        assert!(due[9]);
        assert!(due[19]);
        assert!(!due[0]);
    }

    #[test]
    fn test_water_falls_through_open_column_in_one_step() {
        let out = run(&["|w|", "| |", "| |", "|.|"], &[]);
        assert_eq!(out, "| |\n| |\n|w|\n|.|\n");
    }

    #[test]
    fn test_blocked_water_spills_left() {
        let out = run(&["  w  ", ".....", "....."], &[0.2]);
        assert_eq!(out, " w   \n.....\n.....\n");
    }

    #[test]
    fn test_blocked_water_spills_right_and_is_revisited() {
        // Moving right lands on a cell the scan has not reached yet
        let out = run(&["  w  ", ".....", "....."], &[0.7]);
        assert_eq!(out, "    w\n.....\n.....\n");
    }

    #[test]
    fn test_no_fallback_to_other_side() {
        let out = run(&[" .w. ", ".....", "....."], &[0.2]);
        assert_eq!(out, " .w. \n.....\n.....\n");
    }

    #[test]
    fn test_resting_on_same_fluid_skips_coin_flip() {
        let mut grid = TileGrid::from_glyphs(&[".w.", ".w.", "..."]);
        let window = grid.bounds();
        let mut rolls = ScriptedRolls::new([0.2]);
        assert_eq!(step(&mut grid, window, &mut rolls), 0);
        // Only the lower tile is blocked by a different kind
        assert_eq!(rolls.drawn(), 1);
        assert_eq!(grid.to_glyphs(), ".w.\n.w.\n...\n");
    }

    #[test]
    fn test_gas_rises() {
        let out = run(&["   ", " ~ ", "..."], &[0.2]);
        // Spills left, then rises from its new cell
        assert_eq!(out, "~  \n   \n...\n");
    }

    #[test]
    fn test_gas_in_open_air_holds_position() {
        let mut grid = TileGrid::from_glyphs(&["   ", " ~ ", "   ", "..."]);
        let before = grid.clone();
        let window = grid.bounds();
        let mut coin = ScriptedRolls::new([0.2]);

        let moves = step(&mut grid, window, &mut coin);

        assert_eq!(moves, 0);
        assert_eq!(grid, before);
        assert_eq!(coin.drawn(), 0);
    }

    #[test]
    fn test_gas_at_window_floor_only_rises() {
        // The cell below is outside the window, so the drop never happens
        let mut grid = TileGrid::from_glyphs(&["   ", " ~ ", "   "]);
        let window = TileRect::new(0, 0, 3, 2);
        let moves = step(&mut grid, window, &mut ScriptedRolls::new([0.2]));
        assert_eq!(moves, 1);
        assert_eq!(grid.to_glyphs(), " ~ \n   \n   \n");
    }

    #[test]
    fn test_gas_under_cover_stays_put() {
        let out = run(&[".:.", ".~.", "..."], &[0.2]);
        assert_eq!(out, ".:.\n.~.\n...\n");
    }

    #[test]
    fn test_bottom_row_fluid_never_moves() {
        let out = run(&["   ", " w "], &[0.2]);
        assert_eq!(out, "   \n w \n");
    }

    #[test]
    fn test_writes_stay_inside_window() {
        let mut grid = TileGrid::from_glyphs(&["w", " ", " ", " "]);
        let window = TileRect::new(0, 0, 1, 2);
        let moves = step(&mut grid, window, &mut ScriptedRolls::new([0.2]));
        assert_eq!(moves, 1);
        assert_eq!(grid.to_glyphs(), " \nw\n \n \n");
    }

    fn arb_row(width: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(prop::sample::select(vec![' ', ' ', '.', 'w', 'L', '~']), width)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn test_fluid_conserved_in_window(
            rows in proptest::collection::vec(arb_row(12), 12),
            x0 in 0u32..12, y0 in 0u32..12, w in 0u32..12, h in 0u32..12,
            seed in any::<u64>(),
        ) {
            let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
            let mut grid = TileGrid::from_glyphs(&refs);
            let before = grid.clone();
            let window = TileRect::new(x0, y0, (x0 + w).min(12), (y0 + h).min(12));

            step(&mut grid, window, &mut fastrand::Rng::with_seed(seed));

            for kind in TileKind::FLUIDS {
                prop_assert_eq!(before.count_in(window, kind), grid.count_in(window, kind));
            }
            for (x, y, kind) in before.tiles_in(before.bounds()) {
                if !window.contains(i64::from(x), i64::from(y)) {
                    prop_assert_eq!(grid.at(x, y), kind);
                }
            }
        }
    }
}
