//! Tile spawning
//!
//! One tile per grid-changing move, in a uniformly chosen empty cell: a 2 with
//! probability 0.9, otherwise a 4. Cell and value come from two separate draws.

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{TileValue, LARGE_TILE, SMALL_TILE, SPAWN_TWO_PROBABILITY, STARTING_TILES};

/// Where a tile landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: TileValue,
}

/// Pick a spawn value from one unit draw.
pub fn spawn_value(unit: f64) -> TileValue {
    if unit < SPAWN_TWO_PROBABILITY {
        SMALL_TILE
    } else {
        LARGE_TILE
    }
}

/// Place one tile in a random empty cell.
///
/// Returns `None` (and draws nothing) when the grid is full.
pub fn spawn_tile<R: RandomSource + ?Sized>(grid: &Grid, rng: &mut R) -> Option<(Grid, Spawned)> {
    let empty = grid.empty_cell_positions();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.next_index(empty.len())];
    let value = spawn_value(rng.next_unit());
    Some((
        grid.with_cell(row, col, Some(value)),
        Spawned { row, col, value },
    ))
}

/// A fresh grid with the two starting tiles in distinct cells.
pub fn starting_grid<R: RandomSource + ?Sized>(rng: &mut R) -> Grid {
    (0..STARTING_TILES).fold(Grid::empty(), |grid, _| {
        spawn_tile(&grid, rng).map_or(grid, |(next, _)| next)
    })
}
