//! Terminal state detection - win and loss
//!
//! A grid is lost when it has no empty cell and no two orthogonally adjacent
//! cells hold the same value. That is exactly the set of grids on which every
//! direction resolves to `moved = false`, checked here without resolving moves.

use crate::grid::Grid;
use crate::types::{GameState, GRID_SIZE, MAX_TILE, WIN_TILE};

/// Any tile at or above the win threshold
pub fn has_winning_tile(grid: &Grid) -> bool {
    grid.max_tile() >= WIN_TILE
}

/// Any pair of equal, horizontally or vertically adjacent tiles that can
/// still merge (below [`MAX_TILE`])
pub fn has_adjacent_pair(grid: &Grid) -> bool {
    let rows = grid.rows();
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let Some(value) = rows[r][c].filter(|&v| v < MAX_TILE) else {
                continue;
            };
            if c + 1 < GRID_SIZE && rows[r][c + 1] == Some(value) {
                return true;
            }
            if r + 1 < GRID_SIZE && rows[r + 1][c] == Some(value) {
                return true;
            }
        }
    }
    false
}

/// No legal move remains.
pub fn is_lost(grid: &Grid) -> bool {
    grid.is_full() && !has_adjacent_pair(grid)
}

/// State after a grid-changing move.
///
/// `win_acknowledged` is set once the player chose to keep playing; from then
/// on a winning tile never surfaces `Won` again in this session. A pending,
/// unacknowledged win stays `Won` unless the grid is also lost.
pub fn next_state(grid: &Grid, current: GameState, win_acknowledged: bool) -> GameState {
    if has_winning_tile(grid) && !win_acknowledged {
        return GameState::Won;
    }
    if is_lost(grid) {
        return GameState::Lost;
    }
    match current {
        GameState::Won if !win_acknowledged => GameState::Won,
        _ => GameState::Playing,
    }
}
