use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Cell, GameState, Score, GRID_SIZE};

/// Immutable view handed to the host after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub score: Score,
    pub best_score: Score,
    pub state: GameState,
    /// Whether the operation that produced this snapshot changed the grid.
    pub moved: bool,
}

impl GameSnapshot {
    pub fn grid(&self) -> Grid {
        Grid::from_resolved_rows(self.grid)
    }

    pub fn tile(&self, row: usize, col: usize) -> Cell {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.state != GameState::Lost
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; GRID_SIZE]; GRID_SIZE],
            score: 0,
            best_score: 0,
            state: GameState::Idle,
            moved: false,
        }
    }
}
