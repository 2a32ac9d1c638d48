//! Grid module - the 4x4 matrix of tiles
//!
//! The grid is a small `Copy` value: every transformation returns a new grid
//! and never touches its input, so callers can hold on to any grid they were
//! handed (snapshots, replays, undo stacks) without defensive copies.
//! Coordinates: `(row, col)`, row 0 at the top, col 0 at the left.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::types::{is_tile_value, Cell, TileValue, CELL_COUNT, GRID_SIZE};

/// One row (or a rotated column) of the grid.
pub type Row = [Cell; GRID_SIZE];

/// Positions of empty cells, row-major. Never allocates.
pub type EmptyCells = ArrayVec<(usize, usize), CELL_COUNT>;

/// The game grid - always exactly 4 rows of 4 cells
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    rows: [Row; GRID_SIZE],
}

impl Grid {
    /// A grid of empty cells
    pub fn empty() -> Self {
        Self {
            rows: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Build a grid from rows, checking every occupied cell holds a power of
    /// two between 2 and `MAX_TILE`.
    pub fn from_rows(rows: [Row; GRID_SIZE]) -> Result<Self, GridError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(value) = *cell {
                    if !is_tile_value(value) {
                        return Err(GridError::InvalidTile { row, col, value });
                    }
                }
            }
        }
        Ok(Self { rows })
    }

    /// Build a grid from nested slices (e.g. decoded JSON).
    ///
    /// Zero is read as an empty cell.
    pub fn from_values(values: &[Vec<TileValue>]) -> Result<Self, GridError> {
        if values.len() != GRID_SIZE || values.iter().any(|r| r.len() != GRID_SIZE) {
            return Err(GridError::Shape {
                rows: values.len(),
                cols: values.iter().map(Vec::len).max().unwrap_or(0),
            });
        }
        let mut rows = [[None; GRID_SIZE]; GRID_SIZE];
        for (r, src) in values.iter().enumerate() {
            for (c, &v) in src.iter().enumerate() {
                rows[r][c] = (v != 0).then_some(v);
            }
        }
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.rows
    }

    pub fn into_rows(self) -> [Row; GRID_SIZE] {
        self.rows
    }

    pub fn row(&self, row: usize) -> Option<Row> {
        self.rows.get(row).copied()
    }

    /// Cell at `(row, col)`; `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// A copy of this grid with `(row, col)` replaced.
    ///
    /// Out-of-bounds positions return the grid unchanged.
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut next = *self;
        if row < GRID_SIZE && col < GRID_SIZE {
            next.rows[row][col] = cell;
        }
        next
    }

    /// Grid assembled from four already-resolved rows.
    pub(crate) fn from_resolved_rows(rows: [Row; GRID_SIZE]) -> Self {
        Self { rows }
    }

    pub fn is_full(&self) -> bool {
        self.cells().all(|cell| cell.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells().all(|cell| cell.is_none())
    }

    /// Empty cell positions in row-major order
    pub fn empty_cell_positions(&self) -> EmptyCells {
        let mut out = EmptyCells::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    out.push((r, c));
                }
            }
        }
        out
    }

    pub fn tile_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_some()).count()
    }

    /// Largest tile on the grid, 0 when empty
    pub fn max_tile(&self) -> TileValue {
        self.cells().flatten().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn tile_sum(&self) -> u64 {
        self.cells().flatten().map(u64::from).sum()
    }

    /// Rotate 90° clockwise into a fresh grid.
    pub fn rotate_cw(&self) -> Self {
        let mut rows = [[None; GRID_SIZE]; GRID_SIZE];
        for (r, out) in rows.iter_mut().enumerate() {
            for (c, cell) in out.iter_mut().enumerate() {
                *cell = self.rows[GRID_SIZE - 1 - c][r];
            }
        }
        Self { rows }
    }

    /// Rotate 90° clockwise `turns` times (taken mod 4).
    pub fn rotated(&self, turns: usize) -> Self {
        (0..turns % 4).fold(*self, |grid, _| grid.rotate_cw())
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Tile values with 0 for empty cells, as rendered by the view and the protocol.
    pub fn to_values(&self) -> [[TileValue; GRID_SIZE]; GRID_SIZE] {
        self.rows.map(|row| row.map(|cell| cell.unwrap_or(0)))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_values().iter()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(v) => write!(f, "{v:>5}")?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }
        }
        Ok(())
    }
}
