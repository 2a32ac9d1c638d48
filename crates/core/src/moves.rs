//! Move resolution - rotate, slide left, merge, rotate back
//!
//! Only one primitive is implemented: [`slide_row_left`]. Every direction is
//! reduced to it by rotating the grid clockwise `Direction::clockwise_turns()`
//! times, sliding each row left, and rotating back `(4 - turns) % 4` times.
//!
//! Resolution is pure: no randomness, no I/O, and the input grid is never
//! modified.

use crate::grid::{Grid, Row};
use crate::types::{Direction, Score, TileValue, GRID_SIZE, MAX_TILE};

/// Result of resolving one direction against a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub grid: Grid,
    /// Sum of every tile produced by a merge during this move.
    pub score_delta: Score,
    /// True iff `grid` differs from the input in at least one cell.
    pub moved: bool,
}

/// Slide one row toward index 0 and merge equal neighbours.
///
/// Single forward pass over the packed tiles: a merged tile is never merged
/// again in the same move, so `[2,2,2,2]` becomes `[4,4,_,_]` and
/// `[2,2,2]` becomes `[4,2,_,_]`. A pair of [`MAX_TILE`]s stays unmerged.
/// Returns the new row and the merge score.
pub fn slide_row_left(row: Row) -> (Row, Score) {
    let mut out: Row = [None; GRID_SIZE];
    let mut len = 0usize;
    let mut score: Score = 0;
    // Tile waiting to see whether the next one matches it.
    let mut pending: Option<TileValue> = None;

    for value in row.into_iter().flatten() {
        match pending.filter(|&prev| prev == value).and_then(merge_value) {
            Some(merged) => {
                out[len] = Some(merged);
                len += 1;
                score += Score::from(merged);
                pending = None;
            }
            None => {
                if let Some(prev) = pending {
                    out[len] = Some(prev);
                    len += 1;
                }
                pending = Some(value);
            }
        }
    }
    if let Some(prev) = pending {
        out[len] = Some(prev);
    }

    (out, score)
}

/// Value of two merged `value` tiles, or `None` past [`MAX_TILE`].
fn merge_value(value: TileValue) -> Option<TileValue> {
    value.checked_mul(2).filter(|&merged| merged <= MAX_TILE)
}

/// Resolve a move in `direction` without spawning.
pub fn resolve_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    let turns = direction.clockwise_turns();
    let normalized = grid.rotated(turns);

    let mut score_delta = 0;
    let rows = normalized.into_rows().map(|row| {
        let (slid, score) = slide_row_left(row);
        score_delta += score;
        slid
    });

    let next = Grid::from_resolved_rows(rows).rotated((4 - turns) % 4);
    MoveOutcome {
        grid: next,
        score_delta,
        moved: next != *grid,
    }
}

/// Directions that would change the grid, in `Direction::ALL` order.
pub fn legal_moves(grid: &Grid) -> impl Iterator<Item = Direction> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&dir| resolve_move(grid, dir).moved)
}
