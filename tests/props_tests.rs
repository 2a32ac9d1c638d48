//! Property-based tests for grid and engine invariants

use proptest::prelude::*;

use tui_2048::core::{is_lost, resolve_move, Game, GameError, Grid, MemoryStore, SimpleRng};
use tui_2048::types::{Direction, GRID_SIZE};

fn tile(max_exp: u32, fill: f64) -> impl Strategy<Value = Option<u32>> {
    proptest::option::weighted(fill, (1..=max_exp).prop_map(|e| 1u32 << e))
}

/// Sparse-ish grids with tiles up to 2048.
fn any_grid() -> impl Strategy<Value = Grid> {
    prop::array::uniform4(prop::array::uniform4(tile(11, 0.6)))
        .prop_map(|rows| Grid::from_rows(rows).unwrap())
}

/// Nearly full grids with few distinct values, so losses actually occur.
fn crowded_grid() -> impl Strategy<Value = Grid> {
    prop::array::uniform4(prop::array::uniform4(tile(4, 0.95)))
        .prop_map(|rows| Grid::from_rows(rows).unwrap())
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn transpose(g: &Grid) -> Grid {
    let mut out = Grid::empty();
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            out = out.with_cell(c, r, g.get(r, c).flatten());
        }
    }
    out
}

/// Cells of every line in travel order, read straight off the grid: the
/// first cell is the one tiles slide toward.
fn lines_toward(g: &Grid, dir: Direction) -> Vec<Vec<u32>> {
    (0..GRID_SIZE)
        .map(|i| {
            (0..GRID_SIZE)
                .filter_map(|j| {
                    let (r, c) = match dir {
                        Direction::Left => (i, j),
                        Direction::Right => (i, GRID_SIZE - 1 - j),
                        Direction::Up => (j, i),
                        Direction::Down => (GRID_SIZE - 1 - j, i),
                    };
                    g.get(r, c).flatten()
                })
                .collect()
        })
        .collect()
}

/// Sum of the tiles produced by merging each line once, front to back.
fn merge_products(g: &Grid, dir: Direction) -> u64 {
    let mut total = 0;
    for line in lines_toward(g, dir) {
        let mut i = 0;
        while i < line.len() {
            if i + 1 < line.len() && line[i] == line[i + 1] {
                total += u64::from(line[i]) * 2;
                i += 2;
            } else {
                i += 1;
            }
        }
    }
    total
}

proptest! {
    /// Property: merging never creates or destroys value
    #[test]
    fn prop_move_conserves_tile_sum(g in any_grid(), dir in direction()) {
        let out = resolve_move(&g, dir);
        prop_assert_eq!(out.grid.tile_sum(), g.tile_sum());
    }

    /// Property: score delta is exactly the sum of the merged tiles, checked
    /// against a direct line-by-line merge that does not rotate the grid
    #[test]
    fn prop_score_delta_tracks_merges(g in any_grid(), dir in direction()) {
        let out = resolve_move(&g, dir);
        prop_assert_eq!(out.score_delta, merge_products(&g, dir));

        let merges = g.tile_count() - out.grid.tile_count();
        if merges == 0 {
            prop_assert_eq!(out.score_delta, 0);
        }
        if !out.moved {
            prop_assert_eq!(out.grid, g);
            prop_assert_eq!(out.score_delta, 0);
        }
    }

    /// Property: every resolved grid still satisfies the tile invariant
    #[test]
    fn prop_move_keeps_tiles_valid(g in any_grid(), dir in direction()) {
        let out = resolve_move(&g, dir);
        prop_assert!(Grid::from_rows(out.grid.into_rows()).is_ok());
    }

    /// Property: Up is Left on the transposed grid, Down is Right
    #[test]
    fn prop_vertical_moves_mirror_horizontal(g in any_grid()) {
        let t = transpose(&g);

        let up = resolve_move(&g, Direction::Up);
        let left = resolve_move(&t, Direction::Left);
        prop_assert_eq!(up.grid, transpose(&left.grid));
        prop_assert_eq!(up.score_delta, left.score_delta);

        let down = resolve_move(&g, Direction::Down);
        let right = resolve_move(&t, Direction::Right);
        prop_assert_eq!(down.grid, transpose(&right.grid));
        prop_assert_eq!(down.score_delta, right.score_delta);
    }

    /// Property: Right is Left on the half-turned grid
    #[test]
    fn prop_opposite_directions_are_symmetric(g in any_grid()) {
        let right = resolve_move(&g, Direction::Right);
        let left = resolve_move(&g.rotated(2), Direction::Left);
        prop_assert_eq!(right.grid, left.grid.rotated(2));
        prop_assert_eq!(right.score_delta, left.score_delta);
    }

    /// Property: a grid is lost exactly when no direction moves
    #[test]
    fn prop_lost_iff_no_direction_moves(g in crowded_grid()) {
        prop_assume!(!g.is_empty());
        let any_moves = Direction::ALL.iter().any(|&d| resolve_move(&g, d).moved);
        prop_assert_eq!(is_lost(&g), !any_moves);
    }

    /// Property: over any sequence of moves the score never drops, the best
    /// score never trails it, and a no-op leaves the session untouched
    #[test]
    fn prop_engine_invariants_hold_over_play(
        seed in any::<u32>(),
        dirs in prop::collection::vec(direction(), 1..200),
    ) {
        let mut game = Game::new(SimpleRng::new(seed), MemoryStore::new());
        let mut last = game.snapshot();
        for dir in dirs {
            match game.move_tiles(dir) {
                Ok(snap) => {
                    prop_assert!(snap.score >= last.score);
                    prop_assert!(snap.best_score >= snap.score);
                    if snap.moved {
                        prop_assert!(snap.grid().tile_count() >= 1);
                    } else {
                        prop_assert_eq!(snap.grid, last.grid);
                        prop_assert_eq!(snap.score, last.score);
                        prop_assert_eq!(snap.state, last.state);
                    }
                    last = snap;
                }
                Err(GameError::SessionTerminated) => {
                    prop_assert!(is_lost(game.grid()));
                    break;
                }
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
    }
}
