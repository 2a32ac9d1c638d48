//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

use tui_2048::core::{Game, Grid, MemoryStore, ScriptedRng};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Grid from plain numbers, `0` for empty.
pub fn grid(values: [[u32; 4]; 4]) -> Grid {
    let rows: Vec<Vec<u32>> = values.iter().map(|r| r.to_vec()).collect();
    Grid::from_values(&rows).unwrap()
}

/// A game whose starting tiles and later spawns follow `spawns`
/// (`(index among empty cells, is_four)`); exhausted draws spawn a 2 in the
/// first empty cell.
pub fn scripted_game(spawns: &[(usize, bool)], store: MemoryStore) -> Game<ScriptedRng> {
    let mut rng = ScriptedRng::default();
    for &(index, four) in spawns {
        rng.push_spawn(index, four);
    }
    Game::new(rng, store)
}

/// A game restored to `values` with `score`, spawning per `spawns` afterwards.
pub fn game_at(values: [[u32; 4]; 4], score: u64, spawns: &[(usize, bool)]) -> Game<ScriptedRng> {
    // Two draws are consumed by the starting deal before the restore.
    let mut all = vec![(0, false), (0, false)];
    all.extend_from_slice(spawns);
    let mut game = scripted_game(&all, MemoryStore::new());
    game.restore(grid(values), score).unwrap();
    game
}
