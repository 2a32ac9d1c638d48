//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every 2048 rule: the grid, move resolution, tile spawning,
//! win/loss detection, scoring and the session orchestrator. It never touches
//! a terminal or a socket. The only outside world it sees is a
//! [`RandomSource`] and a [`BestScoreStore`], both injected by the host, so:
//!
//! - **Deterministic**: a seeded or scripted RNG replays a game exactly
//! - **Testable**: every piece is a pure function over a [`Grid`] value
//! - **Portable**: the same engine drives the terminal UI and the headless protocol
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 value-type grid, validation and rotation
//! - [`moves`]: slide-and-merge for a single direction
//! - [`spawn`]: random tile placement (2 at 90%, 4 at 10%)
//! - [`rules`]: win and loss detection, state transitions
//! - [`scoring`]: running score and persisted best score
//! - [`store`]: best-score stores (in memory, JSON file)
//! - [`rng`]: randomness sources (seeded LCG, scripted replay)
//! - [`game`]: the [`Game`] orchestrator
//!
//! # Rules
//!
//! - A move slides every tile toward one edge; equal neighbours merge once per move
//! - Each merge adds the merged tile's value to the score
//! - A move that changes the grid spawns exactly one tile; a move that doesn't is a no-op
//! - Reaching 2048 wins (once per session); a full grid with no equal neighbours loses
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{Game, MemoryStore, ScriptedRng};
//! use tui_2048_types::{Direction, GameState};
//!
//! // Starting tiles: a 2 at (0,0) and a 2 at (0,1).
//! let mut rng = ScriptedRng::default();
//! rng.push_spawn(0, false).push_spawn(0, false);
//! let mut game = Game::new(rng, MemoryStore::new());
//!
//! let snap = game.move_tiles(Direction::Left).unwrap();
//! assert!(snap.moved);
//! assert_eq!(snap.score, 4);
//! assert_eq!(snap.grid[0][0], Some(4));
//! assert_eq!(snap.state, GameState::Playing);
//! ```

pub mod error;
pub mod game;
pub mod grid;
pub mod moves;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod spawn;
pub mod store;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use error::{GameError, GridError, StoreError};
pub use game::{Game, GameConfig};
pub use grid::Grid;
pub use moves::{legal_moves, resolve_move, slide_row_left, MoveOutcome};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use rules::{has_adjacent_pair, has_winning_tile, is_lost, next_state};
pub use scoring::ScoreTracker;
pub use snapshot::GameSnapshot;
pub use spawn::{spawn_tile, spawn_value, starting_grid, Spawned};
pub use store::{BestScoreStore, JsonFileStore, MemoryStore};
