//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond parsing and naming, so they
//! can be shared by the engine, the terminal view and the headless protocol.
//!
//! # Grid Dimensions
//!
//! The game is played on a single, fixed grid:
//!
//! - **Size**: 4 rows × 4 columns, row-major, `(row, col)` with `(0, 0)` top-left
//! - **Tiles**: powers of two, minimum 2, unbounded above
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Rows and columns of the grid |
//! | `WIN_TILE` | 2048 | First tile value that surfaces a win |
//! | `STARTING_TILES` | 2 | Tiles placed by a new game |
//! | `SPAWN_TWO_PROBABILITY` | 0.9 | Chance a spawned tile is a 2 (otherwise 4) |
//! | `MAX_TILE` | 2^30 | Largest tile; a pair of these does not merge |
//! | `BEST_SCORE_KEY` | `"bestScore"` | Key used in the best-score store |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GameState, GRID_SIZE, WIN_TILE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.as_str(), "left");
//!
//! // Numeric codes, as used by AI clients
//! assert_eq!(Direction::try_from(0u8), Ok(Direction::Up));
//! assert!(Direction::try_from(9u8).is_err());
//!
//! // Host actions
//! assert_eq!(GameAction::from_str("newGame"), Some(GameAction::NewGame));
//!
//! assert!(GameState::Lost.is_terminal());
//! assert_eq!(GRID_SIZE, 4);
//! assert_eq!(WIN_TILE, 2048);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width and height in cells
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Tile value that surfaces a win
pub const WIN_TILE: TileValue = 2048;

/// Number of tiles placed by a new game
pub const STARTING_TILES: usize = 2;

/// Probability that a spawned tile is a 2; otherwise it is a 4
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Smallest tile the spawner produces
pub const SMALL_TILE: TileValue = 2;

/// Larger tile the spawner produces (10% of spawns)
pub const LARGE_TILE: TileValue = 4;

/// Largest tile a grid may hold. Two of these never merge, so a merge can
/// never leave the `TileValue` range.
pub const MAX_TILE: TileValue = 1 << 30;

/// Key under which the best score lives in the external store
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Value held by an occupied cell: a power of two, at least 2.
pub type TileValue = u32;

/// A cell on the grid
///
/// - `None`: empty cell
/// - `Some(value)`: a tile holding `value`
pub type Cell = Option<TileValue>;

/// Score and best-score counters.
pub type Score = u64;

/// Returns true for values a tile may legally hold: a power of two between 2
/// and [`MAX_TILE`].
///
/// ```
/// use tui_2048_types::is_tile_value;
///
/// assert!(is_tile_value(2));
/// assert!(is_tile_value(4096));
/// assert!(!is_tile_value(1));
/// assert!(!is_tile_value(6));
/// assert!(!is_tile_value(1 << 31));
/// ```
pub fn is_tile_value(value: TileValue) -> bool {
    (SMALL_TILE..=MAX_TILE).contains(&value) && value.is_power_of_two()
}

/// The four directions tiles can slide in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in numeric-code order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Number of 90° clockwise rotations that turn a slide toward this
    /// direction into a slide toward the left edge.
    ///
    /// Rotating back by `(4 - n) % 4` restores the original orientation.
    pub fn clockwise_turns(&self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

/// Numeric code outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDirection(pub u8);

impl TryFrom<u8> for Direction {
    type Error = UnknownDirection;

    /// `0 = Up`, `1 = Down`, `2 = Left`, `3 = Right`.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(code as usize)
            .copied()
            .ok_or(UnknownDirection(code))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a session
///
/// - **Idle**: fresh grid, no move accepted yet
/// - **Playing**: at least one move accepted
/// - **Won**: a tile reached [`WIN_TILE`]; resumable with "continue"
/// - **Lost**: no direction changes the grid; terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::Playing => "playing",
            GameState::Won => "won",
            GameState::Lost => "lost",
        }
    }

    /// `Won` or `Lost`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-level intents, produced by the key map and the headless protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide tiles in a direction
    Move(Direction),
    /// Throw away the current session and start over
    NewGame,
    /// Keep playing after a win
    Continue,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
    /// assert_eq!(GameAction::from_str("continue"), Some(GameAction::Continue));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(dir) = Direction::from_str(s) {
            return Some(GameAction::Move(dir));
        }
        match s.trim().to_lowercase().as_str() {
            "newgame" | "new" | "restart" => Some(GameAction::NewGame),
            "continue" | "keepplaying" => Some(GameAction::Continue),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::NewGame => "newGame",
            GameAction::Continue => "continue",
        }
    }
}
