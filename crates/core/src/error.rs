//! Error types for the engine and the best-score store.

use thiserror::Error;

use crate::types::{GameState, TileValue};

/// Rejected operations. None of these mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    #[error("session is over; start a new game")]
    SessionTerminated,

    #[error("a move is still being committed")]
    Busy,

    #[error("continue is only valid after a win (state: {0})")]
    IllegalContinuation(GameState),

    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),
}

impl GameError {
    /// Stable snake_case code used by the headless protocol.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidDirection(_) => "invalid_direction",
            GameError::SessionTerminated => "session_terminated",
            GameError::Busy => "busy",
            GameError::IllegalContinuation(_) => "illegal_continuation",
            GameError::InvalidGrid(_) => "invalid_grid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected 4x4 grid, got {rows} rows (widest {cols})")]
    Shape { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) holds {value}, not a power of two in 2..=2^30")]
    InvalidTile {
        row: usize,
        col: usize,
        value: TileValue,
    },
}

/// Best-score storage failures. Logged by the score tracker, never surfaced to players.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
