//! Protocol module - JSON message types for the headless adapter
//!
//! Line-delimited JSON: one command object per input line, one response object
//! per output line. Every response carries `type` and a monotonically
//! increasing `seq`.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameSnapshot};
use crate::types::{Cell, GameState, Score, TileValue, GRID_SIZE};

// ============== Client -> Game Messages ==============

/// Direction argument of a `move` command: a name (`"left"`, `"l"`) or a
/// numeric code (`0 = up`, `1 = down`, `2 = left`, `3 = right`).
///
/// Codes decode as any JSON integer so that out-of-range values, negative or
/// not, are reported as `invalid_direction` rather than `bad_request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectionArg {
    Code(i64),
    Name(String),
}

/// Inbound command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    #[serde(rename = "move")]
    Move { direction: DirectionArg },
    #[serde(rename = "newGame")]
    NewGame,
    #[serde(rename = "continue")]
    Continue,
    #[serde(rename = "snapshot")]
    Snapshot,
    #[serde(rename = "settle")]
    Settle,
    /// Replace the session with a saved grid; `0` marks an empty cell.
    #[serde(rename = "restore")]
    Restore {
        grid: Vec<Vec<TileValue>>,
        #[serde(default)]
        score: Score,
    },
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, serde_json::Error> {
    serde_json::from_str(line)
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_direction")]
    InvalidDirection,
    #[serde(rename = "session_terminated")]
    SessionTerminated,
    #[serde(rename = "busy")]
    Busy,
    #[serde(rename = "illegal_continuation")]
    IllegalContinuation,
    #[serde(rename = "invalid_grid")]
    InvalidGrid,
    #[serde(rename = "bad_request")]
    BadRequest,
}

impl From<&GameError> for ErrorCode {
    fn from(err: &GameError) -> Self {
        match err {
            GameError::InvalidDirection(_) => Self::InvalidDirection,
            GameError::SessionTerminated => Self::SessionTerminated,
            GameError::Busy => Self::Busy,
            GameError::IllegalContinuation(_) => Self::IllegalContinuation,
            GameError::InvalidGrid(_) => Self::InvalidGrid,
        }
    }
}

/// Game state after a command (or on request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub seq: u64,
    pub grid: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub score: Score,
    pub best_score: Score,
    pub state: GameState,
    pub moved: bool,
}

/// Rejected command. The session is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    #[serde(rename = "snapshot")]
    Snapshot(SnapshotMessage),
    #[serde(rename = "error")]
    Error(ErrorMessage),
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Snapshot(m) => m.seq,
            Response::Error(m) => m.seq,
        }
    }
}

// ============== Utility Functions ==============

/// Create a snapshot message
pub fn create_snapshot(seq: u64, snap: &GameSnapshot) -> Response {
    Response::Snapshot(SnapshotMessage {
        seq,
        grid: snap.grid,
        score: snap.score,
        best_score: snap.best_score,
        state: snap.state,
        moved: snap.moved,
    })
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> Response {
    Response::Error(ErrorMessage {
        seq,
        code,
        message: message.to_string(),
    })
}
