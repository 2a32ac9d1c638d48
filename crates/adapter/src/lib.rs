//! Adapter module - scripted and AI control via a line-delimited JSON protocol
//!
//! The adapter drives a [`core::Game`] from any `BufRead`/`Write` pair. The
//! binary wires it to stdin/stdout with `--headless`; tests wire it to byte
//! buffers.
//!
//! # Protocol Overview
//!
//! 1. On start the adapter writes a `snapshot` of the freshly dealt session
//! 2. Each input line is one command; each command gets exactly one response
//! 3. Responses are either a `snapshot` or an `error`; errors never end the session
//!
//! # Message Types
//!
//! ## Client → Game
//!
//! - **move**: `{"type":"move","direction":"left"}` (names, `u/d/l/r`, or codes `0..=3`)
//! - **newGame**: deal a new session
//! - **continue**: keep playing after a win
//! - **snapshot**: report the current state without changing it
//! - **settle**: release the busy hold after an animated move
//! - **restore**: `{"type":"restore","grid":[[..]],"score":N}` with `0` for empty cells
//!
//! ## Game → Client
//!
//! - **snapshot**: `seq`, `grid` (`null` for empty cells), `score`, `best_score`, `state`, `moved`
//! - **error**: `seq`, `code`, `message`
//!
//! # Example Protocol Flow
//!
//! ```text
//! Game   -> Client: {"type":"snapshot","seq":1,"grid":[[2,2,null,null],...],"score":0,"best_score":0,"state":"idle","moved":false}
//! Client -> Game:   {"type":"move","direction":"left"}
//! Game   -> Client: {"type":"snapshot","seq":2,"grid":[[4,null,null,null],...],"score":4,"best_score":4,"state":"playing","moved":true}
//! Client -> Game:   {"type":"continue"}
//! Game   -> Client: {"type":"error","seq":3,"code":"illegal_continuation","message":"..."}
//! ```

pub mod protocol;
pub mod session;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use protocol::{parse_command, Command, DirectionArg, ErrorCode, Response};
pub use session::{run, Session};
