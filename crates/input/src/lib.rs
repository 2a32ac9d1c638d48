//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. 2048 is
//! turn-based, so there is no repeat or timing logic here: one key press is
//! one action.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
