//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Nothing here
//! touches game state; callers feed the actions to the engine or coordinator.

pub mod map;

pub use tetrecs_types as types;

pub use map::{handle_key_event, should_quit};
