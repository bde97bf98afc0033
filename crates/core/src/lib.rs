//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and the bot.
//! It has **no dependencies** on a UI, networking, or wall-clock time, making it:
//!
//! - **Deterministic**: Same seed produces identical games (for bot runs)
//! - **Testable**: Unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, headless, network client)
//!
//! # Module Structure
//!
//! - [`grid`]: cols x rows board, placement validation and line clearing
//! - [`pieces`]: the 15 catalog shapes as 3x3 patterns, clockwise rotation
//! - [`game_state`]: the engine (pieces, cursor, score, level, lives, countdown)
//! - [`scoring`]: clear award, multiplier, levels and countdown period
//! - [`countdown`]: the per-move one-shot timer
//! - [`bot`]: heuristic placement search
//! - [`events`]: notifications drained by renderers and network wrappers
//! - [`rng`]: seeded piece generation
//! - [`hiscores`]: high-score table and text-file store
//!
//! # Game Rules
//!
//! - Pieces are placed anywhere they fit; there is no gravity.
//! - After each placement every full row and column touched by the piece is
//!   cleared at once.
//! - Consecutive clearing moves raise the multiplier; a move that clears
//!   nothing resets it to 1.
//! - Each move must happen before the countdown runs out, otherwise a life is
//!   lost and the pieces advance. Losing a life with none left ends the game.
//!
//! # Example
//!
//! ```
//! use tetrecs_core::GameEngine;
//! use tetrecs_types::{Direction, GameAction};
//!
//! let mut game = GameEngine::new(5, 5, 12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveCursor(Direction::Right));
//! game.apply_action(GameAction::MoveCursor(Direction::Down));
//! game.apply_action(GameAction::InvokeBot);
//!
//! assert_eq!(game.moves(), 1);
//! ```
//!
//! # Timing
//!
//! The engine does not read the clock. Call
//! [`GameEngine::tick`](game_state::GameEngine::tick) with elapsed time; the
//! countdown period is `12000 - 500 * level` ms, never below 2500 ms.

pub mod bot;
pub mod countdown;
pub mod events;
pub mod game_state;
pub mod grid;
pub mod hiscores;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetrecs_types as types;

// Re-export commonly used types for convenience
pub use bot::{think, BotMove};
pub use countdown::Countdown;
pub use events::{EventQueue, GameEvent};
pub use game_state::{GameEngine, MoveOutcome, PieceFeed, Phase};
pub use grid::{ClearedLines, Grid};
pub use hiscores::{FileScoreStore, HighScore, HighScoreTable, ScoreStore, ScoreStoreError};
pub use pieces::{create_piece, Piece};
pub use rng::{RandomPieces, SimpleRng};
pub use scoring::{calculate_score, countdown_period_ms, ScoreResult};
pub use snapshot::GameSnapshot;
