use serde::Serialize;

use crate::game_state::Phase;
use crate::pieces::Piece;

/// Read-only view of a game, for rendering and JSON export
///
/// `board` is row-major: the value at (x, y) is `board[y * cols + x]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub cols: usize,
    pub rows: usize,
    pub board: Vec<u8>,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub cursor: (usize, usize),
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub multiplier: u32,
    pub level_progress: u32,
    pub phase: Phase,
    pub countdown_period_ms: u32,
    pub countdown_remaining_ms: u32,
    pub preview_visible: bool,
    /// Whether the current piece fits at the cursor (placement preview)
    pub current_fits_at_cursor: bool,
    pub moves: u32,
}

impl GameSnapshot {
    /// Value at (x, y), or None outside the board
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.board.get(y * self.cols + x).copied()
    }

    pub fn filled_count(&self) -> usize {
        self.board.iter().filter(|&&v| v != 0).count()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}
