//! Engine notifications
//!
//! The engine records what changed in an [`EventQueue`]; collaborators
//! (renderers, the multiplayer coordinator, the session driver) drain it after
//! each operation. Detaching the queue on teardown stops recording.

use crate::grid::ClearedLines;
use crate::pieces::Piece;
use crate::types::PieceSlot;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The aim cursor moved
    CursorMoved { x: usize, y: usize },
    /// A piece slot shows a different piece or orientation
    PieceChanged { piece: Piece, slot: PieceSlot },
    /// The countdown was re-armed with this period
    TimerUpdated { period_ms: u32 },
    /// A placement cleared lines (already removed from the grid)
    LinesCleared(ClearedLines),
    /// Score, level, lives or multiplier may have changed
    StateChanged {
        score: u32,
        level: u32,
        lives: i32,
        multiplier: u32,
    },
    /// The placement preview was shown or hidden
    PreviewToggled(bool),
    /// The game reached its terminal state
    GameOver,
}

#[derive(Debug, Clone)]
pub struct EventQueue {
    events: Vec<GameEvent>,
    attached: bool,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            attached: true,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.attached {
            self.events.push(event);
        }
    }

    /// Take all recorded events, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop pending events and stop recording new ones
    pub fn detach(&mut self) {
        self.attached = false;
        self.events.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
