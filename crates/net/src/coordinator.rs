//! Multiplayer coordinator
//!
//! Wraps a [`GameEngine`] running on a remote piece feed and keeps it in step
//! with the server:
//!
//! - on start it asks for the leaderboard and the first two pieces
//! - after every placement it publishes the board and asks for one piece
//! - each delivered piece completes the pending move; the new score is pushed
//! - a timeout publishes the new lives count, or `DIE` when none are left
//!
//! Outbound lines queue up until the transport takes them with
//! [`MultiplayerCoordinator::take_outbound`].

use crate::core::{GameEngine, GameEvent, MoveOutcome};
use crate::protocol::{parse_message, ClientMessage, LeaderboardEntry, ServerMessage};
use crate::types::GameAction;

/// A chat line received during the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub sender: String,
    pub text: String,
}

#[derive(Debug)]
pub struct MultiplayerCoordinator {
    engine: GameEngine,
    outbox: Vec<ClientMessage>,
    leaderboard: Vec<LeaderboardEntry>,
    chat: Vec<ChatLine>,
}

impl MultiplayerCoordinator {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            engine: GameEngine::remote(cols, rows),
            outbox: Vec::new(),
            leaderboard: Vec::new(),
            chat: Vec::new(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn chat(&self) -> &[ChatLine] {
        &self.chat
    }

    /// Enter the running state and request the opening pieces
    pub fn start(&mut self) {
        if !self.engine.is_running() && !self.engine.is_game_over() {
            self.engine.start();
            self.send(ClientMessage::Scores);
            self.send(ClientMessage::Piece);
            self.send(ClientMessage::Piece);
        }
    }

    /// Take queued outbound messages, oldest first
    pub fn take_outbound(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.engine.take_events()
    }

    /// Handle one inbound line; malformed or unknown messages are ignored
    pub fn handle_line(&mut self, line: &str) {
        match parse_message(line) {
            Ok(message) => self.handle_message(message),
            Err(e) => tracing::debug!(error = %e, line, "ignoring server message"),
        }
    }

    pub fn handle_message(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Piece(piece) => {
                if let Some(result) = self.engine.receive_piece(piece) {
                    tracing::debug!(delta = result.delta, score = self.engine.score(), "move scored");
                    self.send(ClientMessage::Score(self.engine.score()));
                    self.send(ClientMessage::Scores);
                }
            }
            ServerMessage::Scores(entries) => self.leaderboard = entries,
            ServerMessage::Msg { sender, text } => self.chat.push(ChatLine { sender, text }),
            ServerMessage::Error(text) => tracing::warn!(%text, "server error"),
            other => tracing::debug!(msg = ?other, "message not used in game"),
        }
    }

    /// Place the current piece with its anchor at (x, y)
    pub fn place_at(&mut self, x: i32, y: i32) -> bool {
        let placed = self.engine.place_at(x, y);
        self.flush_outcome();
        placed
    }

    /// Advance the countdown by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let fired = self.engine.tick(elapsed_ms);
        self.flush_outcome();
        fired
    }

    /// Send a chat line
    pub fn say(&mut self, text: impl Into<String>) {
        self.send(ClientMessage::Msg(text.into()));
    }

    /// Apply a local action and publish whatever it changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let applied = match action {
            GameAction::ForceGameOver => {
                let ended = self.engine.force_game_over();
                if ended {
                    self.send(ClientMessage::Die);
                }
                ended
            }
            other => self.engine.apply_action(other),
        };
        self.flush_outcome();
        applied
    }

    /// Tear down the wrapped engine
    pub fn end(&mut self) {
        self.engine.end();
    }

    fn flush_outcome(&mut self) {
        match self.engine.take_last_outcome() {
            Some(MoveOutcome::Placed { .. }) => self.publish_move(),
            Some(MoveOutcome::TimedOut { game_over: true, .. }) => {
                self.send(ClientMessage::Die);
            }
            Some(MoveOutcome::TimedOut { lives, .. }) => {
                self.publish_move();
                self.send(ClientMessage::Lives(lives));
                self.send(ClientMessage::Scores);
            }
            None => {}
        }
    }

    fn publish_move(&mut self) {
        let board = self.engine.grid().cells().to_vec();
        self.send(ClientMessage::Board(board));
        self.send(ClientMessage::Piece);
    }

    fn send(&mut self, message: ClientMessage) {
        tracing::trace!(%message, "queue outbound");
        self.outbox.push(message);
    }
}
