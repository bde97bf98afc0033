//! Game state module - the game engine
//!
//! This module ties together all core components: grid, pieces, RNG, scoring
//! and the countdown. It handles piece lifecycle, cursor and click placement,
//! scoring and levels, lives, and game-over detection.
//!
//! Pieces come from a [`PieceFeed`]. A local feed draws from a seeded RNG as
//! soon as a piece is consumed. A remote feed leaves the slot to be filled by
//! [`GameEngine::receive_piece`]; the multiplayer coordinator uses this to
//! play the shared network sequence. After a remote placement the countdown is
//! paused and the engine waits for the replacement piece before scoring the
//! move and re-arming it.

use crate::bot::{self, BotMove};
use crate::countdown::Countdown;
use crate::events::{EventQueue, GameEvent};
use crate::grid::{ClearedLines, Grid};
use crate::pieces::Piece;
use crate::rng::RandomPieces;
use crate::scoring::{apply_level_progress, calculate_score, countdown_period_ms, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::types::*;

use serde::Serialize;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Initializing,
    Running,
    GameOver,
}

/// Where new pieces come from
#[derive(Debug, Clone)]
pub enum PieceFeed {
    /// Drawn locally from a seeded generator
    Local(RandomPieces),
    /// Delivered from outside via [`GameEngine::receive_piece`]
    Remote,
}

/// What the last completed move did (consumed by wrappers)
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// A piece was placed. `score` is None while a remote replacement piece
    /// is still pending.
    Placed {
        cleared: ClearedLines,
        score: Option<ScoreResult>,
    },
    /// The countdown ran out
    TimedOut { lives: i32, game_over: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    grid: Grid,
    feed: PieceFeed,
    phase: Phase,
    current: Option<Piece>,
    next: Option<Piece>,
    score: u32,
    level: u32,
    lives: i32,
    multiplier: u32,
    /// Points carried toward the next level (always below the threshold)
    level_progress: u32,
    cursor_x: usize,
    cursor_y: usize,
    countdown: Countdown,
    preview_visible: bool,
    /// Remote feed: a placement happened and its replacement piece is pending
    awaiting_piece: bool,
    pending_clear: ClearedLines,
    moves: u32,
    events: EventQueue,
    last_outcome: Option<MoveOutcome>,
}

impl GameEngine {
    /// Create a single-player game with the given board size and RNG seed
    pub fn new(cols: usize, rows: usize, seed: u32) -> Self {
        Self::with_feed(cols, rows, PieceFeed::Local(RandomPieces::new(seed)))
    }

    /// Create a game whose pieces are delivered from outside
    pub fn remote(cols: usize, rows: usize) -> Self {
        Self::with_feed(cols, rows, PieceFeed::Remote)
    }

    /// Create a game fed by `feed`
    ///
    /// A board needs at least one column and one row; smaller sizes are
    /// raised to one.
    pub fn with_feed(cols: usize, rows: usize, feed: PieceFeed) -> Self {
        if cols == 0 || rows == 0 {
            tracing::warn!(cols, rows, "empty board requested; using at least 1x1");
        }
        let (cols, rows) = (cols.max(1), rows.max(1));
        Self {
            grid: Grid::new(cols, rows),
            feed,
            phase: Phase::Initializing,
            current: None,
            next: None,
            score: 0,
            level: STARTING_LEVEL,
            lives: STARTING_LIVES,
            multiplier: 1,
            level_progress: 0,
            cursor_x: 0,
            cursor_y: 0,
            countdown: Countdown::new(),
            preview_visible: false,
            awaiting_piece: false,
            pending_clear: ClearedLines::default(),
            moves: 0,
            events: EventQueue::new(),
            last_outcome: None,
        }
    }

    /// Reset the counters, fill both piece slots and start the countdown
    ///
    /// With a remote feed the slots stay empty and the countdown stays idle
    /// until two pieces have been received.
    pub fn start(&mut self) {
        if self.phase != Phase::Initializing {
            return;
        }
        tracing::info!(
            cols = self.grid.cols(),
            rows = self.grid.rows(),
            "starting game"
        );

        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lives = STARTING_LIVES;
        self.multiplier = 1;
        self.level_progress = 0;
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.phase = Phase::Running;

        if let PieceFeed::Local(source) = &mut self.feed {
            self.current = Some(source.draw());
            self.next = Some(source.draw());
            self.notify_pieces();
            self.restart_countdown();
        }
        self.notify_state();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct board access (for tests and fixtures)
    #[cfg(any(test, feature = "test-hooks"))]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn level_progress(&self) -> u32 {
        self.level_progress
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn awaiting_piece(&self) -> bool {
        self.awaiting_piece
    }

    /// Pieces placed so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Countdown period for the current level
    pub fn time_period_ms(&self) -> u32 {
        countdown_period_ms(self.level)
    }

    /// Take all notifications recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Take and clear the outcome of the last completed move
    pub fn take_last_outcome(&mut self) -> Option<MoveOutcome> {
        self.last_outcome.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            board: self.grid.cells().to_vec(),
            current: self.current,
            next: self.next,
            cursor: (self.cursor_x, self.cursor_y),
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
            level_progress: self.level_progress,
            phase: self.phase,
            countdown_period_ms: self.countdown.period_ms(),
            countdown_remaining_ms: self.countdown.remaining_ms(),
            preview_visible: self.preview_visible,
            current_fits_at_cursor: self
                .can_place_current(self.cursor_x as i32, self.cursor_y as i32),
            moves: self.moves,
        }
    }

    /// Whether the current piece fits with its anchor at (x, y)
    pub fn can_place_current(&self, x: i32, y: i32) -> bool {
        match &self.current {
            Some(piece) => self.grid.can_place(piece, x, y),
            None => false,
        }
    }

    /// Place the current piece with its anchor at (x, y)
    ///
    /// Returns false, changing nothing, if the game is not running, a remote
    /// replacement piece is pending, or the piece does not fit.
    pub fn place_at(&mut self, x: i32, y: i32) -> bool {
        if self.phase != Phase::Running || self.awaiting_piece {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        if self.next.is_none() || !self.can_place_current(x, y) {
            tracing::debug!(x, y, "placement rejected");
            return false;
        }

        tracing::info!(kind = piece.kind().as_str(), x, y, "placing piece");
        self.grid.place(&piece, x, y);
        let cleared = self.grid.resolve_clears();
        self.moves = self.moves.wrapping_add(1);
        if !cleared.is_empty() {
            self.events.push(GameEvent::LinesCleared(cleared.clone()));
        }

        let score = self.finish_move(cleared.clone());
        self.last_outcome = Some(MoveOutcome::Placed { cleared, score });
        true
    }

    /// Place the current piece at the cursor
    pub fn place_at_cursor(&mut self) -> bool {
        self.place_at(self.cursor_x as i32, self.cursor_y as i32)
    }

    /// Rotate the piece in `slot` 90° clockwise
    ///
    /// Does not touch the countdown.
    pub fn rotate_piece(&mut self, slot: PieceSlot) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let target = match slot {
            PieceSlot::Current => &mut self.current,
            PieceSlot::Next => &mut self.next,
        };
        let Some(piece) = target.as_mut() else {
            return false;
        };
        piece.rotate();
        let piece = *piece;
        self.events.push(GameEvent::PieceChanged { piece, slot });
        true
    }

    pub fn rotate_current(&mut self) -> bool {
        self.rotate_piece(PieceSlot::Current)
    }

    /// Exchange current and next piece
    ///
    /// Does not touch the countdown or the score.
    pub fn swap(&mut self) -> bool {
        if self.phase != Phase::Running || self.current.is_none() || self.next.is_none() {
            return false;
        }
        std::mem::swap(&mut self.current, &mut self.next);
        self.notify_pieces();
        true
    }

    /// Move the cursor one cell, wrapping at the board edges
    pub fn move_cursor(&mut self, direction: Direction) -> (usize, usize) {
        let cols = self.grid.cols() as i32;
        let rows = self.grid.rows() as i32;
        let (dx, dy) = direction.delta();
        self.cursor_x = (self.cursor_x as i32 + dx).rem_euclid(cols) as usize;
        self.cursor_y = (self.cursor_y as i32 + dy).rem_euclid(rows) as usize;

        self.events.push(GameEvent::CursorMoved {
            x: self.cursor_x,
            y: self.cursor_y,
        });
        (self.cursor_x, self.cursor_y)
    }

    /// Show or hide the placement preview
    pub fn toggle_preview(&mut self) -> bool {
        self.preview_visible = !self.preview_visible;
        self.events
            .push(GameEvent::PreviewToggled(self.preview_visible));
        self.preview_visible
    }

    /// Ask the bot for a move and play it
    ///
    /// Returns false if no piece fits anywhere or no move can be made now.
    pub fn play_bot(&mut self) -> bool {
        if self.phase != Phase::Running || self.awaiting_piece {
            return false;
        }
        let (Some(current), Some(next)) = (self.current, self.next) else {
            return false;
        };
        match bot::think(&self.grid, &current, &next) {
            Some(mv) => self.apply_bot_move(mv),
            None => false,
        }
    }

    /// Apply a move chosen by the bot through the normal placement path
    pub fn apply_bot_move(&mut self, mv: BotMove) -> bool {
        let (Some(current), Some(next)) = (self.current, self.next) else {
            return false;
        };
        let piece = match mv.slot {
            PieceSlot::Current => current,
            PieceSlot::Next => next,
        };
        if !self.grid.can_place(&piece.rotated(mv.rotations), mv.x, mv.y) {
            return false;
        }

        if mv.slot == PieceSlot::Next {
            self.swap();
        }
        for _ in 0..mv.rotations % 4 {
            self.rotate_current();
        }
        self.place_at(mv.x, mv.y)
    }

    /// Advance the countdown by `elapsed_ms`
    ///
    /// Returns true if the countdown ran out during this call.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        if self.countdown.tick(elapsed_ms) {
            self.on_timeout();
            return true;
        }
        false
    }

    /// Lose a life for an expired countdown
    ///
    /// The board is left as it is; only the per-move line tracking is reset.
    fn on_timeout(&mut self) {
        self.grid.clear_tracking();
        self.lives -= 1;
        tracing::info!(lives = self.lives, "countdown expired");

        if self.lives < 0 {
            self.enter_game_over();
            self.notify_state();
            self.last_outcome = Some(MoveOutcome::TimedOut {
                lives: self.lives,
                game_over: true,
            });
            return;
        }

        self.finish_move(ClearedLines::default());
        self.last_outcome = Some(MoveOutcome::TimedOut {
            lives: self.lives,
            game_over: false,
        });
    }

    /// End the game now (from input or an external decision)
    pub fn force_game_over(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        self.enter_game_over();
        true
    }

    /// Tear down: cancel the countdown and detach notifications
    ///
    /// Safe to call repeatedly.
    pub fn end(&mut self) {
        if self.countdown.cancel() {
            tracing::debug!("countdown cancelled on teardown");
        }
        self.phase = Phase::GameOver;
        self.events.detach();
    }

    fn enter_game_over(&mut self) {
        self.countdown.cancel();
        self.phase = Phase::GameOver;
        tracing::info!(score = self.score, level = self.level, "game over");
        self.events.push(GameEvent::GameOver);
    }

    /// Deliver a piece from a remote feed
    ///
    /// The first two pieces fill the slots and start the countdown. Later
    /// pieces complete the pending move: current takes next, the new piece
    /// becomes next, the move is scored and the countdown re-armed.
    pub fn receive_piece(&mut self, piece: Piece) -> Option<ScoreResult> {
        if self.phase != Phase::Running {
            tracing::debug!("piece received outside a running game");
            return None;
        }

        let bootstrapping = self.current.is_none();
        self.current = self.next.take();
        self.next = Some(piece);

        if bootstrapping {
            if self.current.is_some() {
                self.notify_pieces();
                self.restart_countdown();
            }
            return None;
        }

        let cleared = std::mem::take(&mut self.pending_clear);
        self.awaiting_piece = false;
        let result = self.apply_score(&cleared);
        self.notify_pieces();
        self.restart_countdown();
        self.notify_state();
        Some(result)
    }

    fn finish_move(&mut self, cleared: ClearedLines) -> Option<ScoreResult> {
        match &mut self.feed {
            PieceFeed::Local(source) => {
                self.current = self.next.take();
                self.next = Some(source.draw());
                let result = self.apply_score(&cleared);
                self.notify_pieces();
                self.restart_countdown();
                self.notify_state();
                Some(result)
            }
            PieceFeed::Remote => {
                // Paused until the replacement piece re-arms it.
                self.countdown.cancel();
                self.pending_clear = cleared;
                self.awaiting_piece = true;
                self.notify_state();
                None
            }
        }
    }

    fn apply_score(&mut self, cleared: &ClearedLines) -> ScoreResult {
        let result = calculate_score(
            cleared,
            self.grid.cols(),
            self.grid.rows(),
            self.multiplier,
        );
        self.score += result.delta;
        let (progress, level) = apply_level_progress(self.level_progress, self.level, result.delta);
        if level != self.level {
            tracing::info!(level, "level up");
        }
        self.level_progress = progress;
        self.level = level;
        self.multiplier = result.next_multiplier;
        result
    }

    fn restart_countdown(&mut self) {
        let period_ms = countdown_period_ms(self.level);
        self.countdown.arm(period_ms);
        self.events.push(GameEvent::TimerUpdated { period_ms });
    }

    fn notify_pieces(&mut self) {
        if let Some(piece) = self.current {
            self.events.push(GameEvent::PieceChanged {
                piece,
                slot: PieceSlot::Current,
            });
        }
        if let Some(piece) = self.next {
            self.events.push(GameEvent::PieceChanged {
                piece,
                slot: PieceSlot::Next,
            });
        }
    }

    fn notify_state(&mut self) {
        self.events.push(GameEvent::StateChanged {
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
        });
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveCursor(direction) => {
                self.move_cursor(direction);
                true
            }
            GameAction::PlaceAtCursor => self.place_at_cursor(),
            GameAction::RotateCurrent => self.rotate_current(),
            GameAction::Swap => self.swap(),
            GameAction::TogglePreview => {
                self.toggle_preview();
                true
            }
            GameAction::InvokeBot => self.play_bot(),
            GameAction::ForceGameOver => self.force_game_over(),
            GameAction::QuitToMenu => {
                self.end();
                true
            }
        }
    }

    /// Set the counters directly (for tests and fixtures)
    #[cfg(any(test, feature = "test-hooks"))]
    pub fn set_counters(&mut self, level: u32, level_progress: u32, multiplier: u32) {
        self.level = level;
        self.level_progress = level_progress;
        self.multiplier = multiplier;
    }

    /// Replace a piece slot directly (for tests and fixtures)
    #[cfg(any(test, feature = "test-hooks"))]
    pub fn set_piece(&mut self, slot: PieceSlot, piece: Piece) {
        match slot {
            PieceSlot::Current => self.current = Some(piece),
            PieceSlot::Next => self.next = Some(piece),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameEngine {
        let mut engine = GameEngine::new(5, 5, seed);
        engine.start();
        engine
    }

    #[test]
    fn test_new_engine_is_initializing() {
        let engine = GameEngine::new(5, 5, 12345);
        assert_eq!(engine.phase(), Phase::Initializing);
        assert!(engine.current_piece().is_none());
        assert!(!engine.countdown().is_armed());
    }

    #[test]
    fn test_start_resets_counters_and_arms_countdown() {
        let engine = started(12345);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.lives(), 3);
        assert_eq!(engine.multiplier(), 1);
        assert_eq!(engine.level_progress(), 0);
        assert_eq!(engine.cursor(), (0, 0));
        assert!(engine.current_piece().is_some());
        assert!(engine.next_piece().is_some());
        assert!(engine.countdown().is_armed());
        assert_eq!(engine.countdown().period_ms(), 11_500);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut engine = started(1);
        engine.move_cursor(Direction::Right);
        engine.start();
        assert_eq!(engine.cursor(), (1, 0));
    }

    #[test]
    fn test_place_advances_pieces() {
        let mut engine = started(7);
        engine.set_piece(PieceSlot::Current, Piece::new(PieceKind::Dot));
        let next = *engine.next_piece().unwrap();

        assert!(engine.place_at(2, 2));
        assert_eq!(engine.current_piece(), Some(&next));
        assert_eq!(engine.grid().get(2, 2), PieceKind::Dot.color() as i32);
        assert_eq!(engine.moves(), 1);
        assert!(matches!(
            engine.take_last_outcome(),
            Some(MoveOutcome::Placed { score: Some(_), .. })
        ));
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let mut engine = started(7);
        engine.set_piece(PieceSlot::Current, Piece::new(PieceKind::Plus));
        engine.tick(1_000);
        let before = engine.snapshot();
        let remaining = engine.countdown().remaining_ms();

        // Plus anchored on a corner hangs off the board.
        assert!(!engine.place_at(0, 0));
        assert_eq!(engine.snapshot().board, before.board);
        assert_eq!(engine.current_piece(), before.current.as_ref());
        assert_eq!(engine.countdown().remaining_ms(), remaining);
        assert!(engine.take_last_outcome().is_none());
    }

    #[test]
    fn test_rotate_does_not_rearm_countdown() {
        let mut engine = started(3);
        engine.tick(2_000);
        let generation = engine.countdown().generation();
        assert!(engine.rotate_current());
        assert_eq!(engine.countdown().generation(), generation);
        assert_eq!(engine.countdown().remaining_ms(), 9_500);
    }

    #[test]
    fn test_swap_exchanges_without_scoring() {
        let mut engine = started(3);
        let a = *engine.current_piece().unwrap();
        let b = *engine.next_piece().unwrap();
        let generation = engine.countdown().generation();
        assert!(engine.swap());
        assert_eq!(engine.current_piece(), Some(&b));
        assert_eq!(engine.next_piece(), Some(&a));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.countdown().generation(), generation);
    }

    #[test]
    fn test_timeout_costs_life_and_keeps_board() {
        let mut engine = started(5);
        engine.set_piece(PieceSlot::Current, Piece::new(PieceKind::Dot));
        assert!(engine.place_at(4, 4));
        let board = engine.grid().cells().to_vec();
        let next = *engine.next_piece().unwrap();

        assert!(engine.tick(11_500));
        assert_eq!(engine.lives(), 2);
        assert_eq!(engine.grid().cells(), board.as_slice());
        assert_eq!(engine.current_piece(), Some(&next));
        assert!(engine.countdown().is_armed());
        assert_eq!(engine.multiplier(), 1);
    }

    #[test]
    fn test_fourth_timeout_ends_game() {
        let mut engine = started(5);
        for expected in [2, 1, 0] {
            assert!(engine.tick(20_000));
            assert_eq!(engine.lives(), expected);
            assert!(engine.is_running());
        }
        engine.take_events();
        assert!(engine.tick(20_000));
        assert_eq!(engine.lives(), -1);
        assert!(engine.is_game_over());
        assert!(!engine.countdown().is_armed());
        assert!(engine.take_events().contains(&GameEvent::GameOver));
        assert_eq!(
            engine.take_last_outcome(),
            Some(MoveOutcome::TimedOut {
                lives: -1,
                game_over: true
            })
        );
    }

    #[test]
    fn test_cursor_wraps() {
        let mut engine = started(1);
        assert_eq!(engine.move_cursor(Direction::Left), (4, 0));
        assert_eq!(engine.move_cursor(Direction::Right), (0, 0));
        assert_eq!(engine.move_cursor(Direction::Up), (0, 4));
        assert_eq!(engine.move_cursor(Direction::Down), (0, 0));
    }

    #[test]
    fn test_zero_sized_board_is_raised_to_one_cell() {
        let mut engine = GameEngine::new(0, 0, 1);
        engine.start();
        assert_eq!((engine.grid().cols(), engine.grid().rows()), (1, 1));
        assert_eq!(engine.move_cursor(Direction::Left), (0, 0));
        assert_eq!(engine.move_cursor(Direction::Down), (0, 0));

        let mut engine = GameEngine::remote(3, 0);
        engine.start();
        assert_eq!((engine.grid().cols(), engine.grid().rows()), (3, 1));
        assert_eq!(engine.move_cursor(Direction::Up), (0, 0));
    }

    #[test]
    fn test_can_place_current_and_cursor_preview() {
        let mut engine = GameEngine::new(5, 5, 1);
        assert!(!engine.can_place_current(2, 2));
        engine.start();
        engine.set_piece(PieceSlot::Current, Piece::new(PieceKind::Plus));

        // Cursor starts on a corner where the plus hangs off the board.
        assert!(!engine.can_place_current(0, 0));
        assert!(!engine.snapshot().current_fits_at_cursor);

        engine.move_cursor(Direction::Right);
        engine.move_cursor(Direction::Down);
        assert!(engine.can_place_current(1, 1));
        assert!(engine.snapshot().current_fits_at_cursor);

        engine.grid_mut().set(1, 2, 1);
        assert!(!engine.can_place_current(1, 1));
        assert!(!engine.snapshot().current_fits_at_cursor);
    }

    #[test]
    fn test_end_is_idempotent_and_detaches() {
        let mut engine = started(1);
        engine.end();
        engine.end();
        assert!(!engine.countdown().is_armed());
        assert!(engine.is_game_over());
        engine.toggle_preview();
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_remote_bootstrap_needs_two_pieces() {
        let mut engine = GameEngine::remote(5, 5);
        engine.start();
        assert!(engine.current_piece().is_none());
        assert!(!engine.countdown().is_armed());
        assert!(!engine.place_at(2, 2));

        assert_eq!(engine.receive_piece(Piece::new(PieceKind::Dot)), None);
        assert!(engine.current_piece().is_none());
        assert!(!engine.countdown().is_armed());

        assert_eq!(engine.receive_piece(Piece::new(PieceKind::Line)), None);
        assert_eq!(engine.current_piece().map(|p| p.kind()), Some(PieceKind::Dot));
        assert_eq!(engine.next_piece().map(|p| p.kind()), Some(PieceKind::Line));
        assert!(engine.countdown().is_armed());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_remote_placement_waits_for_piece() {
        let mut engine = GameEngine::remote(5, 5);
        engine.start();
        engine.receive_piece(Piece::new(PieceKind::Dot));
        engine.receive_piece(Piece::new(PieceKind::Dot));

        assert!(engine.place_at(0, 0));
        assert!(engine.awaiting_piece());
        assert!(!engine.countdown().is_armed());
        assert!(!engine.place_at(1, 1));

        let result = engine.receive_piece(Piece::new(PieceKind::Square));
        assert_eq!(result.map(|r| r.delta), Some(0));
        assert!(!engine.awaiting_piece());
        assert_eq!(engine.next_piece().map(|p| p.kind()), Some(PieceKind::Square));
    }
}
