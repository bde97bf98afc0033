//! Session runtime.
//!
//! Owns one game and drives it from async sources: local actions, inbound
//! server lines and the countdown deadline. Every mutation happens inside
//! [`run_session`], so the game never needs locking. Elapsed time is measured
//! with the tokio clock, which makes the driver testable with paused time.
//! A renderer follows the game through a `watch` channel of snapshots.

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Duration, Instant};

use crate::coordinator::MultiplayerCoordinator;
use crate::core::{GameEngine, GameEvent, GameSnapshot};
use crate::protocol::ClientMessage;
use crate::types::GameAction;

/// A game the session runtime can drive
pub trait SessionGame {
    fn apply_action(&mut self, action: GameAction) -> bool;
    fn handle_line(&mut self, line: &str);
    fn tick(&mut self, elapsed_ms: u32) -> bool;
    /// Time left on the countdown, if one is pending
    fn deadline_ms(&self) -> Option<u32>;
    fn is_over(&self) -> bool;
    fn take_events(&mut self) -> Vec<GameEvent>;
    fn take_outbound(&mut self) -> Vec<ClientMessage>;
    fn snapshot(&self) -> GameSnapshot;
    fn end(&mut self);
}

impl SessionGame for GameEngine {
    fn apply_action(&mut self, action: GameAction) -> bool {
        GameEngine::apply_action(self, action)
    }

    fn handle_line(&mut self, line: &str) {
        tracing::debug!(line, "single-player session ignores server lines");
    }

    fn tick(&mut self, elapsed_ms: u32) -> bool {
        GameEngine::tick(self, elapsed_ms)
    }

    fn deadline_ms(&self) -> Option<u32> {
        let countdown = self.countdown();
        countdown.is_armed().then(|| countdown.remaining_ms())
    }

    fn is_over(&self) -> bool {
        self.is_game_over()
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        GameEngine::take_events(self)
    }

    fn take_outbound(&mut self) -> Vec<ClientMessage> {
        Vec::new()
    }

    fn snapshot(&self) -> GameSnapshot {
        GameEngine::snapshot(self)
    }

    fn end(&mut self) {
        GameEngine::end(self)
    }
}

impl SessionGame for MultiplayerCoordinator {
    fn apply_action(&mut self, action: GameAction) -> bool {
        MultiplayerCoordinator::apply_action(self, action)
    }

    fn handle_line(&mut self, line: &str) {
        MultiplayerCoordinator::handle_line(self, line)
    }

    fn tick(&mut self, elapsed_ms: u32) -> bool {
        MultiplayerCoordinator::tick(self, elapsed_ms)
    }

    fn deadline_ms(&self) -> Option<u32> {
        self.engine().deadline_ms()
    }

    fn is_over(&self) -> bool {
        self.engine().is_game_over()
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        MultiplayerCoordinator::take_events(self)
    }

    fn take_outbound(&mut self) -> Vec<ClientMessage> {
        MultiplayerCoordinator::take_outbound(self)
    }

    fn snapshot(&self) -> GameSnapshot {
        self.engine().snapshot()
    }

    fn end(&mut self) {
        MultiplayerCoordinator::end(self)
    }
}

/// Channels connecting a session to its collaborators.
pub struct SessionIo {
    /// Local player input
    pub actions: mpsc::Receiver<GameAction>,
    /// Lines from the server (closed or idle for single player)
    pub inbound: mpsc::Receiver<String>,
    /// Lines for the server
    pub outbound: mpsc::UnboundedSender<String>,
    /// Notifications for a renderer
    pub events: mpsc::UnboundedSender<GameEvent>,
    /// Latest game state, refreshed whenever the game reports a change
    pub snapshots: Option<watch::Sender<GameSnapshot>>,
}

enum Wake {
    Action(Option<GameAction>),
    Line(Option<String>),
    Deadline,
}

/// Drive `game` until it ends, the player quits or the input channel closes.
///
/// The game must already be started. On exit the game is torn down (countdown
/// cancelled, notifications detached) and handed back.
pub async fn run_session<G: SessionGame>(mut game: G, mut io: SessionIo) -> anyhow::Result<G> {
    let mut inbound_open = true;

    loop {
        flush(&mut game, &io)?;
        if game.is_over() {
            break;
        }

        let deadline = game.deadline_ms();
        let started = Instant::now();

        // Server lines first: a piece that already arrived must be in place
        // before queued local input is applied.
        let wake = tokio::select! {
            biased;
            line = io.inbound.recv(), if inbound_open => Wake::Line(line),
            action = io.actions.recv() => Wake::Action(action),
            _ = sleep(Duration::from_millis(deadline.unwrap_or(0) as u64)), if deadline.is_some() => {
                Wake::Deadline
            }
        };

        let elapsed_ms = started.elapsed().as_millis().min(u32::MAX as u128) as u32;
        if game.tick(elapsed_ms) {
            tracing::debug!(elapsed_ms, "countdown fired");
        }

        match wake {
            Wake::Action(None) => {
                tracing::info!("input closed; ending session");
                break;
            }
            Wake::Action(Some(GameAction::QuitToMenu)) => {
                tracing::info!("player quit");
                break;
            }
            Wake::Action(Some(action)) => {
                if !game.apply_action(action) {
                    tracing::debug!(action = action.as_str(), "action had no effect");
                }
            }
            Wake::Line(Some(line)) => game.handle_line(&line),
            Wake::Line(None) => {
                tracing::info!("server stream closed");
                inbound_open = false;
            }
            Wake::Deadline => {}
        }
    }

    // Deliver what the last wakeup produced before notifications detach.
    flush(&mut game, &io)?;
    game.end();
    Ok(game)
}

fn flush<G: SessionGame>(game: &mut G, io: &SessionIo) -> anyhow::Result<()> {
    for message in game.take_outbound() {
        io.outbound
            .send(message.to_string())
            .map_err(|_| anyhow::anyhow!("outbound channel closed"))?;
    }
    let events = game.take_events();
    if events.is_empty() {
        return Ok(());
    }
    if let Some(snapshots) = &io.snapshots {
        snapshots.send_replace(game.snapshot());
    }
    for event in events {
        // No renderer attached is fine.
        let _ = io.events.send(event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        actions: mpsc::Sender<GameAction>,
        inbound: mpsc::Sender<String>,
        outbound: mpsc::UnboundedReceiver<String>,
        events: mpsc::UnboundedReceiver<GameEvent>,
    }

    fn io() -> (SessionIo, Harness) {
        let (action_tx, action_rx) = mpsc::channel(16);
        let (in_tx, in_rx) = mpsc::channel(16);
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (ev_tx, ev_rx) = mpsc::unbounded_channel();
        (
            SessionIo {
                actions: action_rx,
                inbound: in_rx,
                outbound: out_tx,
                events: ev_tx,
                snapshots: None,
            },
            Harness {
                actions: action_tx,
                inbound: in_tx,
                outbound: out_rx,
                events: ev_rx,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_runs_out_to_game_over() {
        let mut engine = GameEngine::new(5, 5, 1);
        engine.start();
        let (io, mut h) = io();

        // Nobody plays: four countdowns expire and the session ends by itself.
        let engine = run_session(engine, io).await.unwrap();
        assert!(engine.is_game_over());
        assert_eq!(engine.lives(), -1);
        assert!(!engine.countdown().is_armed());

        let mut saw_game_over = false;
        while let Ok(event) = h.events.try_recv() {
            saw_game_over |= event == GameEvent::GameOver;
        }
        assert!(saw_game_over);
        drop(h.actions);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_tears_down() {
        let mut engine = GameEngine::new(5, 5, 1);
        engine.start();
        let (io, h) = io();

        h.actions.send(GameAction::InvokeBot).await.unwrap();
        h.actions.send(GameAction::QuitToMenu).await.unwrap();

        let engine = run_session(engine, io).await.unwrap();
        assert_eq!(engine.moves(), 1);
        assert_eq!(engine.lives(), 3);
        assert!(!engine.countdown().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshots_follow_the_game() {
        let mut engine = GameEngine::new(5, 5, 1);
        engine.start();
        let (mut io, h) = io();
        let (snap_tx, snap_rx) = watch::channel(engine.snapshot());
        io.snapshots = Some(snap_tx);

        h.actions.send(GameAction::MoveCursor(crate::types::Direction::Right)).await.unwrap();
        h.actions.send(GameAction::InvokeBot).await.unwrap();
        h.actions.send(GameAction::QuitToMenu).await.unwrap();

        let engine = run_session(engine, io).await.unwrap();
        let last = snap_rx.borrow().clone();
        assert_eq!(last.moves, 1);
        assert_eq!(last.board, engine.grid().cells());
    }

    #[tokio::test(start_paused = true)]
    async fn test_multiplayer_lines_flow() {
        let mut coordinator = MultiplayerCoordinator::new(5, 5);
        coordinator.start();
        let (io, mut h) = io();

        let task = tokio::spawn(run_session(coordinator, io));

        h.inbound.send("PIECE 3".into()).await.unwrap();
        h.inbound.send("PIECE 3".into()).await.unwrap();
        h.actions.send(GameAction::PlaceAtCursor).await.unwrap();
        h.actions.send(GameAction::ForceGameOver).await.unwrap();

        let coordinator = task.await.unwrap().unwrap();
        assert!(coordinator.engine().is_game_over());

        let mut lines = Vec::new();
        while let Ok(line) = h.outbound.try_recv() {
            lines.push(line);
        }
        assert_eq!(lines[..3], ["SCORES", "PIECE", "PIECE"]);
        assert!(lines[3].starts_with("BOARD 4 0 0"));
        assert_eq!(lines[4..], ["PIECE", "DIE"]);
    }
}
