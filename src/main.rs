//! TetrECS runner (default binary).
//!
//! Interactive play in the terminal, or `--bot` for a headless run where the
//! bot plays every move and a JSON summary is printed at the end.
//!
//! Configuration comes from `TETRECS_*` environment variables; logging is
//! controlled with `RUST_LOG` and goes to stderr.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use tetrecs::core::{FileScoreStore, GameEngine, GameSnapshot, HighScore, ScoreStore};
use tetrecs::input::{handle_key_event, should_quit};
use tetrecs::net::{run_session, GameConfig, SessionIo};
use tetrecs::types::{GameAction, PieceSlot};

const FRAME_MS: u64 = 50;
const ACTION_QUEUE: usize = 64;
/// Headless runs stop here if the bot never runs out of room
const BOT_MOVE_LIMIT: u32 = 2_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::from_env();
    tracing::debug!(?config, "configuration");

    if std::env::args().skip(1).any(|a| a == "--bot") {
        return run_bot(&config);
    }

    let mut screen = Screen::enter()?;
    let result = run(&mut screen, &config);
    // Always try to restore terminal state.
    let _ = screen.exit();

    let engine = result?;
    record_score(&config, &engine);
    println!("Game over: score {}, level {}", engine.score(), engine.level());
    Ok(())
}

/// Let the bot play until the game ends and print a summary
fn run_bot(config: &GameConfig) -> Result<()> {
    let mut engine = GameEngine::new(config.cols, config.rows, config.seed);
    engine.start();

    while engine.is_running() {
        if engine.moves() >= BOT_MOVE_LIMIT {
            engine.force_game_over();
            break;
        }
        if !engine.play_bot() {
            // Nothing fits: wait out the countdown.
            let remaining = engine.countdown().remaining_ms();
            engine.tick(remaining);
        }
        engine.take_events();
    }

    let snapshot = engine.snapshot();
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}

/// Interactive play: the session runtime owns the game, this thread reads
/// keys and draws the latest snapshot.
fn run(screen: &mut Screen, config: &GameConfig) -> Result<GameEngine> {
    let mut engine = GameEngine::new(config.cols, config.rows, config.seed);
    engine.start();

    let rt = Runtime::new()?;
    let (actions_tx, actions) = mpsc::channel(ACTION_QUEUE);
    // No server in single player; holding the sender keeps the stream open.
    let (_inbound_tx, inbound) = mpsc::channel(1);
    let (outbound, _outbound_rx) = mpsc::unbounded_channel();
    let (events, mut events_rx) = mpsc::unbounded_channel();
    let (snapshots, mut view) = watch::channel(engine.snapshot());

    let session = rt.spawn(run_session(
        engine,
        SessionIo {
            actions,
            inbound,
            outbound,
            events,
            snapshots: Some(snapshots),
        },
    ));

    let frame = Duration::from_millis(FRAME_MS);
    let mut snapshot = view.borrow_and_update().clone();
    let mut received = Instant::now();

    while !session.is_finished() {
        if view.has_changed().unwrap_or(false) {
            snapshot = view.borrow_and_update().clone();
            received = Instant::now();
        }
        let since_ms = received.elapsed().as_millis().min(u32::MAX as u128) as u32;
        screen.draw(&render(&snapshot, since_ms))?;

        if event::poll(frame)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = if should_quit(key) {
                        Some(GameAction::QuitToMenu)
                    } else {
                        handle_key_event(key)
                    };
                    if let Some(action) = action {
                        if actions_tx.blocking_send(action).is_err() {
                            break;
                        }
                    }
                }
            }
        }

        while let Ok(event) = events_rx.try_recv() {
            tracing::trace!(?event, "game event");
        }
    }

    drop(actions_tx);
    let engine = rt.block_on(session)??;
    Ok(engine)
}

fn record_score(config: &GameConfig, engine: &GameEngine) {
    let store = FileScoreStore::new(config.scores_path.clone());
    let mut table = store.load_or_default();
    let name = config.nick.clone().unwrap_or_else(|| "player".to_string());
    if let Some(rank) = table.insert(HighScore::new(name, engine.score())) {
        tracing::info!(rank = rank + 1, "new high score");
        store.save_or_log(&table);
    }
}

/// Draw a snapshot taken `since_ms` ago
fn render(view: &GameSnapshot, since_ms: u32) -> Vec<String> {
    let remaining_ms = view.countdown_remaining_ms.saturating_sub(since_ms);
    let mut lines = vec![format!(
        "score {:>6}  level {:>2}  lives {:>2}  x{}  {:>5.1}s",
        view.score,
        view.level,
        view.lives,
        view.multiplier,
        remaining_ms as f32 / 1000.0
    )];
    lines.push(String::new());

    let (cx, cy) = view.cursor;
    let aim = match (view.preview_visible, view.current_fits_at_cursor) {
        (false, _) => " +",
        (true, true) => " o",
        (true, false) => " x",
    };
    for y in 0..view.rows {
        let mut row = String::new();
        for x in 0..view.cols {
            let v = view.cell(x, y).unwrap_or(0);
            let cell = match (v, (x, y) == (cx, cy)) {
                (0, true) => aim.to_string(),
                (0, false) => " .".to_string(),
                (v, true) => format!("[{v}"),
                (v, false) => format!("{v:>2}"),
            };
            row.push_str(&cell);
        }
        lines.push(row);
    }
    lines.push(String::new());

    for (slot, piece) in [(PieceSlot::Current, view.current), (PieceSlot::Next, view.next)] {
        let Some(piece) = piece else { continue };
        lines.push(format!("{:?}: {}", slot, piece.kind().as_str()));
        for row in piece.blocks() {
            let cells: String = row
                .iter()
                .map(|&v| if v == 0 { " ." } else { " #" })
                .collect();
            lines.push(cells);
        }
    }
    lines.push(String::new());
    lines.push(
        "wasd move  x place  r rotate  t swap  p preview  l bot  m give up  esc quit".to_string(),
    );
    lines
}

/// Raw-mode alternate screen
struct Screen {
    out: io::Stdout,
}

impl Screen {
    fn enter() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out })
    }

    fn draw(&mut self, lines: &[String]) -> Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for line in lines {
            queue!(self.out, style::Print(line), style::Print("\r\n"))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}
