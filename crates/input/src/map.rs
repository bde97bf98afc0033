//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Cursor
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::MoveCursor(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveCursor(Direction::Right))
        }

        // Pieces
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::PlaceAtCursor),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::RotateCurrent),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(GameAction::Swap),

        // Helpers
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePreview),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::InvokeBot),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ForceGameOver),

        KeyCode::Esc => Some(GameAction::QuitToMenu),

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
