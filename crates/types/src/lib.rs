//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal input, multiplayer protocol).
//!
//! # Board Dimensions
//!
//! The default board is a 5x5 grid. Pieces are 3x3 patterns anchored on
//! their center cell, so every placement touches at most three rows and three
//! columns.
//!
//! # Countdown
//!
//! Each move has a countdown whose period shrinks with the level:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNTDOWN_BASE_MS` | 12000 | Period before any level reduction |
//! | `COUNTDOWN_STEP_MS` | 500 | Reduction per level |
//! | `COUNTDOWN_FLOOR_MS` | 2500 | Shortest period, reached at level 19 |
//!
//! # Examples
//!
//! ```
//! use tetrecs_types::{Direction, GameAction, PieceKind, DEFAULT_COLS, PIECE_COUNT};
//!
//! let kind = PieceKind::from_index(2).unwrap();
//! assert_eq!(kind, PieceKind::Plus);
//! assert_eq!(kind.color(), 3);
//!
//! assert_eq!(PieceKind::from_str("square"), Some(PieceKind::Square));
//! assert_eq!(GameAction::from_str("swap"), Some(GameAction::Swap));
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//!
//! assert_eq!(DEFAULT_COLS, 5);
//! assert_eq!(PIECE_COUNT, 15);
//! ```

/// Default board width in cells
pub const DEFAULT_COLS: usize = 5;

/// Default board height in cells
pub const DEFAULT_ROWS: usize = 5;

/// Number of shapes in the piece catalog
pub const PIECE_COUNT: usize = 15;

/// Side length of a piece pattern
pub const PIECE_SIZE: usize = 3;

/// Countdown period before any level reduction
pub const COUNTDOWN_BASE_MS: u32 = 12_000;

/// Countdown reduction per level
pub const COUNTDOWN_STEP_MS: u32 = 500;

/// Shortest countdown period
pub const COUNTDOWN_FLOOR_MS: u32 = 2_500;

/// Lives at the start of a game
pub const STARTING_LIVES: i32 = 3;

/// Level at the start of a game
pub const STARTING_LEVEL: u32 = 1;

/// Points per level-up
pub const LEVEL_THRESHOLD: u32 = 1_000;

/// Points per cleared cell, before line count and multiplier
pub const POINTS_PER_CELL: u32 = 10;

/// Number of entries kept in a high-score table
pub const HIGH_SCORE_LIMIT: usize = 10;

/// The fifteen catalog shapes
///
/// Each shape has a fixed color id equal to its catalog index plus one, so
/// color ids on the board range over `1..=15` and `0` always means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Line,
    C,
    Plus,
    Dot,
    Square,
    L,
    J,
    S,
    Z,
    T,
    X,
    Corner,
    InverseCorner,
    Diagonal,
    Double,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::Line,
        PieceKind::C,
        PieceKind::Plus,
        PieceKind::Dot,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::X,
        PieceKind::Corner,
        PieceKind::InverseCorner,
        PieceKind::Diagonal,
        PieceKind::Double,
    ];

    /// Look up a kind by catalog index (0-14)
    ///
    /// ```
    /// use tetrecs_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::Line));
    /// assert_eq!(PieceKind::from_index(14), Some(PieceKind::Double));
    /// assert_eq!(PieceKind::from_index(15), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog index (0-14)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Color id written into the grid (1-15)
    pub fn color(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Parse piece kind from its name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.iter().copied().find(|k| k.as_str() == lower)
    }

    /// Lowercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::C => "c",
            PieceKind::Plus => "plus",
            PieceKind::Dot => "dot",
            PieceKind::Square => "square",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::X => "x",
            PieceKind::Corner => "corner",
            PieceKind::InverseCorner => "inverse-corner",
            PieceKind::Diagonal => "diagonal",
            PieceKind::Double => "double",
        }
    }
}

/// Cursor movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset `(dx, dy)`; y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Which of the two pending pieces an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceSlot {
    Current,
    Next,
}

/// Game actions that can be applied to modify game state
///
/// These are the toolkit-independent inputs the engine understands. Both
/// keyboard input and scripted control map onto them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the aim cursor one cell, wrapping at the board edges
    MoveCursor(Direction),
    /// Place the current piece at the cursor
    PlaceAtCursor,
    /// Rotate the current piece 90° clockwise
    RotateCurrent,
    /// Exchange current and next piece
    Swap,
    /// Show or hide the placement preview
    TogglePreview,
    /// Let the bot place a piece
    InvokeBot,
    /// End the game immediately
    ForceGameOver,
    /// Leave the game
    QuitToMenu,
}

impl GameAction {
    /// Parse action from string (for scripted control)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("left"), Some(GameAction::MoveCursor(Direction::Left)));
    /// assert_eq!(GameAction::from_str("place"), Some(GameAction::PlaceAtCursor));
    /// assert_eq!(GameAction::from_str("bot"), Some(GameAction::InvokeBot));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(GameAction::MoveCursor(Direction::Up)),
            "down" => Some(GameAction::MoveCursor(Direction::Down)),
            "left" => Some(GameAction::MoveCursor(Direction::Left)),
            "right" => Some(GameAction::MoveCursor(Direction::Right)),
            "place" => Some(GameAction::PlaceAtCursor),
            "rotate" => Some(GameAction::RotateCurrent),
            "swap" => Some(GameAction::Swap),
            "preview" => Some(GameAction::TogglePreview),
            "bot" => Some(GameAction::InvokeBot),
            "gameover" => Some(GameAction::ForceGameOver),
            "quit" => Some(GameAction::QuitToMenu),
            _ => None,
        }
    }

    /// Convert to the string accepted by [`GameAction::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveCursor(Direction::Up) => "up",
            GameAction::MoveCursor(Direction::Down) => "down",
            GameAction::MoveCursor(Direction::Left) => "left",
            GameAction::MoveCursor(Direction::Right) => "right",
            GameAction::PlaceAtCursor => "place",
            GameAction::RotateCurrent => "rotate",
            GameAction::Swap => "swap",
            GameAction::TogglePreview => "preview",
            GameAction::InvokeBot => "bot",
            GameAction::ForceGameOver => "gameover",
            GameAction::QuitToMenu => "quit",
        }
    }
}
