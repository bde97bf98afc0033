//! Pieces module - the fifteen 3x3 shapes and their rotation
//!
//! A pattern is indexed `[row][col]`; the center cell `[1][1]` is the anchor
//! that lines up with the target grid cell when a piece is placed. Occupied
//! cells hold the piece's color id, empty cells hold 0.

use serde::Serialize;

use crate::types::{PieceKind, PIECE_SIZE};

/// A 3x3 occupancy pattern
pub type Pattern = [[u8; PIECE_SIZE]; PIECE_SIZE];

/// Occupancy mask for a kind in its default orientation (1 = filled)
fn template(kind: PieceKind) -> Pattern {
    match kind {
        PieceKind::Line => [[0, 0, 0], [1, 1, 1], [0, 0, 0]],
        PieceKind::C => [[0, 0, 0], [1, 1, 1], [1, 0, 1]],
        PieceKind::Plus => [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
        PieceKind::Dot => [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
        PieceKind::Square => [[1, 1, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::L => [[0, 0, 0], [1, 1, 1], [0, 0, 1]],
        PieceKind::J => [[0, 0, 1], [1, 1, 1], [0, 0, 0]],
        PieceKind::S => [[0, 0, 0], [0, 1, 1], [1, 1, 0]],
        PieceKind::Z => [[1, 1, 0], [0, 1, 1], [0, 0, 0]],
        PieceKind::T => [[1, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::X => [[1, 0, 1], [0, 1, 0], [1, 0, 1]],
        PieceKind::Corner => [[0, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::InverseCorner => [[1, 0, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::Diagonal => [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
        PieceKind::Double => [[0, 1, 0], [0, 1, 0], [0, 0, 0]],
    }
}

/// Rotate a pattern 90° clockwise
///
/// Four successive rotations return the original pattern.
pub fn rotate(pattern: &Pattern) -> Pattern {
    let mut out = [[0u8; PIECE_SIZE]; PIECE_SIZE];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = pattern[PIECE_SIZE - 1 - c][r];
        }
    }
    out
}

/// A catalog piece in some orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    #[serde(serialize_with = "serialize_kind")]
    kind: PieceKind,
    blocks: Pattern,
    /// Quarter turns applied since creation (0-3)
    rotation: u8,
}

fn serialize_kind<S: serde::Serializer>(kind: &PieceKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.as_str())
}

impl Piece {
    /// Create a fresh piece in its default (0°) orientation
    pub fn new(kind: PieceKind) -> Self {
        let color = kind.color();
        let mut blocks = template(kind);
        for cell in blocks.iter_mut().flatten() {
            *cell *= color;
        }
        Self {
            kind,
            blocks,
            rotation: 0,
        }
    }

    /// Create a piece from its catalog index (0-14)
    pub fn from_index(index: usize) -> Option<Self> {
        PieceKind::from_index(index).map(Self::new)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn blocks(&self) -> &Pattern {
        &self.blocks
    }

    /// Rotation state in degrees (0, 90, 180 or 270)
    pub fn rotation_degrees(&self) -> u16 {
        self.rotation as u16 * 90
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Rotate in place 90° clockwise
    pub fn rotate(&mut self) {
        self.blocks = rotate(&self.blocks);
        self.rotation = (self.rotation + 1) % 4;
    }

    /// Copy of this piece rotated `turns` quarter turns clockwise
    pub fn rotated(&self, turns: u8) -> Self {
        let mut p = *self;
        for _ in 0..turns % 4 {
            p.rotate();
        }
        p
    }

    /// Number of occupied cells
    pub fn size(&self) -> usize {
        self.blocks.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Occupied cells as `(dx, dy, color)` offsets from the anchor
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.blocks.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(c, &v)| (c as i32 - 1, r as i32 - 1, v))
        })
    }
}

/// Create a fresh piece by catalog index, wrapping out-of-range values
pub fn create_piece(index: usize) -> Piece {
    Piece::new(PieceKind::ALL[index % PieceKind::ALL.len()])
}
