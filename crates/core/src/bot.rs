//! Bot module - heuristic placement search
//!
//! For each of the two pending pieces the bot tries every anchor on the board
//! in every orientation, keeps the placements that fit, and scores them:
//!
//! ```text
//! fitness = size * 3 * (lines + 1) / ((singles + 1) * 4)
//! ```
//!
//! - `size`: occupied cells in the piece
//! - `lines`: rows + columns the placement would fill
//! - `singles`: empty cells on the touched lines with no filled orthogonal
//!   neighbour, counted only when nothing would clear
//!
//! The search works on a scratch copy of the grid and never mutates engine
//! state. It returns a [`BotMove`] which the engine applies through its normal
//! placement path.

use crate::grid::Grid;
use crate::pieces::Piece;
use crate::types::PieceSlot;

/// Best placement found for one piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Quarter turns clockwise from the piece's current orientation
    pub rotations: u8,
    pub x: i32,
    pub y: i32,
    pub fitness: f64,
}

/// The move the bot decided on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotMove {
    /// Which pending piece to play; `Next` means swap first
    pub slot: PieceSlot,
    pub rotations: u8,
    pub x: i32,
    pub y: i32,
    pub fitness: f64,
}

/// Outcome of simulating one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Simulation {
    pub lines: usize,
    pub singles: usize,
}

/// Simulate placing `piece` at (x, y) on a copy of `grid`
///
/// The placement must be valid.
pub fn simulate(grid: &Grid, piece: &Piece, x: i32, y: i32) -> Simulation {
    let mut scratch = grid.clone();
    scratch.place(piece, x, y);

    let rows = scratch.touched_rows();
    let cols = scratch.touched_cols();

    let lines = rows.iter().filter(|&&r| scratch.is_row_full(r)).count()
        + cols.iter().filter(|&&c| scratch.is_col_full(c)).count();
    if lines > 0 {
        return Simulation { lines, singles: 0 };
    }

    let isolated = |cx: i32, cy: i32| {
        scratch.is_empty_at(cx, cy)
            && !scratch.is_filled_at(cx - 1, cy)
            && !scratch.is_filled_at(cx + 1, cy)
            && !scratch.is_filled_at(cx, cy - 1)
            && !scratch.is_filled_at(cx, cy + 1)
    };

    let mut singles = 0;
    for &r in rows {
        for cx in 0..scratch.cols() {
            if isolated(cx as i32, r as i32) {
                singles += 1;
            }
        }
    }
    for &c in cols {
        for cy in 0..scratch.rows() {
            // Cells on a touched row were already counted above.
            if rows.contains(&cy) {
                continue;
            }
            if isolated(c as i32, cy as i32) {
                singles += 1;
            }
        }
    }

    Simulation { lines, singles }
}

/// Fitness of placing `piece` at (x, y)
pub fn fitness(grid: &Grid, piece: &Piece, x: i32, y: i32) -> f64 {
    let sim = simulate(grid, piece, x, y);
    let size = piece.size() as f64;
    (size * 3.0 * (sim.lines as f64 + 1.0)) / ((sim.singles as f64 + 1.0) * 4.0)
}

/// Best valid placement for `piece`, or None if it fits nowhere
///
/// Scans x, then y, then orientation. Equal fitness replaces the best so
/// far, so the last placement reaching the maximum wins.
pub fn best_placement(grid: &Grid, piece: &Piece) -> Option<Candidate> {
    let orientations: [Piece; 4] = std::array::from_fn(|r| piece.rotated(r as u8));
    let mut best: Option<Candidate> = None;

    for x in 0..grid.cols() as i32 {
        for y in 0..grid.rows() as i32 {
            for (rotations, rotated) in orientations.iter().enumerate() {
                if !grid.can_place(rotated, x, y) {
                    continue;
                }
                let f = fitness(grid, rotated, x, y);
                if best.map_or(true, |b| f >= b.fitness) {
                    best = Some(Candidate {
                        rotations: rotations as u8,
                        x,
                        y,
                        fitness: f,
                    });
                }
            }
        }
    }

    best
}

/// Decide which piece to play and where
///
/// Returns None when neither piece fits anywhere. The next piece is chosen
/// only if its best fitness is strictly higher than the current piece's.
pub fn think(grid: &Grid, current: &Piece, next: &Piece) -> Option<BotMove> {
    let one = best_placement(grid, current);
    let two = best_placement(grid, next);

    let (slot, pick) = match (one, two) {
        (None, None) => {
            tracing::info!("bot found no placement for either piece");
            return None;
        }
        (Some(a), None) => (PieceSlot::Current, a),
        (None, Some(b)) => (PieceSlot::Next, b),
        (Some(a), Some(b)) => {
            if b.fitness > a.fitness {
                (PieceSlot::Next, b)
            } else {
                (PieceSlot::Current, a)
            }
        }
    };

    tracing::debug!(
        ?slot,
        x = pick.x,
        y = pick.y,
        rotations = pick.rotations,
        fitness = pick.fitness,
        "bot chose placement"
    );

    Some(BotMove {
        slot,
        rotations: pick.rotations,
        x: pick.x,
        y: pick.y,
        fitness: pick.fitness,
    })
}
