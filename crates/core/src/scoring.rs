//! Scoring module - clear scoring, multiplier, levels and countdown period
//!
//! A clear of `r` rows and `c` columns on a `cols x rows` board removes
//! `r*cols + c*rows - r*c` cells (intersections counted once). The award is
//! `(r + c) * cells * 10 * multiplier`. Every 1000 points carried in the level
//! accumulator raise the level by one.

use crate::grid::ClearedLines;
use crate::types::{
    COUNTDOWN_BASE_MS, COUNTDOWN_FLOOR_MS, COUNTDOWN_STEP_MS, LEVEL_THRESHOLD, POINTS_PER_CELL,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded by this move
    pub delta: u32,
    /// Distinct cells removed
    pub cells_cleared: u32,
    /// Multiplier to use for the following move
    pub next_multiplier: u32,
}

/// Distinct cells removed by clearing `rows_cleared` rows and `cols_cleared` columns
pub fn cells_cleared(rows_cleared: u32, cols_cleared: u32, cols: u32, rows: u32) -> u32 {
    rows_cleared * cols + cols_cleared * rows - rows_cleared * cols_cleared
}

/// Calculate the award for a move and the multiplier that follows it
pub fn calculate_score(
    cleared: &ClearedLines,
    cols: usize,
    rows: usize,
    multiplier: u32,
) -> ScoreResult {
    let r = cleared.rows.len() as u32;
    let c = cleared.cols.len() as u32;
    let cells = cells_cleared(r, c, cols as u32, rows as u32);
    let delta = (r + c) * cells * POINTS_PER_CELL * multiplier;
    let next_multiplier = if r + c > 0 { multiplier + 1 } else { 1 };

    ScoreResult {
        delta,
        cells_cleared: cells,
        next_multiplier,
    }
}

/// Add `delta` to the level accumulator and carry whole thresholds into the level
///
/// Returns the new `(accumulator, level)`.
pub fn apply_level_progress(accumulator: u32, level: u32, delta: u32) -> (u32, u32) {
    let mut acc = accumulator + delta;
    let mut level = level;
    while acc >= LEVEL_THRESHOLD {
        acc -= LEVEL_THRESHOLD;
        level += 1;
    }
    (acc, level)
}

/// Countdown period for a level, clamped at the floor
pub fn countdown_period_ms(level: u32) -> u32 {
    COUNTDOWN_BASE_MS
        .saturating_sub(COUNTDOWN_STEP_MS.saturating_mul(level))
        .max(COUNTDOWN_FLOOR_MS)
}
