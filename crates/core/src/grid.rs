//! Grid module - manages the board cells
//!
//! The grid is a `cols x rows` matrix of color ids stored row-major in a flat
//! vector (`y * cols + x`). `0` is empty, `1..=15` is a piece color.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom).
//!
//! Line clearing only examines the rows and columns touched by the most recent
//! placement: a piece covers at most three of each, and no other line can have
//! become full.

use std::fmt;

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::PIECE_SIZE;

/// Value returned for reads outside the board
pub const OUT_OF_BOUNDS: i32 = -1;

/// Row/column indices touched or cleared by a single placement
pub type LineSet = ArrayVec<usize, PIECE_SIZE>;

/// Rows and columns cleared by a placement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedLines {
    pub rows: LineSet,
    pub cols: LineSet,
}

impl ClearedLines {
    /// Total lines cleared (rows + columns)
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// The board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
    touched_rows: LineSet,
    touched_cols: LineSet,
}

impl Grid {
    /// Create an empty grid
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
            touched_rows: LineSet::new(),
            touched_cols: LineSet::new(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the cell value at (x, y), or [`OUT_OF_BOUNDS`] outside the board
    pub fn get(&self, x: i32, y: i32) -> i32 {
        match self.index(x, y) {
            Some(idx) => self.cells[idx] as i32,
            None => OUT_OF_BOUNDS,
        }
    }

    /// Check if (x, y) is on the board and empty
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == 0
    }

    /// Check if (x, y) is on the board and filled
    pub fn is_filled_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y) > 0
    }

    /// Check whether `piece` fits with its anchor at (x, y)
    ///
    /// Every occupied pattern cell must land on an in-bounds empty grid cell.
    pub fn can_place(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .cells()
            .all(|(dx, dy, _)| self.is_empty_at(x + dx, y + dy))
    }

    /// Write `piece` into the grid with its anchor at (x, y)
    ///
    /// The caller must have checked [`Grid::can_place`]. Records the touched
    /// rows and columns for [`Grid::resolve_clears`].
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) {
        debug_assert!(self.can_place(piece, x, y), "place without can_place");

        self.touched_rows.clear();
        self.touched_cols.clear();
        for (dx, dy, color) in piece.cells() {
            let (px, py) = (x + dx, y + dy);
            let Some(idx) = self.index(px, py) else {
                continue;
            };
            self.cells[idx] = color;
            let (col, row) = (px as usize, py as usize);
            if !self.touched_rows.contains(&row) {
                self.touched_rows.push(row);
            }
            if !self.touched_cols.contains(&col) {
                self.touched_cols.push(col);
            }
        }
        tracing::debug!(
            kind = piece.kind().as_str(),
            x,
            y,
            "piece written to grid"
        );
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows {
            return false;
        }
        let start = y * self.cols;
        self.cells[start..start + self.cols].iter().all(|&c| c != 0)
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, x: usize) -> bool {
        if x >= self.cols {
            return false;
        }
        (0..self.rows).all(|y| self.cells[y * self.cols + x] != 0)
    }

    /// Clear full lines among those touched by the last placement
    ///
    /// Both sets are computed before any cell is reset, so a cell at the
    /// intersection of a full row and a full column counts toward both.
    pub fn resolve_clears(&mut self) -> ClearedLines {
        let mut cleared = ClearedLines::default();
        for &y in &self.touched_rows {
            if self.is_row_full(y) {
                cleared.rows.push(y);
            }
        }
        for &x in &self.touched_cols {
            if self.is_col_full(x) {
                cleared.cols.push(x);
            }
        }

        for &y in &cleared.rows {
            let start = y * self.cols;
            self.cells[start..start + self.cols].fill(0);
        }
        for &x in &cleared.cols {
            for y in 0..self.rows {
                self.cells[y * self.cols + x] = 0;
            }
        }

        self.clear_tracking();
        cleared
    }

    /// Forget the rows and columns touched by the last placement
    pub fn clear_tracking(&mut self) {
        self.touched_rows.clear();
        self.touched_cols.clear();
    }

    pub fn touched_rows(&self) -> &[usize] {
        &self.touched_rows
    }

    pub fn touched_cols(&self) -> &[usize] {
        &self.touched_cols
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Count of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.clear_tracking();
    }

    /// Set a cell directly, bypassing placement (for tests and fixtures)
    ///
    /// Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                if x > 0 {
                    f.write_str(" ")?;
                }
                match self.cells[y * self.cols + x] {
                    0 => f.write_str(" .")?,
                    v => write!(f, "{:>2}", v)?,
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
