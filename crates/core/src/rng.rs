//! RNG module - deterministic local piece source
//!
//! Single-player games draw each piece uniformly from the fifteen catalog
//! shapes. A small LCG keeps games reproducible from a seed.

use crate::pieces::Piece;
use crate::types::{PieceKind, PIECE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator over the catalog
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: SimpleRng,
    seed: u32,
}

impl RandomPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw the next piece kind
    pub fn draw_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PIECE_COUNT as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Draw a fresh piece in its default orientation
    pub fn draw(&mut self) -> Piece {
        Piece::new(self.draw_kind())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new(1)
    }
}
