//! Countdown module - the per-move timer
//!
//! The countdown is a one-shot deadline that is re-armed after every move.
//! It is advanced with explicit elapsed time (`tick`) so the engine stays
//! deterministic; an async driver turns wall-clock time into ticks.
//!
//! Every arm bumps a generation counter. A driver that scheduled a wakeup for
//! an older generation can tell its deadline was superseded.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    period_ms: u32,
    remaining_ms: u32,
    armed: bool,
    generation: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending deadline and start a new one of `period_ms`
    pub fn arm(&mut self, period_ms: u32) -> u64 {
        self.period_ms = period_ms;
        self.remaining_ms = period_ms;
        self.armed = true;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Cancel the pending deadline
    ///
    /// Returns true if a deadline was pending. Cancelling an idle countdown is
    /// a no-op.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.armed;
        self.armed = false;
        self.remaining_ms = 0;
        was_armed
    }

    /// Advance by `elapsed_ms`; returns true exactly once when the deadline passes
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.armed = false;
            return true;
        }
        false
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
