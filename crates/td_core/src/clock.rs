//! Fixed-step frame clock.
//!
//! The simulation advances in whole ticks. Wall-clock time between frames
//! accumulates here and is converted into a tick count, capped so a long
//! stall never triggers a burst of catch-up ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CATCHUP_TICKS, NS_PER_TICK};
use crate::level::Level;

/// Converts elapsed nanoseconds into ticks to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameClock {
    accumulator_ns: u64,
    ticks: u64,
    dropped: u64,
}

impl FrameClock {
    /// A clock with nothing accumulated.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulator_ns: 0,
            ticks: 0,
            dropped: 0,
        }
    }

    /// Add `elapsed_ns` and return how many ticks to run this frame.
    ///
    /// At most [`MAX_CATCHUP_TICKS`] are returned; whole ticks beyond that
    /// are discarded and only the sub-tick remainder carries over.
    pub fn advance(&mut self, elapsed_ns: u64) -> u64 {
        self.accumulator_ns = self.accumulator_ns.saturating_add(elapsed_ns);
        let due = self.accumulator_ns / NS_PER_TICK;
        self.accumulator_ns %= NS_PER_TICK;

        let run = due.min(MAX_CATCHUP_TICKS);
        self.ticks += run;
        self.dropped += due - run;
        run
    }

    /// Nanoseconds carried toward the next tick.
    #[must_use]
    pub const fn remainder_ns(&self) -> u64 {
        self.accumulator_ns
    }

    /// Ticks handed out so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks skipped by the catch-up cap.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Level {
    /// Run one frame: continuous update with the frame delta, then the
    /// ticks the clock says are due. Returns the number of ticks run.
    pub fn run_frame(&mut self, clock: &mut FrameClock, elapsed_ns: u64) -> u64 {
        self.update(elapsed_ns as f32 / 1e9);
        let ticks = clock.advance(elapsed_ns);
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }
}
