//! Fixed-step clock for hosts with variable frame times
//!
//! Pausing is done by not calling `advance` (and `reset` on resume), never
//! by touching simulation state.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStepClock {
    accumulator: f32,
}

impl FixedStepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed host time (seconds); returns how many ticks to run.
    ///
    /// Huge frame gaps are clamped to 0.1s, and any backlog past
    /// `MAX_SUBSTEPS` is dropped rather than replayed.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if self.accumulator >= SIM_DT {
            self.accumulator %= SIM_DT;
        }
        steps
    }

    /// Drop any partial step (e.g. after resuming from pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
