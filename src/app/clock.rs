// SPDX-License-Identifier: MPL-2.0
//! Bridge from the wall clock to the feedback manager's virtual clock.

use std::time::{Duration, Instant};

/// Measures wall-clock time between successive laps.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Returns the time elapsed since the previous lap and starts a new one.
    ///
    /// An instant earlier than the previous lap counts as zero elapsed time.
    pub fn lap(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);
        elapsed
    }
}
