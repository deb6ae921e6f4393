//! Fixed-interval autosave timer.

use std::time::Duration;

#[derive(Debug)]
pub(crate) struct AutosaveTimer {
    interval: Duration,
    elapsed: Duration,
}

impl AutosaveTimer {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Accumulates `dt` and reports whether at least one interval elapsed.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        if self.interval.is_zero() {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.interval {
            return false;
        }
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
        }
        true
    }
}
