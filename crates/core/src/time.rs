use std::time::{Duration, Instant};

/// A simple monotonic clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(Instant),
}

impl Clock {
    /// Returns a clock that reads the monotonic system clock.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given instant.
    #[must_use]
    pub fn fixed(at: Instant) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current instant according to the clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        match self {
            Clock::Default => Instant::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Time elapsed between `earlier` and now, saturating at zero.
    #[must_use]
    pub fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`, or if the result would overflow.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            if let Some(next) = t.checked_add(delta) {
                *t = next;
            }
        }
    }

    /// Returns true if this clock represents real time.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Clock::Default)
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Returns a `Clock` frozen at the moment of the call, for tests and doc examples.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(Instant::now())
}
