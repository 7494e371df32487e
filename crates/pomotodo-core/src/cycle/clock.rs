//! Time sources and the countdown handle.
//!
//! The engine has no internal thread. It arms a [`Countdown`] against a
//! [`Clock`] and the caller drives it with `FocusEngine::poll()`, the same
//! way a GUI event loop or a CLI sleep loop would.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A live repeating tick. Dropping it cancels the countdown; nothing fires
/// afterwards.
#[derive(Debug)]
pub(crate) struct Countdown {
    period: Duration,
    next_due: Duration,
}

impl Countdown {
    pub(crate) fn arm(now: Duration, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Consume one tick if it is due at `now`.
    pub(crate) fn take_due(&mut self, now: Duration) -> bool {
        if now >= self.next_due {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }

    pub(crate) fn until_next(&self, now: Duration) -> Duration {
        self.next_due.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance_ms(1500);
        assert_eq!(other.now(), Duration::from_millis(1500));
    }

    #[test]
    fn countdown_fires_once_per_period() {
        let clock = ManualClock::new();
        let mut cd = Countdown::arm(clock.now(), Duration::from_secs(1));
        assert!(!cd.take_due(clock.now()));

        clock.advance_ms(999);
        assert!(!cd.take_due(clock.now()));
        assert_eq!(cd.until_next(clock.now()), Duration::from_millis(1));

        clock.advance_ms(2001);
        let mut fired = 0;
        while cd.take_due(clock.now()) {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }
}
