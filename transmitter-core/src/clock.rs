//! Monotonic time source and the fixed-period dispatch gate.

use core::cell::Cell;

/// Monotonic microsecond clock.
///
/// The firmware backs this with the embassy time driver; tests use
/// [`MockClock`] to step time by hand.
pub trait Clock {
    /// Microseconds since start.
    fn now_us(&self) -> u64;
}

/// Clock that only moves when told to.
///
/// # Example
///
/// ```
/// use transmitter_core::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// clock.advance_ms(3);
/// assert_eq!(clock.now_us(), 3_000);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_us: Cell<u64>,
}

impl MockClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    pub fn set_us(&self, us: u64) {
        self.current_us.set(us);
    }

    pub fn advance_us(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1_000);
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Lets a cycle through at most once per period.
///
/// Ticks missed while the caller was busy are dropped, never queued: the
/// next dispatch happens at the first poll after the period has elapsed and
/// the period restarts from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodGate {
    period_us: u64,
    last_dispatch_us: u64,
}

impl PeriodGate {
    #[must_use]
    pub const fn new(period_us: u64) -> Self {
        Self {
            period_us,
            last_dispatch_us: 0,
        }
    }

    /// Whether a cycle is due at `now_us`.
    #[inline]
    #[must_use]
    pub fn is_due(&self, now_us: u64) -> bool {
        now_us.saturating_sub(self.last_dispatch_us) >= self.period_us
    }

    /// Record a dispatch at `now_us`.
    #[inline]
    pub fn mark(&mut self, now_us: u64) {
        self.last_dispatch_us = now_us;
    }

    /// Check and mark in one step. Returns `true` if the cycle should run.
    pub fn try_dispatch(&mut self, now_us: u64) -> bool {
        if self.is_due(now_us) {
            self.mark(now_us);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn period_us(&self) -> u64 {
        self.period_us
    }

    #[must_use]
    pub const fn last_dispatch_us(&self) -> u64 {
        self.last_dispatch_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock_advance() {
        let clock = MockClock::new();
        assert_eq!(clock.now_us(), 0);
        clock.advance_us(250);
        clock.advance_ms(1);
        assert_eq!(clock.now_us(), 1_250);
        clock.set_us(40);
        assert_eq!(clock.now_us(), 40);
    }

    #[test]
    fn test_gate_waits_for_full_period() {
        let mut gate = PeriodGate::new(2_000);
        assert!(!gate.try_dispatch(1_000));
        assert!(gate.try_dispatch(2_000));
        assert_eq!(gate.last_dispatch_us(), 2_000);
        assert!(!gate.try_dispatch(3_999));
        assert!(gate.try_dispatch(4_000));
    }

    #[test]
    fn test_gate_skips_missed_ticks() {
        let mut gate = PeriodGate::new(2_000);
        // Caller stalled for five periods: one dispatch, no backlog
        assert!(gate.try_dispatch(10_500));
        assert!(!gate.try_dispatch(10_600));
        assert!(!gate.try_dispatch(12_499));
        assert!(gate.try_dispatch(12_500));
    }
}
