//! [`Clock`] backed by the embassy time driver.

use embassy_time::Instant;
use transmitter_core::Clock;

/// Microseconds since boot from the RP2350 timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
