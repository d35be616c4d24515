//! Monotonic time source for the touch debounce gate.

use embassy_time::Instant;

/// Source of monotonic timestamps.
///
/// The window only ever compares two readings of the same clock, so any
/// monotonic counter works.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the global embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
