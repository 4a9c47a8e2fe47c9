//! Millisecond clock backed by the Embassy time driver

use embassy_time::Instant;
use pinset_core::Clock;

/// Milliseconds since boot, truncated to `u32`
///
/// Wraps after about 49.7 days. The manager measures intervals with
/// wrapping subtraction, so the wrap is harmless.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
