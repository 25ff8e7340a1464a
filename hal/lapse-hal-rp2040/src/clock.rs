//! Tick source on the embassy time driver

use embassy_time::Instant;
use lapse_core::traits::Clock;
use lapse_core::Tick;

/// Milliseconds since boot, truncated to 32 bits
///
/// Wraps after about 49.7 days; the core handles the wrap.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Tick {
        Instant::now().as_millis() as Tick
    }
}
