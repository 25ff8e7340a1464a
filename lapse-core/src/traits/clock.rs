//! Tick source trait

use crate::time::Tick;

/// Monotonic millisecond counter
///
/// Readings must never go backwards except by wrapping at `u32::MAX`.
pub trait Clock {
    /// Current tick count
    fn now(&self) -> Tick;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        (**self).now()
    }
}
