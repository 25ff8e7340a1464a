//! Tick arithmetic
//!
//! The clock is a free-running millisecond counter that wraps at `u32::MAX`
//! (about 49.7 days). Every duration check goes through [`elapsed`], which
//! uses wrapping subtraction, so a start stamp taken just before the wrap
//! still compares correctly against a reading taken just after it.
//!
//! Never compare absolute timestamps (`now > start + duration`); that breaks
//! at the wrap.

/// One millisecond of the monotonic clock
pub type Tick = u32;

/// Ticks elapsed from `since` to `now`, tolerant of counter wraparound
#[inline]
pub fn elapsed(now: Tick, since: Tick) -> Tick {
    now.wrapping_sub(since)
}

/// Check whether at least `duration` ticks have passed since `since`
#[inline]
pub fn has_elapsed(now: Tick, since: Tick, duration: Tick) -> bool {
    elapsed(now, since) >= duration
}

/// Ticks left until `duration` has passed since `since` (zero once due)
#[inline]
pub fn remaining(now: Tick, since: Tick, duration: Tick) -> Tick {
    duration.saturating_sub(elapsed(now, since))
}
