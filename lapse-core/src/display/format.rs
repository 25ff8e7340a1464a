//! Value formatting for the second display row

use core::fmt::{self, Write};

use crate::time::Tick;

const SECOND: Tick = 1_000;
const MINUTE: Tick = 60 * SECOND;
const HOUR: Tick = 60 * MINUTE;

/// Write a duration in the largest sensible unit
///
/// `2.3 s` below a minute, `15m 00s` below an hour, `1h 05m` above.
pub fn write_duration<W: Write>(out: &mut W, ms: Tick) -> fmt::Result {
    if ms < MINUTE {
        write!(out, "{}.{} s", ms / SECOND, (ms % SECOND) / 100)
    } else if ms < HOUR {
        write!(out, "{}m {:02}s", ms / MINUTE, (ms % MINUTE) / SECOND)
    } else {
        write!(out, "{}h {:02}m", ms / HOUR, (ms % HOUR) / MINUTE)
    }
}

/// Write a countdown as `m:ss`, or `h:mm:ss` from one hour up
pub fn write_clock<W: Write>(out: &mut W, ms: Tick) -> fmt::Result {
    let secs = ms / SECOND;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        write!(out, "{}:{:02}:{:02}", h, m, s)
    } else {
        write!(out, "{}:{:02}", m, s)
    }
}

/// Text for a flag value
pub fn flag_text(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}
