//! Raw button input trait

use crate::input::ButtonLevels;

/// Samples the raw levels of the three menu buttons
///
/// Implementations apply pin polarity, so `true` always means "held down".
/// No debouncing happens here.
pub trait ButtonSource {
    /// Read all buttons once
    fn read(&mut self) -> ButtonLevels;
}
