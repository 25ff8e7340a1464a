//! GPIO menu buttons

use lapse_core::input::ButtonLevels;
use lapse_core::traits::ButtonSource;
use lapse_hal::{InputPin, Polarity};

/// UP, DOWN and MODE buttons on three GPIO inputs
///
/// All three share one polarity. Levels are returned raw; debouncing is done
/// by the core.
pub struct GpioButtons<U, D, M> {
    up: U,
    down: D,
    mode: M,
    polarity: Polarity,
}

impl<U: InputPin, D: InputPin, M: InputPin> GpioButtons<U, D, M> {
    /// Create the button set
    pub fn new(up: U, down: D, mode: M, polarity: Polarity) -> Self {
        Self {
            up,
            down,
            mode,
            polarity,
        }
    }
}

impl<U: InputPin, D: InputPin, M: InputPin> ButtonSource for GpioButtons<U, D, M> {
    fn read(&mut self) -> ButtonLevels {
        ButtonLevels {
            up: self.up.is_active(self.polarity),
            down: self.down.is_active(self.polarity),
            mode: self.mode.is_active(self.polarity),
        }
    }
}
