//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Electrical level that means "active" for a signal
///
/// Buttons wired to a pull-up read low when pressed; relay boards exist in
/// both active-high and active-low flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logic high means active
    #[default]
    ActiveHigh,
    /// Logic low means active
    ActiveLow,
}

impl Polarity {
    /// Build from an "active high" flag as found in config files
    pub fn from_active_high(active_high: bool) -> Self {
        if active_high {
            Polarity::ActiveHigh
        } else {
            Polarity::ActiveLow
        }
    }

    /// Electrical level for a logical state
    pub fn level_for(self, active: bool) -> bool {
        match self {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        }
    }

    /// Logical state for an electrical level
    pub fn is_active(self, high: bool) -> bool {
        self.level_for(high)
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Check if the pin is at its active level
    fn is_active(&self, polarity: Polarity) -> bool {
        polarity.is_active(self.is_high())
    }
}
