//! GPIO shutter relay
//!
//! Drives the camera release through a relay or optocoupler on one GPIO.
//! Boards without a dedicated wake line pulse the same relay for wake.

use lapse_core::traits::ShutterActuator;
use lapse_hal::{OutputPin, Polarity};

/// Shutter relay on a single GPIO
pub struct GpioRelay<P> {
    pin: P,
    polarity: Polarity,
    /// Drive the wake pulse on this pin too
    wake_on_relay: bool,
    relay: bool,
    wake: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output, released
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `polarity`: Level that closes the relay
    /// - `wake_on_relay`: Also close the relay for wake pulses
    pub fn new(pin: P, polarity: Polarity, wake_on_relay: bool) -> Self {
        let mut relay = Self {
            pin,
            polarity,
            wake_on_relay,
            relay: false,
            wake: false,
        };
        relay.apply();
        relay
    }

    /// Relay closed for a shot
    pub fn is_relay_asserted(&self) -> bool {
        self.relay
    }

    /// Wake pulse requested
    pub fn is_wake_asserted(&self) -> bool {
        self.wake
    }

    /// Contact actually closed (shot or wake pulse)
    pub fn is_closed(&self) -> bool {
        self.relay || (self.wake_on_relay && self.wake)
    }

    fn apply(&mut self) {
        let high = self.polarity.level_for(self.is_closed());
        self.pin.set_state(high);
    }
}

impl<P: OutputPin> ShutterActuator for GpioRelay<P> {
    fn set_relay(&mut self, asserted: bool) {
        self.relay = asserted;
        self.apply();
    }

    fn set_wake(&mut self, asserted: bool) {
        self.wake = asserted;
        self.apply();
    }
}
