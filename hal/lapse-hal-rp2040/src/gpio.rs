//! GPIO wrappers
//!
//! Newtypes over the embassy-rp pin drivers so they implement the
//! `lapse-hal` pin traits.

use embassy_rp::gpio::{Input, Output};
use lapse_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Wrap a configured output
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Wrap a configured input
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
