//! RP2040-specific HAL for the intervalometer firmware
//!
//! This crate provides RP2040 implementations of the shared `lapse-hal`
//! traits and the `lapse-core` clock:
//!
//! - GPIO wrappers for the relay and button pins
//! - Blocking I2C adapter for the LCD backpack
//! - Millisecond clock on the embassy time driver

#![no_std]

pub mod clock;
pub mod gpio;
pub mod i2c;

pub use clock::EmbassyClock;
pub use gpio::{RpInput, RpOutput};
pub use i2c::BlockingI2c;
