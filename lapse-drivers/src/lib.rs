//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in lapse-core, written against the lapse-hal pin and bus traits:
//!
//! - Shutter relay on a GPIO output
//! - Three menu buttons on GPIO inputs
//! - HD44780 character LCD behind a PCF8574 I2C backpack

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod lcd;
pub mod relay;

pub use buttons::GpioButtons;
pub use lcd::{Hd44780, LcdError};
pub use relay::GpioRelay;
