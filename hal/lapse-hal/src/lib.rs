//! Lapse Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the intervalometer
//! needs from a chip HAL. Drivers in `lapse-drivers` are written against
//! these traits so they can be unit tested on the host with mock pins and
//! a mock bus.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lapse-firmware (tick loop, wiring)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lapse-drivers (relay, buttons, LCD)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lapse-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  lapse-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (relay, buttons)
//! - [`i2c::I2cBus`] - I2C master writes (LCD backpack)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, Polarity};
pub use i2c::{I2cBus, I2cConfig};
