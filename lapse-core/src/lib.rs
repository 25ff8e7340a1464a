//! Board-agnostic core logic for the intervalometer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wraparound-safe tick arithmetic
//! - Button debouncing
//! - Parameter store and mode navigation
//! - Shutter / wake / session state machine
//! - Two-row display presenter
//! - Configuration types and the embedded config parser
//! - Collaborator traits (clock, shutter actuator, text display, buttons)
//!
//! Everything runs from one cooperative [`Controller::tick`] call; there is
//! no interior mutability and no global state.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod display;
pub mod input;
pub mod params;
pub mod state;
pub mod time;
pub mod traits;

pub use controller::{Controller, ControllerState, TickReport};
pub use time::Tick;
