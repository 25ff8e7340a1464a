//! Collaborator traits
//!
//! These traits define the interface between the intervalometer logic
//! and the hardware around it. The core only needs to read the clock,
//! sample the buttons, drive the shutter relay and write two text rows.

pub mod actuator;
pub mod clock;
pub mod display;
pub mod input;

pub use actuator::ShutterActuator;
pub use clock::Clock;
pub use display::{DisplayError, TextDisplay};
pub use input::ButtonSource;
