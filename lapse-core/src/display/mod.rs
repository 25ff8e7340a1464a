//! Two-row text rendering
//!
//! The presenter is a pure function of the parameter store and session; it
//! builds a fresh [`Screen`] every tick and the display driver decides what
//! actually needs to go over the bus.

pub mod format;
pub mod presenter;
pub mod screen;

pub use presenter::{present, splash};
pub use screen::{Line, Screen, SCREEN_ROWS};
