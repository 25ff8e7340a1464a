//! Button input handling
//!
//! Converts raw per-tick button levels into debounced press events.

pub mod button;
pub mod debounce;

pub use button::{Button, ButtonLevels, Presses};
pub use debounce::{ButtonBank, ButtonDebouncer, DEFAULT_DEBOUNCE_MS};
