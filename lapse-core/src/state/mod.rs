//! Shutter, wake and session state
//!
//! The shot cycle and the session are re-evaluated on every tick against the
//! clock. Nothing here is edge-triggered: each rule compares elapsed time
//! with a duration, so a tick that runs late simply fires on the next one.

pub mod events;
pub mod machine;
pub mod session;

pub use events::{ControllerEvent, EventList, MAX_EVENTS};
pub use machine::{update, Outputs, ShotCycle, ShotPhase};
pub use session::Session;
