//! Operator-adjustable parameters
//!
//! The store owns every editable value plus the selected menu page; the
//! navigator turns debounced button presses into edits.

pub mod navigator;
pub mod parameter;
pub mod store;

pub use navigator::ModeNavigator;
pub use parameter::{Parameter, ParameterKind, DURATION_STEP_LADDER, SESSION_STEP_LADDER};
pub use store::ParameterStore;
