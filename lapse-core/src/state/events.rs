//! Events reported by the controller
//!
//! The core never logs. Each tick returns the list of things that happened
//! and the firmware decides what to print.

use crate::params::Parameter;
use crate::time::Tick;

/// Maximum events one tick can report
pub const MAX_EVENTS: usize = 12;

/// Events produced during one tick
pub type EventList = heapless::Vec<ControllerEvent, MAX_EVENTS>;

/// Something the controller did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    // Operator events
    /// MODE selected a new page
    ModeSelected(Parameter),
    /// UP/DOWN changed a duration or step size
    DurationChanged { parameter: Parameter, value_ms: Tick },
    /// UP/DOWN changed a flag
    FlagChanged { parameter: Parameter, value: bool },

    // Shot cycle events
    /// Wake pulse started
    WakeStarted,
    /// Wake pulse dropped before its shot
    WakeCancelled,
    /// Relay closed
    ShotStarted,
    /// Relay opened after the full hold
    ShotFinished,
    /// Relay opened early by cancellation
    ShotAborted,

    // Session events
    /// Session started
    SessionStarted,
    /// Session ran its full duration
    SessionExpired,
    /// Session ended by the operator
    SessionCancelled,
    /// Controller switched itself off after a session
    AutoDisabled,
}

impl ControllerEvent {
    /// Check if this event came from a button press
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            ControllerEvent::ModeSelected(_)
                | ControllerEvent::DurationChanged { .. }
                | ControllerEvent::FlagChanged { .. }
        )
    }

    /// Check if this event is part of the shot cycle
    pub fn is_shot_event(&self) -> bool {
        matches!(
            self,
            ControllerEvent::WakeStarted
                | ControllerEvent::WakeCancelled
                | ControllerEvent::ShotStarted
                | ControllerEvent::ShotFinished
                | ControllerEvent::ShotAborted
        )
    }

    /// Check if this event changes the session or the master enable
    pub fn is_session_event(&self) -> bool {
        matches!(
            self,
            ControllerEvent::SessionStarted
                | ControllerEvent::SessionExpired
                | ControllerEvent::SessionCancelled
                | ControllerEvent::AutoDisabled
        )
    }
}
