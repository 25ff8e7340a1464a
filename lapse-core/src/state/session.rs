//! Bounded shooting session

use crate::time::{has_elapsed, remaining, Tick};

/// Session state (extended variant only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Session {
    /// No session running
    #[default]
    Inactive,
    /// Session running since `started`
    Active { started: Tick },
}

impl Session {
    /// Check if a session is running
    pub fn is_active(&self) -> bool {
        matches!(self, Session::Active { .. })
    }

    /// Tick the running session started at
    pub fn started(&self) -> Option<Tick> {
        match self {
            Session::Active { started } => Some(*started),
            Session::Inactive => None,
        }
    }

    /// Check if a running session has lasted `duration`
    pub fn has_expired(&self, now: Tick, duration: Tick) -> bool {
        match self {
            Session::Active { started } => has_elapsed(now, *started, duration),
            Session::Inactive => false,
        }
    }

    /// Ticks left in a running session
    pub fn remaining(&self, now: Tick, duration: Tick) -> Option<Tick> {
        self.started().map(|started| remaining(now, started, duration))
    }
}
