//! Parameter identities and their editing rules

use crate::time::Tick;

/// Step sizes offered by the INCREMENT page (ms)
pub const DURATION_STEP_LADDER: [Tick; 7] = [100, 500, 1_000, 5_000, 10_000, 30_000, 60_000];

/// Step sizes offered by the SESSION INC page (ms)
pub const SESSION_STEP_LADDER: [Tick; 6] =
    [60_000, 300_000, 600_000, 900_000, 1_800_000, 3_600_000];

/// Menu pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    /// Relay hold per shot
    OnTime,
    /// Gap between shots
    OffTime,
    /// Session length
    SessionDuration,
    /// Step for session length edits
    SessionIncrement,
    /// Pulse the wake line before each shot
    ShallWake,
    /// Master enable (starts a session)
    Enabled,
    /// Step for on/off time edits
    Increment,
    /// Live session status, not editable
    SessionRunning,
}

/// How a parameter responds to UP/DOWN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterKind {
    /// Millisecond value with a floor, stepped by an increment parameter
    Duration,
    /// Step size chosen from a fixed ladder
    StepSize,
    /// On/off
    Flag,
    /// Display only
    ReadOnly,
}

impl Parameter {
    /// Pages of the basic menu
    pub const BASIC_MODES: [Parameter; 4] = [
        Parameter::OnTime,
        Parameter::OffTime,
        Parameter::ShallWake,
        Parameter::Increment,
    ];

    /// Pages of the extended menu
    pub const EXTENDED_MODES: [Parameter; 8] = [
        Parameter::OnTime,
        Parameter::OffTime,
        Parameter::SessionDuration,
        Parameter::SessionIncrement,
        Parameter::ShallWake,
        Parameter::Enabled,
        Parameter::Increment,
        Parameter::SessionRunning,
    ];

    /// Name shown on the first display row
    pub const fn label(self) -> &'static str {
        match self {
            Parameter::OnTime => "ON TIME",
            Parameter::OffTime => "OFF TIME",
            Parameter::SessionDuration => "SESSION TIME",
            Parameter::SessionIncrement => "SESSION INC",
            Parameter::ShallWake => "SHALL WAKE",
            Parameter::Enabled => "ENABLED",
            Parameter::Increment => "INCREMENT",
            Parameter::SessionRunning => "SESSION",
        }
    }

    /// Editing rule
    pub const fn kind(self) -> ParameterKind {
        match self {
            Parameter::OnTime | Parameter::OffTime | Parameter::SessionDuration => {
                ParameterKind::Duration
            }
            Parameter::Increment | Parameter::SessionIncrement => ParameterKind::StepSize,
            Parameter::ShallWake | Parameter::Enabled => ParameterKind::Flag,
            Parameter::SessionRunning => ParameterKind::ReadOnly,
        }
    }

    /// Ladder for step-size parameters
    pub fn ladder(self) -> Option<&'static [Tick]> {
        match self {
            Parameter::Increment => Some(&DURATION_STEP_LADDER),
            Parameter::SessionIncrement => Some(&SESSION_STEP_LADDER),
            _ => None,
        }
    }
}

/// Next rung strictly above `value`; `value` itself at or past the top
pub(crate) fn ladder_up(ladder: &[Tick], value: Tick) -> Tick {
    ladder
        .iter()
        .copied()
        .find(|&rung| rung > value)
        .unwrap_or(value)
}

/// Next rung strictly below `value`; `value` itself at or past the bottom
pub(crate) fn ladder_down(ladder: &[Tick], value: Tick) -> Tick {
    ladder
        .iter()
        .rev()
        .copied()
        .find(|&rung| rung < value)
        .unwrap_or(value)
}
