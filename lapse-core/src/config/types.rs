//! Configuration type definitions
//!
//! Defaults mirror the field-tested values of the first hardware revision.

use crate::input::DEFAULT_DEBOUNCE_MS;
use crate::params::Parameter;
use crate::time::Tick;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Widest row any supported panel has
pub const MAX_LCD_COLUMNS: usize = 20;

/// Narrowest row the menu labels fit in
pub const MIN_LCD_COLUMNS: u8 = 16;

/// Upper bound for any editable duration (24 h)
pub const MAX_DURATION_MS: Tick = 24 * 60 * 60 * 1000;

/// Which parameter set the menu exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Variant {
    /// Shoot forever: on/off time, wake flag, increment
    Basic,
    /// Bounded sessions with an enable switch and a live status page
    #[default]
    Extended,
}

impl Variant {
    /// Menu pages in MODE-button order
    pub fn modes(self) -> &'static [Parameter] {
        match self {
            Variant::Basic => &Parameter::BASIC_MODES,
            Variant::Extended => &Parameter::EXTENDED_MODES,
        }
    }

    /// Whether shots are gated by a bounded session
    pub fn has_sessions(self) -> bool {
        matches!(self, Variant::Extended)
    }
}

/// How UP/DOWN act on an on/off parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FlagPolicy {
    /// UP switches on, DOWN switches off; repeats are idempotent
    #[default]
    SetClear,
    /// UP and DOWN both flip the flag
    Toggle,
}

/// What happens to a shot that is in flight when the session runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SessionExpiryPolicy {
    /// Hold the relay until the shot's on-time completes
    #[default]
    FinishShot,
    /// Release the relay on the expiry tick
    AbortShot,
}

/// Durations, floors and step sizes (all in ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Relay hold per shot (ON TIME)
    pub shutter_hold_ms: Tick,
    /// Floor for ON TIME
    pub min_shutter_hold_ms: Tick,
    /// Gap from one shot's release to the next shot (OFF TIME)
    pub time_between_shots_ms: Tick,
    /// Floor for OFF TIME
    pub min_time_between_shots_ms: Tick,
    /// Length of the wake pulse
    pub wake_hold_ms: Tick,
    /// Lead time from wake pulse to shot
    pub wake_before_shot_ms: Tick,
    /// Step for ON/OFF TIME edits (INCREMENT)
    pub duration_increment_ms: Tick,
    /// Session length (SESSION TIME)
    pub session_duration_ms: Tick,
    /// Floor for SESSION TIME
    pub min_session_duration_ms: Tick,
    /// Step for SESSION TIME edits (SESSION INC)
    pub session_increment_ms: Tick,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            shutter_hold_ms: 2300,
            min_shutter_hold_ms: 500,
            time_between_shots_ms: 2000,
            min_time_between_shots_ms: 500,
            wake_hold_ms: 100,
            wake_before_shot_ms: 3000,
            duration_increment_ms: 5000,
            session_duration_ms: 900_000,
            min_session_duration_ms: 60_000,
            session_increment_ms: 60_000,
        }
    }
}

/// Board wiring options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HardwareConfig {
    /// 7-bit address of the LCD's PCF8574 backpack
    pub lcd_address: u8,
    /// Characters per LCD row
    pub lcd_columns: u8,
    /// Buttons read high when pressed
    pub buttons_active_high: bool,
    /// Relay closes on a high output
    pub relay_active_high: bool,
    /// Drive the wake pulse on the shutter relay line
    pub wake_on_relay: bool,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            lcd_address: 0x38,
            lcd_columns: 16,
            buttons_active_high: true,
            relay_active_high: true,
            wake_on_relay: true,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControllerConfig {
    /// Feature set
    pub variant: Variant,
    /// UP/DOWN behaviour on flags
    pub flag_policy: FlagPolicy,
    /// In-flight shot handling at session end
    pub session_expiry: SessionExpiryPolicy,
    /// Minimum ms between accepted presses of one button
    pub debounce_ms: Tick,
    /// Timing defaults
    pub timing: TimingConfig,
    /// Wiring
    pub hardware: HardwareConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            flag_policy: FlagPolicy::default(),
            session_expiry: SessionExpiryPolicy::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            timing: TimingConfig::default(),
            hardware: HardwareConfig::default(),
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A default duration sits below its floor
    BelowFloor,
    /// A floor or step is zero, or a duration exceeds [`MAX_DURATION_MS`]
    DurationOutOfRange,
    /// LCD width outside 16..=20
    LcdColumns,
    /// LCD address outside the 7-bit range
    LcdAddress,
}

impl ControllerConfig {
    /// Basic variant with default timings
    pub fn basic() -> Self {
        Self {
            variant: Variant::Basic,
            ..Self::default()
        }
    }

    /// Extended variant with default timings
    pub fn extended() -> Self {
        Self {
            variant: Variant::Extended,
            ..Self::default()
        }
    }

    /// Check invariants the state machine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;

        let floors = [
            t.min_shutter_hold_ms,
            t.min_time_between_shots_ms,
            t.min_session_duration_ms,
            t.duration_increment_ms,
            t.session_increment_ms,
        ];
        if floors.iter().any(|&v| v == 0) {
            return Err(ConfigError::DurationOutOfRange);
        }

        let durations = [
            t.shutter_hold_ms,
            t.time_between_shots_ms,
            t.wake_hold_ms,
            t.wake_before_shot_ms,
            t.session_duration_ms,
        ];
        if durations.iter().any(|&v| v > MAX_DURATION_MS) {
            return Err(ConfigError::DurationOutOfRange);
        }

        if t.shutter_hold_ms < t.min_shutter_hold_ms
            || t.time_between_shots_ms < t.min_time_between_shots_ms
            || t.session_duration_ms < t.min_session_duration_ms
        {
            return Err(ConfigError::BelowFloor);
        }

        let cols = self.hardware.lcd_columns;
        if cols < MIN_LCD_COLUMNS || cols as usize > MAX_LCD_COLUMNS {
            return Err(ConfigError::LcdColumns);
        }

        if self.hardware.lcd_address > 0x7F {
            return Err(ConfigError::LcdAddress);
        }

        Ok(())
    }
}
