//! Parameter store
//!
//! Holds the live values of every editable quantity and which menu page is
//! selected. Values start from [`ControllerConfig`] defaults and are lost on
//! power cycle.

use crate::config::{ControllerConfig, TimingConfig, Variant, MAX_DURATION_MS};
use crate::params::parameter::{Parameter, ParameterKind};
use crate::time::Tick;

/// Live parameter values
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterStore {
    /// Menu pages for the active variant
    modes: &'static [Parameter],
    /// Index into `modes`, always `< modes.len()`
    selected: usize,
    /// Floors, fixed wake timings and the starting values
    timing: TimingConfig,
    shutter_hold: Tick,
    time_between_shots: Tick,
    session_duration: Tick,
    duration_increment: Tick,
    session_increment: Tick,
    shall_wake: bool,
    enabled: bool,
}

impl ParameterStore {
    /// Create a store with the configured defaults
    ///
    /// The basic variant has no enable switch and is always enabled. The
    /// extended variant boots disabled so nothing fires until the operator
    /// turns it on.
    pub fn new(config: &ControllerConfig) -> Self {
        let timing = config.timing;
        Self {
            modes: config.variant.modes(),
            selected: 0,
            timing,
            shutter_hold: timing.shutter_hold_ms,
            time_between_shots: timing.time_between_shots_ms,
            session_duration: timing.session_duration_ms,
            duration_increment: timing.duration_increment_ms,
            session_increment: timing.session_increment_ms,
            shall_wake: false,
            enabled: matches!(config.variant, Variant::Basic),
        }
    }

    /// Currently selected page
    pub fn selected(&self) -> Parameter {
        self.modes[self.selected]
    }

    /// Index of the selected page
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Number of pages in the menu
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Advance to the next page, wrapping after the last
    pub fn select_next(&mut self) -> Parameter {
        self.selected = (self.selected + 1) % self.modes.len();
        self.selected()
    }

    /// Relay hold per shot (ms)
    pub fn shutter_hold(&self) -> Tick {
        self.shutter_hold
    }

    /// Gap between shots (ms)
    pub fn time_between_shots(&self) -> Tick {
        self.time_between_shots
    }

    /// Session length (ms)
    pub fn session_duration(&self) -> Tick {
        self.session_duration
    }

    /// Step for on/off time edits (ms)
    pub fn duration_increment(&self) -> Tick {
        self.duration_increment
    }

    /// Step for session length edits (ms)
    pub fn session_increment(&self) -> Tick {
        self.session_increment
    }

    /// Length of the wake pulse (ms)
    pub fn wake_hold(&self) -> Tick {
        self.timing.wake_hold_ms
    }

    /// Lead time from wake pulse to shot (ms)
    pub fn wake_before_shot(&self) -> Tick {
        self.timing.wake_before_shot_ms
    }

    /// Pulse the wake line before shots
    pub fn shall_wake(&self) -> bool {
        self.shall_wake
    }

    /// Master enable
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Force the master enable (session expiry)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current value of a duration or step-size parameter
    pub fn duration(&self, parameter: Parameter) -> Option<Tick> {
        match parameter {
            Parameter::OnTime => Some(self.shutter_hold),
            Parameter::OffTime => Some(self.time_between_shots),
            Parameter::SessionDuration => Some(self.session_duration),
            Parameter::Increment => Some(self.duration_increment),
            Parameter::SessionIncrement => Some(self.session_increment),
            _ => None,
        }
    }

    /// Current value of a flag parameter
    pub fn flag(&self, parameter: Parameter) -> Option<bool> {
        match parameter {
            Parameter::ShallWake => Some(self.shall_wake),
            Parameter::Enabled => Some(self.enabled),
            _ => None,
        }
    }

    /// Floor for a duration parameter
    pub fn floor(&self, parameter: Parameter) -> Option<Tick> {
        match parameter {
            Parameter::OnTime => Some(self.timing.min_shutter_hold_ms),
            Parameter::OffTime => Some(self.timing.min_time_between_shots_ms),
            Parameter::SessionDuration => Some(self.timing.min_session_duration_ms),
            _ => None,
        }
    }

    /// Step applied to a duration parameter
    pub fn step(&self, parameter: Parameter) -> Option<Tick> {
        match parameter {
            Parameter::OnTime | Parameter::OffTime => Some(self.duration_increment),
            Parameter::SessionDuration => Some(self.session_increment),
            _ => None,
        }
    }

    /// Store a duration or step-size value
    ///
    /// Durations are clamped into `[floor, MAX_DURATION_MS]`. Returns the
    /// value actually stored.
    pub fn set_duration(&mut self, parameter: Parameter, value: Tick) -> Option<Tick> {
        let value = match parameter.kind() {
            ParameterKind::Duration => {
                let floor = self.floor(parameter)?;
                value.clamp(floor, MAX_DURATION_MS.max(floor))
            }
            ParameterKind::StepSize => value.max(1),
            _ => return None,
        };

        let slot = match parameter {
            Parameter::OnTime => &mut self.shutter_hold,
            Parameter::OffTime => &mut self.time_between_shots,
            Parameter::SessionDuration => &mut self.session_duration,
            Parameter::Increment => &mut self.duration_increment,
            Parameter::SessionIncrement => &mut self.session_increment,
            _ => return None,
        };
        *slot = value;
        Some(value)
    }

    /// Store a flag value
    pub fn set_flag(&mut self, parameter: Parameter, value: bool) -> Option<bool> {
        match parameter {
            Parameter::ShallWake => self.shall_wake = value,
            Parameter::Enabled => self.enabled = value,
            _ => return None,
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let store = ParameterStore::new(&ControllerConfig::extended());
        assert_eq!(store.selected(), Parameter::OnTime);
        assert_eq!(store.shutter_hold(), 2300);
        assert_eq!(store.time_between_shots(), 2000);
        assert_eq!(store.wake_hold(), 100);
        assert_eq!(store.wake_before_shot(), 3000);
        assert!(!store.shall_wake());
        assert!(!store.is_enabled());
    }

    #[test]
    fn test_basic_always_enabled() {
        let store = ParameterStore::new(&ControllerConfig::basic());
        assert!(store.is_enabled());
        assert_eq!(store.mode_count(), 4);
    }

    #[test]
    fn test_select_next_wraps() {
        let mut store = ParameterStore::new(&ControllerConfig::basic());
        assert_eq!(store.select_next(), Parameter::OffTime);
        assert_eq!(store.select_next(), Parameter::ShallWake);
        assert_eq!(store.select_next(), Parameter::Increment);
        assert_eq!(store.select_next(), Parameter::OnTime);
    }

    #[test]
    fn test_set_duration_clamps_to_floor() {
        let mut store = ParameterStore::new(&ControllerConfig::default());
        assert_eq!(store.set_duration(Parameter::OnTime, 10), Some(500));
        assert_eq!(store.shutter_hold(), 500);
        assert_eq!(
            store.set_duration(Parameter::SessionDuration, 1_000),
            Some(60_000)
        );
    }

    #[test]
    fn test_set_duration_clamps_to_ceiling() {
        let mut store = ParameterStore::new(&ControllerConfig::default());
        assert_eq!(
            store.set_duration(Parameter::OffTime, u32::MAX),
            Some(MAX_DURATION_MS)
        );
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let mut store = ParameterStore::new(&ControllerConfig::default());
        assert_eq!(store.set_duration(Parameter::ShallWake, 5), None);
        assert_eq!(store.set_flag(Parameter::OnTime, true), None);
        assert_eq!(store.set_flag(Parameter::SessionRunning, true), None);
    }

    proptest! {
        #[test]
        fn selection_index_stays_in_range(presses in 0usize..200, extended in any::<bool>()) {
            let config = if extended { ControllerConfig::extended() } else { ControllerConfig::basic() };
            let mut store = ParameterStore::new(&config);
            for _ in 0..presses {
                store.select_next();
                prop_assert!(store.selected_index() < store.mode_count());
            }
            prop_assert_eq!(store.selected_index(), presses % store.mode_count());
        }
    }
}
