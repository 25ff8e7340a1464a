//! Mode navigation
//!
//! MODE cycles the selected page. UP/DOWN edit the selected page according
//! to its [`ParameterKind`]:
//!
//! | Kind       | UP                          | DOWN                              |
//! |------------|-----------------------------|-----------------------------------|
//! | Duration   | add step                    | subtract step, saturate at floor  |
//! | StepSize   | next ladder rung            | previous ladder rung              |
//! | Flag       | set (or toggle)             | clear (or toggle)                 |
//! | ReadOnly   | nothing                     | nothing                           |

use crate::config::FlagPolicy;
use crate::input::{Button, Presses};
use crate::params::parameter::{ladder_down, ladder_up, Parameter, ParameterKind};
use crate::params::store::ParameterStore;
use crate::state::{ControllerEvent, EventList};
use crate::time::Tick;

/// Edit direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// UP button
    Up,
    /// DOWN button
    Down,
}

/// Applies button presses to a [`ParameterStore`]
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeNavigator {
    flag_policy: FlagPolicy,
}

impl ModeNavigator {
    /// Create a navigator
    pub fn new(flag_policy: FlagPolicy) -> Self {
        Self { flag_policy }
    }

    /// Flag policy in use
    pub fn flag_policy(&self) -> FlagPolicy {
        self.flag_policy
    }

    /// Apply one tick's presses
    ///
    /// UP and DOWN act on the page that was on screen when they were
    /// pressed; MODE is applied last.
    pub fn handle_presses(&self, store: &mut ParameterStore, presses: Presses, events: &mut EventList) {
        if presses.contains(Button::Up) {
            if let Some(event) = self.increment(store) {
                let _ = events.push(event);
            }
        }
        if presses.contains(Button::Down) {
            if let Some(event) = self.decrement(store) {
                let _ = events.push(event);
            }
        }
        if presses.contains(Button::Mode) {
            let _ = events.push(self.select_next(store));
        }
    }

    /// Advance the selected page
    pub fn select_next(&self, store: &mut ParameterStore) -> ControllerEvent {
        ControllerEvent::ModeSelected(store.select_next())
    }

    /// UP on the selected page
    pub fn increment(&self, store: &mut ParameterStore) -> Option<ControllerEvent> {
        self.adjust(store, Direction::Up)
    }

    /// DOWN on the selected page
    pub fn decrement(&self, store: &mut ParameterStore) -> Option<ControllerEvent> {
        self.adjust(store, Direction::Down)
    }

    /// Edit the selected page
    ///
    /// Returns an event only when a value actually changed.
    pub fn adjust(&self, store: &mut ParameterStore, dir: Direction) -> Option<ControllerEvent> {
        let parameter = store.selected();
        match parameter.kind() {
            ParameterKind::Duration => self.adjust_duration(store, parameter, dir),
            ParameterKind::StepSize => self.adjust_step(store, parameter, dir),
            ParameterKind::Flag => self.adjust_flag(store, parameter, dir),
            ParameterKind::ReadOnly => None,
        }
    }

    fn adjust_duration(
        &self,
        store: &mut ParameterStore,
        parameter: Parameter,
        dir: Direction,
    ) -> Option<ControllerEvent> {
        let current = store.duration(parameter)?;
        let step = store.step(parameter)?;
        let target = match dir {
            Direction::Up => current.saturating_add(step),
            // Clamped to the floor by the store
            Direction::Down => current.saturating_sub(step),
        };
        let stored = store.set_duration(parameter, target)?;
        changed_duration(parameter, current, stored)
    }

    fn adjust_step(
        &self,
        store: &mut ParameterStore,
        parameter: Parameter,
        dir: Direction,
    ) -> Option<ControllerEvent> {
        let ladder = parameter.ladder()?;
        let current = store.duration(parameter)?;
        let target = match dir {
            Direction::Up => ladder_up(ladder, current),
            Direction::Down => ladder_down(ladder, current),
        };
        let stored = store.set_duration(parameter, target)?;
        changed_duration(parameter, current, stored)
    }

    fn adjust_flag(
        &self,
        store: &mut ParameterStore,
        parameter: Parameter,
        dir: Direction,
    ) -> Option<ControllerEvent> {
        let current = store.flag(parameter)?;
        let target = match (self.flag_policy, dir) {
            (FlagPolicy::SetClear, Direction::Up) => true,
            (FlagPolicy::SetClear, Direction::Down) => false,
            (FlagPolicy::Toggle, _) => !current,
        };
        if target == current {
            return None;
        }
        store.set_flag(parameter, target)?;
        Some(ControllerEvent::FlagChanged {
            parameter,
            value: target,
        })
    }
}

fn changed_duration(parameter: Parameter, before: Tick, after: Tick) -> Option<ControllerEvent> {
    (before != after).then_some(ControllerEvent::DurationChanged {
        parameter,
        value_ms: after,
    })
}
