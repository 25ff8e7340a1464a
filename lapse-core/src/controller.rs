//! Top-level tick
//!
//! One call to [`Controller::tick`] runs the whole pipeline in a fixed
//! order: debounce buttons, apply presses to the parameter store, evaluate
//! the shot cycle and session, then render the screen. Nothing is
//! interleaved and nothing blocks.

use crate::config::ControllerConfig;
use crate::display::{self, Screen};
use crate::input::{ButtonBank, ButtonLevels};
use crate::params::{ModeNavigator, ParameterStore};
use crate::state::{self, EventList, Outputs, Session, ShotCycle};
use crate::time::Tick;
use crate::traits::{ButtonSource, Clock, DisplayError, ShutterActuator, TextDisplay};

/// All mutable controller state
#[derive(Debug, Clone)]
pub struct ControllerState {
    /// Operator-adjustable values and the selected page
    pub params: ParameterStore,
    /// Wake/shot phase and timestamps
    pub cycle: ShotCycle,
    /// Session (always inactive in the basic variant)
    pub session: Session,
    /// Per-button debouncers
    pub buttons: ButtonBank,
}

impl ControllerState {
    /// Fresh state at boot
    ///
    /// The boot tick doubles as the last shot stop, so the first shot waits
    /// one full gap.
    pub fn new(config: &ControllerConfig, now: Tick) -> Self {
        Self {
            params: ParameterStore::new(config),
            cycle: ShotCycle::new(now),
            session: Session::Inactive,
            buttons: ButtonBank::new(config.debounce_ms, now),
        }
    }
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Tick the pipeline ran at
    pub now: Tick,
    /// Relay and wake levels to drive
    pub outputs: Outputs,
    /// What happened, in order
    pub events: EventList,
    /// Rendered screen
    pub screen: Screen,
    /// Display write failure, if any (from [`Controller::run_tick`])
    pub display_error: Option<DisplayError>,
}

/// The intervalometer
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    navigator: ModeNavigator,
    state: ControllerState,
}

impl Controller {
    /// Create a controller booting at `now`
    pub fn new(config: ControllerConfig, now: Tick) -> Self {
        Self {
            navigator: ModeNavigator::new(config.flag_policy),
            state: ControllerState::new(&config, now),
            config,
        }
    }

    /// Run one tick against raw button levels
    pub fn tick(&mut self, now: Tick, levels: ButtonLevels) -> TickReport {
        let mut events = EventList::new();
        let st = &mut self.state;

        let presses = st.buttons.poll(levels, now);
        self.navigator
            .handle_presses(&mut st.params, presses, &mut events);

        let outputs = state::update(
            &mut st.cycle,
            &mut st.session,
            &mut st.params,
            &self.config,
            now,
            &mut events,
        );

        let screen = display::present(
            &st.params,
            &st.session,
            &st.cycle,
            now,
            self.config.hardware.lcd_columns,
        );

        TickReport {
            now,
            outputs,
            events,
            screen,
            display_error: None,
        }
    }

    /// Read the collaborators, tick, and drive the outputs
    ///
    /// Outputs are driven before the display is written so a slow or failing
    /// display never delays the relay.
    pub fn run_tick<C, B, A, D>(
        &mut self,
        clock: &C,
        buttons: &mut B,
        actuator: &mut A,
        display: &mut D,
    ) -> TickReport
    where
        C: Clock,
        B: ButtonSource,
        A: ShutterActuator,
        D: TextDisplay,
    {
        let now = clock.now();
        let levels = buttons.read();
        let mut report = self.tick(now, levels);

        actuator.set_relay(report.outputs.relay);
        actuator.set_wake(report.outputs.wake);

        report.display_error = display.render(&report.screen).err();
        report
    }

    /// Current state
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Boot splash sized for the configured panel
    pub fn splash(&self) -> Screen {
        display::splash(self.config.hardware.lcd_columns)
    }
}
