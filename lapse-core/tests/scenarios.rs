//! Whole-controller scenarios driven tick by tick

use lapse_core::config::{ControllerConfig, SessionExpiryPolicy};
use lapse_core::input::{Button, ButtonLevels};
use lapse_core::params::Parameter;
use lapse_core::state::ControllerEvent;
use lapse_core::{Controller, Tick, TickReport};
use proptest::prelude::*;

struct Harness {
    controller: Controller,
    now: Tick,
    log: Vec<(Tick, ControllerEvent)>,
}

impl Harness {
    fn new(config: ControllerConfig, boot: Tick) -> Self {
        Self {
            controller: Controller::new(config, boot),
            now: boot,
            log: Vec::new(),
        }
    }

    fn tick_with(&mut self, levels: ButtonLevels) -> TickReport {
        let report = self.controller.tick(self.now, levels);
        let state = self.controller.state();

        assert_eq!(report.outputs.relay, state.cycle.is_shooting());
        assert!(!(report.outputs.relay && report.outputs.wake));
        if !state.params.is_enabled() {
            assert!(!report.outputs.relay, "relay closed while disabled at {}", self.now);
        }

        self.log
            .extend(report.events.iter().map(|&event| (self.now, event)));
        report
    }

    /// Advance past the debounce window and press one button
    fn press(&mut self, button: Button) -> TickReport {
        self.now = self.now.wrapping_add(200);
        self.tick_with(ButtonLevels::only(button))
    }

    fn select(&mut self, parameter: Parameter) {
        while self.controller.state().params.selected() != parameter {
            self.press(Button::Mode);
        }
    }

    /// Tick with no buttons held until `duration` has passed
    fn run(&mut self, duration: Tick, step: Tick) {
        let mut left = duration;
        while left > 0 {
            let dt = step.min(left);
            self.now = self.now.wrapping_add(dt);
            left -= dt;
            self.tick_with(ButtonLevels::NONE);
        }
    }

    fn times_of(&self, event: ControllerEvent) -> Vec<Tick> {
        self.log
            .iter()
            .filter(|(_, e)| *e == event)
            .map(|(t, _)| *t)
            .collect()
    }

    /// Let the boot gap pass, then switch ENABLED on
    fn enable(&mut self) {
        self.run(2_000, 10);
        self.select(Parameter::Enabled);
        self.press(Button::Up);
        assert!(self.controller.state().params.is_enabled());
    }
}

fn steady(times: &[Tick]) -> Option<Tick> {
    let gaps: Vec<Tick> = times.windows(2).map(|w| w[1].wrapping_sub(w[0])).collect();
    let first = *gaps.first()?;
    gaps.iter().all(|&g| g == first).then_some(first)
}

#[test]
fn session_disables_after_full_duration() {
    let mut h = Harness::new(ControllerConfig::extended(), 0);
    h.enable();
    let started = h
        .controller
        .state()
        .session
        .started()
        .expect("session starts with enable");

    h.run(899_999 - h.now.wrapping_sub(started), 10);
    assert_eq!(h.now, started + 899_999);
    assert!(h.controller.state().session.is_active());
    assert!(h.controller.state().params.is_enabled());

    h.run(1, 1);
    assert!(!h.controller.state().session.is_active());
    assert_eq!(h.times_of(ControllerEvent::SessionExpired), vec![started + 900_000]);

    // An in-flight shot may finish; after that the controller is off
    h.run(10_000, 1);
    let disabled_at = h.times_of(ControllerEvent::AutoDisabled);
    assert_eq!(disabled_at.len(), 1);
    assert!(disabled_at[0] >= started + 900_000);
    assert!(!h.controller.state().params.is_enabled());

    let shots_after = h
        .times_of(ControllerEvent::ShotStarted)
        .into_iter()
        .filter(|&t| t >= started + 900_000)
        .count();
    assert_eq!(shots_after, 0);
}

#[test]
fn session_abort_policy_disables_on_the_dot() {
    let mut config = ControllerConfig::extended();
    config.session_expiry = SessionExpiryPolicy::AbortShot;
    let mut h = Harness::new(config, 0);
    h.enable();
    let started = h.controller.state().session.started().unwrap();

    h.run(900_000 - h.now.wrapping_sub(started), 10);
    assert_eq!(h.times_of(ControllerEvent::AutoDisabled), vec![started + 900_000]);
    assert!(!h.controller.state().cycle.is_shooting());
}

#[test]
fn wake_period_is_constant_when_gap_shorter_than_lead() {
    // Gap 2000, wake lead 3000, wake hold 100
    let mut h = Harness::new(ControllerConfig::basic(), 0);
    h.select(Parameter::ShallWake);
    h.press(Button::Up);
    h.run(120_000, 1);

    let wakes = h.times_of(ControllerEvent::WakeStarted);
    let shots = h.times_of(ControllerEvent::ShotStarted);
    let stops = h.times_of(ControllerEvent::ShotFinished);
    assert!(shots.len() > 20);

    // Each shot lands at the end of its wake window
    for shot in &shots {
        let wake = wakes.iter().rev().find(|&&w| w <= *shot).unwrap();
        assert_eq!(shot - wake, 3000);
    }
    // Wake opens one pulse length after the previous shot stops so the
    // shared relay line is seen to release
    for stop in &stops {
        assert!(wakes.contains(&(stop + 100)));
    }
    assert_eq!(steady(&shots), Some(2300 + 100 + 3000));
}

#[test]
fn wake_on_separate_line_opens_at_stop() {
    let mut config = ControllerConfig::basic();
    config.hardware.wake_on_relay = false;
    let mut h = Harness::new(config, 0);
    h.select(Parameter::ShallWake);
    h.press(Button::Up);
    h.run(60_000, 1);

    let wakes = h.times_of(ControllerEvent::WakeStarted);
    let stops = h.times_of(ControllerEvent::ShotFinished);
    assert!(stops.len() > 5);
    for stop in &stops {
        assert!(wakes.contains(stop));
    }
    assert_eq!(steady(&h.times_of(ControllerEvent::ShotStarted)), Some(2300 + 3000));
}

#[test]
fn wake_period_is_exact_when_gap_covers_lead() {
    let mut config = ControllerConfig::basic();
    config.timing.time_between_shots_ms = 12_000;
    let mut h = Harness::new(config, 0);
    h.select(Parameter::ShallWake);
    h.press(Button::Up);
    h.run(200_000, 1);

    let shots = h.times_of(ControllerEvent::ShotStarted);
    let stops = h.times_of(ControllerEvent::ShotFinished);
    assert!(shots.len() > 10);
    assert_eq!(steady(&shots), Some(2300 + 12_000));

    for (stop, next) in stops.iter().zip(shots.iter().skip(1)) {
        assert_eq!(next - stop, 12_000);
    }
}

#[test]
fn wake_pulse_is_short() {
    let mut h = Harness::new(ControllerConfig::basic(), 0);
    h.select(Parameter::ShallWake);
    h.press(Button::Up);

    let wake_at = h.now;
    assert!(h.controller.state().cycle.is_waking());
    h.run(99, 1);
    assert!(h.tick_with(ButtonLevels::NONE).outputs.wake);
    h.run(1, 1);
    assert!(!h.tick_with(ButtonLevels::NONE).outputs.wake);
    assert_eq!(h.now, wake_at + 100);
}

#[test]
fn holding_up_and_down_on_shall_wake_is_idempotent() {
    let mut h = Harness::new(ControllerConfig::basic(), 0);
    h.select(Parameter::ShallWake);
    h.log.clear();

    for _ in 0..400 {
        h.now += 5;
        h.tick_with(ButtonLevels::only(Button::Up));
    }
    assert!(h.controller.state().params.shall_wake());
    let set = ControllerEvent::FlagChanged {
        parameter: Parameter::ShallWake,
        value: true,
    };
    assert_eq!(h.times_of(set).len(), 1);

    for _ in 0..400 {
        h.now += 5;
        h.tick_with(ButtonLevels::only(Button::Down));
    }
    assert!(!h.controller.state().params.shall_wake());
    let clear = ControllerEvent::FlagChanged {
        parameter: Parameter::ShallWake,
        value: false,
    };
    assert_eq!(h.times_of(clear).len(), 1);
}

#[test]
fn holding_down_stops_at_floor() {
    let mut h = Harness::new(ControllerConfig::basic(), 0);
    h.select(Parameter::OffTime);
    h.press(Button::Up);
    h.press(Button::Up);
    assert_eq!(h.controller.state().params.time_between_shots(), 12_000);

    for _ in 0..1000 {
        h.now += 5;
        h.tick_with(ButtonLevels::only(Button::Down));
    }
    assert_eq!(h.controller.state().params.time_between_shots(), 500);
}

#[test]
fn shots_continue_across_clock_wrap() {
    let boot = u32::MAX - 999;
    let mut h = Harness::new(ControllerConfig::basic(), boot);
    h.run(20_000, 1);

    let shots = h.times_of(ControllerEvent::ShotStarted);
    assert_eq!(shots[0], boot.wrapping_add(2000));
    assert!(shots[0] < boot, "first shot lands after the wrap");
    assert_eq!(steady(&shots), Some(2300 + 2000));
}

#[test]
fn session_expires_across_clock_wrap() {
    let mut config = ControllerConfig::extended();
    config.timing.session_duration_ms = 60_000;
    let boot = u32::MAX - 30_000;
    let mut h = Harness::new(config, boot);
    h.enable();
    let started = h.controller.state().session.started().unwrap();

    h.run(59_999 - h.now.wrapping_sub(started), 1);
    assert!(h.controller.state().session.is_active());
    h.run(1, 1);
    assert_eq!(
        h.times_of(ControllerEvent::SessionExpired),
        vec![started.wrapping_add(60_000)]
    );
}

#[test]
fn disabling_mid_shot_releases_relay_same_tick() {
    let mut h = Harness::new(ControllerConfig::extended(), 0);
    h.enable();
    assert!(h.controller.state().cycle.is_shooting());

    let report = h.press(Button::Down);
    assert!(!report.outputs.relay);
    assert!(report.events.contains(&ControllerEvent::ShotAborted));
    assert!(report.events.contains(&ControllerEvent::SessionCancelled));
    assert_eq!(h.controller.state().cycle.last_shot_stop_time(), h.now);

    // Re-enabling waits a full gap from the aborted shot
    let stopped = h.now;
    h.press(Button::Up);
    h.run(3_000, 1);
    let restarted = h.times_of(ControllerEvent::SessionStarted);
    assert_eq!(restarted.last().copied(), Some(stopped + 2000));
}

#[test]
fn session_page_counts_down() {
    let mut h = Harness::new(ControllerConfig::extended(), 0);
    h.enable();
    h.select(Parameter::SessionRunning);
    let started = h.controller.state().session.started().unwrap();

    h.run(61_000 - h.now.wrapping_sub(started), 10);
    let report = h.tick_with(ButtonLevels::NONE);
    assert_eq!(report.screen.row(1).unwrap().trim_end(), "RUN 13:59");
}

#[test]
fn session_page_shows_ending_while_last_shot_finishes() {
    let mut config = ControllerConfig::extended();
    config.timing.session_duration_ms = 60_000;
    config.timing.shutter_hold_ms = 70_000;
    let mut h = Harness::new(config, 0);
    h.enable();
    h.select(Parameter::SessionRunning);
    let started = h.controller.state().session.started().unwrap();
    assert!(h.controller.state().cycle.is_shooting());

    h.run(60_000 - h.now.wrapping_sub(started), 10);
    let report = h.tick_with(ButtonLevels::NONE);
    assert!(report.outputs.relay);
    assert_eq!(report.screen.row(1).unwrap().trim_end(), "ENDING");

    h.run(10_000, 10);
    let report = h.tick_with(ButtonLevels::NONE);
    assert!(!report.outputs.relay);
    assert_eq!(report.screen.row(1).unwrap().trim_end(), "STOPPED");
}

fn arb_levels() -> impl Strategy<Value = ButtonLevels> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(up, down, mode)| ButtonLevels {
        up,
        down,
        mode,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn relay_tracks_shutter_phase(
        boot in any::<u32>(),
        extended in any::<bool>(),
        steps in prop::collection::vec((1u32..400, arb_levels()), 1..400),
    ) {
        let config = if extended { ControllerConfig::extended() } else { ControllerConfig::basic() };
        let mut h = Harness::new(config, boot);
        for (dt, levels) in steps {
            h.now = h.now.wrapping_add(dt);
            // Harness asserts the relay invariants on every tick
            h.tick_with(levels);
            let params = &h.controller.state().params;
            prop_assert!(params.selected_index() < params.mode_count());
            prop_assert!(params.shutter_hold() >= 500);
            prop_assert!(params.time_between_shots() >= 500);
            prop_assert!(params.session_duration() >= 60_000);
        }
    }
}
