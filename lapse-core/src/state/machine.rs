//! Shot cycle state machine
//!
//! ```text
//!            lead elapsed (wake on)          max(wake hold, wake lead) elapsed
//!   Idle ───────────────────────────► Waking ────────────────────────────┐
//!    ▲ │                                                                  ▼
//!    │ └───────────────────────────────────────────────────────────► ShutterHeld
//!    │          time between shots elapsed (wake off)                     │
//!    └────────────────────────────────────────────────────────────────────┘
//!                               shutter hold elapsed
//! ```
//!
//! The relay is closed exactly while the phase is [`ShotPhase::ShutterHeld`].
//! The wake pulse is a separate output, high for the first `wake_hold` ticks
//! of [`ShotPhase::Waking`].

use crate::config::{ControllerConfig, SessionExpiryPolicy};
use crate::params::ParameterStore;
use crate::state::events::{ControllerEvent, EventList};
use crate::state::session::Session;
use crate::time::{elapsed, has_elapsed, Tick};

/// Phase of the shot cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShotPhase {
    /// Waiting for the next shot
    Idle,
    /// Wake pulse issued, shot pending
    Waking { since: Tick },
    /// Relay closed
    ShutterHeld { since: Tick },
}

/// Requested output levels for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    /// Shutter relay closed
    pub relay: bool,
    /// Wake line asserted
    pub wake: bool,
}

impl Outputs {
    /// Everything released
    pub const RELEASED: Self = Self {
        relay: false,
        wake: false,
    };
}

/// Transient shot state with its timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShotCycle {
    phase: ShotPhase,
    last_wake_time: Tick,
    last_shot_time: Tick,
    last_shot_stop_time: Tick,
    /// Session expired during a shot; disable once the relay opens
    draining: bool,
}

impl ShotCycle {
    /// Idle cycle whose last shot stopped at `now`
    pub fn new(now: Tick) -> Self {
        Self {
            phase: ShotPhase::Idle,
            last_wake_time: now,
            last_shot_time: now,
            last_shot_stop_time: now,
            draining: false,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    /// Check if the relay is closed
    pub fn is_shooting(&self) -> bool {
        matches!(self.phase, ShotPhase::ShutterHeld { .. })
    }

    /// Check if a wake window is open
    pub fn is_waking(&self) -> bool {
        matches!(self.phase, ShotPhase::Waking { .. })
    }

    /// Check if the cycle is finishing a shot after session expiry
    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Tick the last wake pulse started
    pub fn last_wake_time(&self) -> Tick {
        self.last_wake_time
    }

    /// Tick the last shot started
    pub fn last_shot_time(&self) -> Tick {
        self.last_shot_time
    }

    /// Tick the last shot stopped (boot time before the first shot)
    pub fn last_shot_stop_time(&self) -> Tick {
        self.last_shot_stop_time
    }

    /// Output levels implied by the phase
    pub fn outputs(&self, now: Tick, wake_hold: Tick) -> Outputs {
        match self.phase {
            ShotPhase::Idle => Outputs::RELEASED,
            ShotPhase::Waking { since } => Outputs {
                relay: false,
                wake: elapsed(now, since) < wake_hold,
            },
            ShotPhase::ShutterHeld { .. } => Outputs {
                relay: true,
                wake: false,
            },
        }
    }

    /// Drop to idle, releasing everything
    ///
    /// A shot cut short still counts as the last stop so the next one waits
    /// a full gap.
    pub fn cancel(&mut self, now: Tick, events: &mut EventList) {
        match self.phase {
            ShotPhase::ShutterHeld { .. } => {
                self.last_shot_stop_time = now;
                let _ = events.push(ControllerEvent::ShotAborted);
            }
            ShotPhase::Waking { .. } => {
                let _ = events.push(ControllerEvent::WakeCancelled);
            }
            ShotPhase::Idle => {}
        }
        self.phase = ShotPhase::Idle;
        self.draining = false;
    }

    fn cancel_wake(&mut self, events: &mut EventList) {
        if self.is_waking() {
            self.phase = ShotPhase::Idle;
            let _ = events.push(ControllerEvent::WakeCancelled);
        }
    }

    fn start_shot(&mut self, now: Tick, events: &mut EventList) {
        self.phase = ShotPhase::ShutterHeld { since: now };
        self.last_shot_time = now;
        let _ = events.push(ControllerEvent::ShotStarted);
    }

    /// Open the relay once the hold has elapsed
    fn finish_shot_if_due(&mut self, now: Tick, hold: Tick, events: &mut EventList) -> bool {
        if let ShotPhase::ShutterHeld { since } = self.phase {
            if has_elapsed(now, since, hold) {
                self.phase = ShotPhase::Idle;
                self.last_shot_stop_time = now;
                let _ = events.push(ControllerEvent::ShotFinished);
                return true;
            }
        }
        false
    }

    /// Apply one wake/shot transition; returns true if the phase changed
    ///
    /// `min_lead` is the shortest time the line stays open between a stop
    /// and the next wake pulse.
    fn advance(
        &mut self,
        params: &ParameterStore,
        min_lead: Tick,
        now: Tick,
        events: &mut EventList,
    ) -> bool {
        match self.phase {
            ShotPhase::Idle => {
                let since_stop = elapsed(now, self.last_shot_stop_time);
                let gap = params.time_between_shots();
                if params.shall_wake() {
                    let lead = gap
                        .saturating_sub(params.wake_before_shot())
                        .max(min_lead);
                    if since_stop >= lead {
                        self.phase = ShotPhase::Waking { since: now };
                        self.last_wake_time = now;
                        let _ = events.push(ControllerEvent::WakeStarted);
                        return true;
                    }
                } else if since_stop >= gap {
                    self.start_shot(now, events);
                    return true;
                }
                false
            }
            ShotPhase::Waking { since } => {
                let settle = params.wake_hold().max(params.wake_before_shot());
                if has_elapsed(now, since, settle) {
                    self.start_shot(now, events);
                    return true;
                }
                false
            }
            ShotPhase::ShutterHeld { .. } => {
                self.finish_shot_if_due(now, params.shutter_hold(), events)
            }
        }
    }
}

/// Evaluate one tick of the shot cycle and session
///
/// Order of evaluation:
///
/// 1. Disabled: cancel everything and end the session.
/// 2. Finishing a shot after session expiry: wait for the relay to open,
///    then switch off.
/// 3. Session start once enabled and a full gap has passed since the last
///    shot stopped.
/// 4. Session expiry.
/// 5. Wake, shot start and shot stop, chained so a stop and the next wake
///    can land on the same tick. When the wake pulse shares the relay line
///    the wake waits at least one wake hold after the stop.
pub fn update(
    cycle: &mut ShotCycle,
    session: &mut Session,
    params: &mut ParameterStore,
    config: &ControllerConfig,
    now: Tick,
    events: &mut EventList,
) -> Outputs {
    let wake_hold = params.wake_hold();

    if !params.is_enabled() {
        cycle.cancel(now, events);
        if session.is_active() {
            *session = Session::Inactive;
            let _ = events.push(ControllerEvent::SessionCancelled);
        }
        return cycle.outputs(now, wake_hold);
    }

    if cycle.draining {
        drain(cycle, params, now, events);
        return cycle.outputs(now, wake_hold);
    }

    if config.variant.has_sessions() {
        if !session.is_active()
            && has_elapsed(now, cycle.last_shot_stop_time, params.time_between_shots())
        {
            *session = Session::Active { started: now };
            let _ = events.push(ControllerEvent::SessionStarted);
        }

        if session.has_expired(now, params.session_duration()) {
            *session = Session::Inactive;
            let _ = events.push(ControllerEvent::SessionExpired);
            match config.session_expiry {
                SessionExpiryPolicy::AbortShot => {
                    cycle.cancel(now, events);
                    disable(params, events);
                }
                SessionExpiryPolicy::FinishShot => {
                    cycle.cancel_wake(events);
                    cycle.draining = true;
                    drain(cycle, params, now, events);
                }
            }
            return cycle.outputs(now, wake_hold);
        }

        if !session.is_active() {
            // No new shots outside a session; a held one still completes
            cycle.finish_shot_if_due(now, params.shutter_hold(), events);
            return cycle.outputs(now, wake_hold);
        }
    }

    // A wake pulse sharing the relay line must not merge with the shot
    // that just released it
    let min_lead = if config.hardware.wake_on_relay {
        wake_hold
    } else {
        0
    };

    // Idle -> Waking -> ShutterHeld -> Idle is the longest chain
    for _ in 0..3 {
        if !cycle.advance(params, min_lead, now, events) {
            break;
        }
    }

    cycle.outputs(now, wake_hold)
}

fn drain(cycle: &mut ShotCycle, params: &mut ParameterStore, now: Tick, events: &mut EventList) {
    cycle.finish_shot_if_due(now, params.shutter_hold(), events);
    if !cycle.is_shooting() {
        cycle.draining = false;
        disable(params, events);
    }
}

fn disable(params: &mut ParameterStore, events: &mut EventList) {
    if params.is_enabled() {
        params.set_enabled(false);
        let _ = events.push(ControllerEvent::AutoDisabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameter;

    struct Rig {
        cycle: ShotCycle,
        session: Session,
        params: ParameterStore,
        config: ControllerConfig,
        events: EventList,
    }

    impl Rig {
        fn new(config: ControllerConfig, boot: Tick) -> Self {
            Self {
                cycle: ShotCycle::new(boot),
                session: Session::Inactive,
                params: ParameterStore::new(&config),
                config,
                events: EventList::new(),
            }
        }

        fn tick(&mut self, now: Tick) -> Outputs {
            self.events.clear();
            update(
                &mut self.cycle,
                &mut self.session,
                &mut self.params,
                &self.config,
                now,
                &mut self.events,
            )
        }

        fn saw(&self, event: ControllerEvent) -> bool {
            self.events.contains(&event)
        }
    }

    #[test]
    fn test_basic_first_shot_waits_one_gap() {
        let mut rig = Rig::new(ControllerConfig::basic(), 0);

        assert_eq!(rig.tick(1999), Outputs::RELEASED);
        let out = rig.tick(2000);
        assert!(out.relay);
        assert!(rig.saw(ControllerEvent::ShotStarted));
        assert_eq!(rig.cycle.last_shot_time(), 2000);
    }

    #[test]
    fn test_basic_shot_releases_after_hold() {
        let mut rig = Rig::new(ControllerConfig::basic(), 0);
        rig.tick(2000);

        assert!(rig.tick(4299).relay);
        let out = rig.tick(4300);
        assert!(!out.relay);
        assert!(rig.saw(ControllerEvent::ShotFinished));
        assert_eq!(rig.cycle.last_shot_stop_time(), 4300);

        // Next shot one full gap after the stop
        assert!(!rig.tick(6299).relay);
        assert!(rig.tick(6300).relay);
    }

    #[test]
    fn test_relay_matches_phase() {
        let mut rig = Rig::new(ControllerConfig::basic(), 0);
        for now in (0..20_000).step_by(7) {
            let out = rig.tick(now);
            assert_eq!(out.relay, rig.cycle.is_shooting());
        }
    }

    #[test]
    fn test_extended_disabled_never_shoots() {
        let mut rig = Rig::new(ControllerConfig::extended(), 0);
        for now in (0..50_000).step_by(10) {
            assert_eq!(rig.tick(now), Outputs::RELEASED);
            assert!(!rig.session.is_active());
        }
    }

    #[test]
    fn test_enable_starts_session_and_shot() {
        let mut rig = Rig::new(ControllerConfig::extended(), 0);
        rig.tick(10_000);
        rig.params.set_flag(Parameter::Enabled, true);

        let out = rig.tick(10_005);
        assert!(rig.saw(ControllerEvent::SessionStarted));
        assert!(rig.saw(ControllerEvent::ShotStarted));
        assert!(out.relay);
        assert_eq!(rig.session, Session::Active { started: 10_005 });
    }

    fn separate_wake_line() -> ControllerConfig {
        let mut config = ControllerConfig::basic();
        config.hardware.wake_on_relay = false;
        config
    }

    #[test]
    fn test_wake_lead_saturates() {
        // Default gap 2000 is shorter than the 3000 wake lead
        let mut rig = Rig::new(separate_wake_line(), 0);
        rig.params.set_flag(Parameter::ShallWake, true);

        let out = rig.tick(0);
        assert!(rig.saw(ControllerEvent::WakeStarted));
        assert!(out.wake);
        assert!(!out.relay);

        assert!(rig.tick(99).wake);
        assert_eq!(rig.tick(100), Outputs::RELEASED);
        assert_eq!(rig.tick(2999), Outputs::RELEASED);

        let out = rig.tick(3000);
        assert!(out.relay);
        assert!(!out.wake);
    }

    #[test]
    fn test_wake_lands_shot_on_gap() {
        let mut config = ControllerConfig::basic();
        config.timing.time_between_shots_ms = 10_000;
        let mut rig = Rig::new(config, 0);
        rig.params.set_flag(Parameter::ShallWake, true);

        assert_eq!(rig.tick(6999), Outputs::RELEASED);
        assert!(rig.tick(7000).wake);
        assert!(!rig.tick(9999).relay);
        assert!(rig.tick(10_000).relay);
    }

    #[test]
    fn test_stop_and_wake_share_a_tick() {
        let mut rig = Rig::new(separate_wake_line(), 0);
        rig.tick(2000);
        rig.params.set_flag(Parameter::ShallWake, true);

        let out = rig.tick(4300);
        assert!(rig.saw(ControllerEvent::ShotFinished));
        assert!(rig.saw(ControllerEvent::WakeStarted));
        assert!(out.wake);
        assert!(!out.relay);
    }

    #[test]
    fn test_shared_line_wake_waits_one_pulse_after_stop() {
        let mut rig = Rig::new(ControllerConfig::basic(), 0);
        rig.tick(2000);
        rig.params.set_flag(Parameter::ShallWake, true);

        let out = rig.tick(4300);
        assert!(rig.saw(ControllerEvent::ShotFinished));
        assert!(!rig.saw(ControllerEvent::WakeStarted));
        assert_eq!(out, Outputs::RELEASED);

        assert_eq!(rig.tick(4399), Outputs::RELEASED);
        let out = rig.tick(4400);
        assert!(rig.saw(ControllerEvent::WakeStarted));
        assert!(out.wake);
        assert!(!rig.tick(4500).wake);

        assert!(!rig.tick(7399).relay);
        assert!(rig.tick(7400).relay);
    }

    #[test]
    fn test_operator_disable_aborts_shot() {
        let mut rig = Rig::new(ControllerConfig::extended(), 0);
        rig.params.set_flag(Parameter::Enabled, true);
        assert!(rig.tick(5000).relay);

        rig.params.set_flag(Parameter::Enabled, false);
        let out = rig.tick(5100);
        assert_eq!(out, Outputs::RELEASED);
        assert!(rig.saw(ControllerEvent::ShotAborted));
        assert!(rig.saw(ControllerEvent::SessionCancelled));
        assert_eq!(rig.cycle.last_shot_stop_time(), 5100);
        assert_eq!(rig.cycle.phase(), ShotPhase::Idle);
    }

    #[test]
    fn test_operator_disable_cancels_wake() {
        let mut rig = Rig::new(ControllerConfig::extended(), 0);
        rig.params.set_flag(Parameter::Enabled, true);
        rig.params.set_flag(Parameter::ShallWake, true);
        rig.tick(5000);
        assert!(rig.cycle.is_waking());

        rig.params.set_flag(Parameter::Enabled, false);
        rig.tick(5001);
        assert!(rig.saw(ControllerEvent::WakeCancelled));
        assert_eq!(rig.cycle.last_shot_stop_time(), 0);
    }

    fn short_session(policy: SessionExpiryPolicy) -> Rig {
        let mut config = ControllerConfig::extended();
        config.session_expiry = policy;
        config.timing.session_duration_ms = 60_000;
        config.timing.shutter_hold_ms = 5_000;
        config.timing.time_between_shots_ms = 10_000;
        let mut rig = Rig::new(config, 0);
        rig.params.set_flag(Parameter::Enabled, true);
        rig
    }

    #[test]
    fn test_session_expiry_between_shots_disables_at_once() {
        let mut rig = short_session(SessionExpiryPolicy::FinishShot);
        // Session starts at 10_000; shots at 10_000, 25_000, 40_000, 55_000
        for now in (10_000..70_000).step_by(1000) {
            rig.tick(now);
            assert!(rig.params.is_enabled());
        }
        assert!(rig.session.is_active());
        assert!(!rig.cycle.is_shooting());

        let out = rig.tick(70_000);
        assert_eq!(out, Outputs::RELEASED);
        assert!(rig.saw(ControllerEvent::SessionExpired));
        assert!(rig.saw(ControllerEvent::AutoDisabled));
        assert!(!rig.saw(ControllerEvent::ShotStarted));
        assert!(!rig.params.is_enabled());
    }

    #[test]
    fn test_session_expiry_drains_held_shot() {
        let mut rig = short_session(SessionExpiryPolicy::FinishShot);
        rig.tick(10_000);
        rig.params.set_duration(Parameter::OnTime, 65_000);
        assert!(rig.tick(69_999).relay);

        let out = rig.tick(70_000);
        assert!(rig.saw(ControllerEvent::SessionExpired));
        assert!(!rig.session.is_active());
        assert!(rig.cycle.is_draining());
        assert!(out.relay);
        assert!(rig.params.is_enabled());

        assert!(rig.tick(74_999).relay);
        let out = rig.tick(75_000);
        assert!(!out.relay);
        assert!(rig.saw(ControllerEvent::ShotFinished));
        assert!(rig.saw(ControllerEvent::AutoDisabled));
        assert!(!rig.params.is_enabled());

        assert_eq!(rig.tick(200_000), Outputs::RELEASED);
    }

    #[test]
    fn test_session_expiry_drops_pending_wake() {
        let mut rig = short_session(SessionExpiryPolicy::FinishShot);
        rig.params.set_flag(Parameter::ShallWake, true);
        rig.tick(10_000);
        rig.params.set_duration(Parameter::OnTime, 1_500);
        // Wake opens 7_000 after each stop, shot 3_000 later; the sixth
        // wake opens at 67_500
        for now in 10_001..69_000 {
            rig.tick(now);
        }
        rig.tick(69_000);
        assert!(rig.cycle.is_waking());

        rig.tick(70_000);
        assert!(rig.saw(ControllerEvent::WakeCancelled));
        assert!(!rig.params.is_enabled());
    }

    #[test]
    fn test_session_expiry_abort_releases_immediately() {
        let mut rig = short_session(SessionExpiryPolicy::AbortShot);
        rig.tick(10_000);
        rig.params.set_duration(Parameter::OnTime, 65_000);
        assert!(rig.tick(60_000).relay);

        let out = rig.tick(70_000);
        assert_eq!(out, Outputs::RELEASED);
        assert!(rig.saw(ControllerEvent::SessionExpired));
        assert!(rig.saw(ControllerEvent::ShotAborted));
        assert!(rig.saw(ControllerEvent::AutoDisabled));
        assert!(!rig.params.is_enabled());
    }
}
