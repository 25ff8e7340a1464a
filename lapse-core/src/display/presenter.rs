//! Screen contents for the selected page

use crate::display::format::{flag_text, write_clock, write_duration};
use crate::display::screen::{Line, Screen};
use crate::params::{ParameterKind, ParameterStore};
use crate::state::{Session, ShotCycle};
use crate::time::Tick;

/// Render the selected page
///
/// Row 0 is the page name, row 1 its value.
pub fn present(
    params: &ParameterStore,
    session: &Session,
    cycle: &ShotCycle,
    now: Tick,
    columns: u8,
) -> Screen {
    let parameter = params.selected();
    let mut screen = Screen::new(columns);
    screen.set_row(0, parameter.label());

    let mut value = Line::new();
    match parameter.kind() {
        ParameterKind::Duration | ParameterKind::StepSize => {
            if let Some(ms) = params.duration(parameter) {
                let _ = write_duration(&mut value, ms);
            }
        }
        ParameterKind::Flag => {
            if let Some(flag) = params.flag(parameter) {
                let _ = value.push_str(flag_text(flag));
            }
        }
        ParameterKind::ReadOnly => write_status(&mut value, params, session, cycle, now),
    }
    screen.set_row(1, &value);
    screen
}

fn write_status(
    out: &mut Line,
    params: &ParameterStore,
    session: &Session,
    cycle: &ShotCycle,
    now: Tick,
) {
    match session.remaining(now, params.session_duration()) {
        Some(left) => {
            let _ = out.push_str("RUN ");
            let _ = write_clock(out, left);
        }
        // Session over, last shot still held
        None if cycle.is_draining() => {
            let _ = out.push_str("ENDING");
        }
        None if params.is_enabled() => {
            let _ = out.push_str("ARMED");
        }
        None => {
            let _ = out.push_str("STOPPED");
        }
    }
}

/// Boot splash
pub fn splash(columns: u8) -> Screen {
    let mut screen = Screen::new(columns);
    screen.set_row(0, "LAPSE");
    screen.set_row(1, "INTERVALOMETER");
    screen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::params::Parameter;

    fn store_on(parameter: Parameter) -> ParameterStore {
        let mut store = ParameterStore::new(&ControllerConfig::extended());
        while store.selected() != parameter {
            store.select_next();
        }
        store
    }

    fn idle() -> ShotCycle {
        ShotCycle::new(0)
    }

    fn value_row(screen: &Screen) -> &str {
        screen.row(1).unwrap().trim_end()
    }

    #[test]
    fn test_on_time_page() {
        let store = store_on(Parameter::OnTime);
        let screen = present(&store, &Session::Inactive, &idle(), 0, 16);
        assert_eq!(screen.row(0), Some("ON TIME         "));
        assert_eq!(value_row(&screen), "2.3 s");
    }

    #[test]
    fn test_session_time_page() {
        let store = store_on(Parameter::SessionDuration);
        let screen = present(&store, &Session::Inactive, &idle(), 0, 16);
        assert_eq!(screen.row(0).unwrap().trim_end(), "SESSION TIME");
        assert_eq!(value_row(&screen), "15m 00s");
    }

    #[test]
    fn test_flag_page() {
        let mut store = store_on(Parameter::ShallWake);
        assert_eq!(value_row(&present(&store, &Session::Inactive, &idle(), 0, 16)), "OFF");
        store.set_flag(Parameter::ShallWake, true);
        assert_eq!(value_row(&present(&store, &Session::Inactive, &idle(), 0, 16)), "ON");
    }

    #[test]
    fn test_session_status() {
        let mut store = store_on(Parameter::SessionRunning);
        assert_eq!(value_row(&present(&store, &Session::Inactive, &idle(), 0, 16)), "STOPPED");

        store.set_enabled(true);
        assert_eq!(value_row(&present(&store, &Session::Inactive, &idle(), 0, 16)), "ARMED");

        let session = Session::Active { started: 1_000 };
        let screen = present(&store, &session, &idle(), 1_001, 16);
        assert_eq!(value_row(&screen), "RUN 14:59");
    }

    #[test]
    fn test_rows_match_width() {
        for columns in [16, 17] {
            let store = store_on(Parameter::Increment);
            let screen = present(&store, &Session::Inactive, &idle(), 0, columns);
            assert!(screen.rows().all(|r| r.len() == columns as usize));
        }
    }

    #[test]
    fn test_splash() {
        let screen = splash(16);
        assert_eq!(screen.row(1), Some("INTERVALOMETER  "));
    }
}
