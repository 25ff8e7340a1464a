//! Controller task
//!
//! Runs the intervalometer tick on a fixed ticker: sample the buttons, drive
//! the relay, refresh the LCD, and log whatever happened.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker, Timer};

use lapse_core::config::ControllerConfig;
use lapse_core::params::Parameter;
use lapse_core::state::ControllerEvent;
use lapse_core::traits::{Clock, TextDisplay};
use lapse_core::Controller;
use lapse_drivers::{GpioButtons, GpioRelay, Hd44780};
use lapse_hal_rp2040::{BlockingI2c, EmbassyClock, RpInput, RpOutput};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 5;

/// How long the boot splash stays up
const SPLASH_MS: u64 = 1500;

/// Shutter relay on GPIO9
pub type Relay = GpioRelay<RpOutput<'static>>;

/// UP / DOWN / MODE buttons
pub type Buttons = GpioButtons<RpInput<'static>, RpInput<'static>, RpInput<'static>>;

/// LCD backpack on I2C0
pub type Lcd = Hd44780<BlockingI2c<I2c<'static, I2C0, Blocking>>>;

/// Controller task - main tick loop
#[embassy_executor::task]
pub async fn controller_task(
    config: ControllerConfig,
    mut relay: Relay,
    mut buttons: Buttons,
    mut lcd: Lcd,
) {
    info!("Controller task started");

    let clock = EmbassyClock;

    if let Err(e) = lcd.render(&lapse_core::display::splash(config.hardware.lcd_columns)) {
        warn!("Splash render failed: {}", e);
    }
    Timer::after(Duration::from_millis(SPLASH_MS)).await;

    let mut controller = Controller::new(config, clock.now());
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut display_ok = true;

    info!("Controller running ({} variant)", config.variant);

    loop {
        ticker.next().await;

        let report = controller.run_tick(&clock, &mut buttons, &mut relay, &mut lcd);

        for event in &report.events {
            log_event(report.now, event);
        }

        // Report display failures once, not every tick
        match report.display_error {
            Some(e) if display_ok => {
                warn!("Display write failed: {}", e);
                display_ok = false;
            }
            None if !display_ok => {
                info!("Display recovered");
                display_ok = true;
            }
            _ => {}
        }
    }
}

fn log_event(now: u32, event: &ControllerEvent) {
    match *event {
        ControllerEvent::SessionStarted => info!("[{}] Session started", now),
        ControllerEvent::SessionExpired => info!("[{}] Session expired", now),
        ControllerEvent::SessionCancelled => info!("[{}] Session cancelled", now),
        ControllerEvent::AutoDisabled => info!("[{}] Disabled after session", now),
        ControllerEvent::FlagChanged {
            parameter: Parameter::Enabled,
            value,
        } => info!("[{}] Enabled: {}", now, value),
        ControllerEvent::ShotAborted => info!("[{}] Shot aborted", now),
        ControllerEvent::ModeSelected(parameter) => {
            debug!("[{}] Mode: {}", now, parameter.label())
        }
        ControllerEvent::DurationChanged {
            parameter,
            value_ms,
        } => debug!("[{}] {} = {} ms", now, parameter.label(), value_ms),
        other => debug!("[{}] {:?}", now, other),
    }
}
