//! Lapse - Time-lapse Intervalometer Firmware
//!
//! Main firmware binary for RP2040 boards. Fires a camera shutter relay on
//! a fixed interval, with a three-button / 16x2 LCD menu for adjusting the
//! timings in the field.
//!
//! Board wiring:
//!
//! | Signal    | GPIO |
//! |-----------|------|
//! | MODE      | 8    |
//! | Relay     | 9    |
//! | UP        | 10   |
//! | DOWN      | 11   |
//! | I2C0 SDA  | 4    |
//! | I2C0 SCL  | 5    |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::I2c;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use lapse_core::traits::DisplayError;
use lapse_drivers::{GpioButtons, GpioRelay, Hd44780};
use lapse_hal::{I2cConfig, Polarity};
use lapse_hal_rp2040::i2c::rp_config;
use lapse_hal_rp2040::{BlockingI2c, RpInput, RpOutput};

mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lapse firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let hw = config.hardware;

    // Shutter relay, released before anything else runs
    let relay_polarity = Polarity::from_active_high(hw.relay_active_high);
    let released = if relay_polarity.level_for(false) {
        Level::High
    } else {
        Level::Low
    };
    let relay = GpioRelay::new(
        RpOutput::new(Output::new(p.PIN_9, released)),
        relay_polarity,
        hw.wake_on_relay,
    );

    // Buttons pull towards their idle level
    let pull = if hw.buttons_active_high {
        Pull::Down
    } else {
        Pull::Up
    };
    let buttons = GpioButtons::new(
        RpInput::new(Input::new(p.PIN_10, pull)),
        RpInput::new(Input::new(p.PIN_11, pull)),
        RpInput::new(Input::new(p.PIN_8, pull)),
        Polarity::from_active_high(hw.buttons_active_high),
    );
    info!("GPIO initialized");

    // LCD backpack on I2C0
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, rp_config(I2cConfig::STANDARD));
    let mut lcd = Hd44780::new(BlockingI2c::new(i2c), hw.lcd_address, hw.lcd_columns);
    match lcd.init(&mut Delay) {
        Ok(()) => info!("LCD ready at {:#x}", hw.lcd_address),
        Err(e) => warn!(
            "LCD init failed: {}, running without display",
            DisplayError::from(e)
        ),
    }

    spawner
        .spawn(tasks::controller_task(config, relay, buttons, lcd))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
