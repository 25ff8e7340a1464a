//! HD44780 character LCD over a PCF8574 I2C expander
//!
//! The controller runs in 4-bit mode; every byte goes out as two nibbles,
//! each strobed on EN. A 100 kHz bus transfer is slower than any command
//! except clear/home, so only the init sequence needs explicit delays.
//!
//! Rows are cached: writing the same text to a row twice sends nothing the
//! second time. The controller re-renders the screen every tick and this
//! keeps the bus idle while the display is static.

use embedded_hal::delay::DelayNs;
use heapless::String;
use lapse_core::config::MAX_LCD_COLUMNS;
use lapse_core::display::SCREEN_ROWS;
use lapse_core::traits::{DisplayError, TextDisplay};
use lapse_hal::I2cBus;

use super::pcf8574::{strobe, BACKLIGHT, RS};

// Commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

// Flags
const ENTRY_INCREMENT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const FUNCTION_TWO_LINES: u8 = 0x08;

/// DDRAM address of each row's first column
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Errors from the LCD driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError<E> {
    /// I2C transfer failed
    Bus(E),
    /// `init` has not completed
    NotInitialized,
    /// Row or column outside the panel
    OutOfRange,
}

impl<E> From<LcdError<E>> for DisplayError {
    fn from(err: LcdError<E>) -> Self {
        match err {
            LcdError::NotInitialized => DisplayError::NotInitialized,
            LcdError::Bus(_) | LcdError::OutOfRange => DisplayError::Bus,
        }
    }
}

/// HD44780 behind a PCF8574 backpack
pub struct Hd44780<B> {
    bus: B,
    address: u8,
    columns: u8,
    rows: u8,
    initialized: bool,
    /// Last text written to each row
    cache: [Option<String<MAX_LCD_COLUMNS>>; SCREEN_ROWS],
}

impl<B: I2cBus> Hd44780<B> {
    /// Create a driver for a `columns` x 2 panel
    pub fn new(bus: B, address: u8, columns: u8) -> Self {
        Self {
            bus,
            address,
            columns: columns.min(MAX_LCD_COLUMNS as u8),
            rows: SCREEN_ROWS as u8,
            initialized: false,
            cache: [None, None],
        }
    }

    /// Run the power-on init sequence
    ///
    /// Three "8-bit mode" nibbles bring the controller into a known state
    /// whatever it was doing, then it is switched to 4-bit mode.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), LcdError<B::Error>> {
        self.initialized = false;
        delay.delay_ms(50);

        self.write_nibble(0x03, 0)?;
        delay.delay_us(4500);
        self.write_nibble(0x03, 0)?;
        delay.delay_us(4500);
        self.write_nibble(0x03, 0)?;
        delay.delay_us(150);
        self.write_nibble(0x02, 0)?;

        self.command(CMD_FUNCTION_SET | FUNCTION_TWO_LINES)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.command(CMD_ENTRY_MODE | ENTRY_INCREMENT)?;
        self.initialized = true;
        self.clear(delay)
    }

    /// Blank the panel and forget cached rows
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), LcdError<B::Error>> {
        self.ensure_initialized()?;
        self.command(CMD_CLEAR)?;
        delay.delay_us(2000);
        self.cache = [None, None];
        Ok(())
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), LcdError<B::Error>> {
        self.ensure_initialized()?;
        if row >= self.rows || col >= self.columns {
            return Err(LcdError::OutOfRange);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write text at the cursor
    ///
    /// Characters outside printable ASCII are shown as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<(), LcdError<B::Error>> {
        self.ensure_initialized()?;
        for c in text.chars() {
            let byte = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            self.send(byte, RS)?;
        }
        Ok(())
    }

    /// Write a whole row unless it already shows `text`
    ///
    /// Returns true if anything was sent.
    pub fn update_row(&mut self, row: u8, text: &str) -> Result<bool, LcdError<B::Error>> {
        self.ensure_initialized()?;
        let slot = self
            .cache
            .get(row as usize)
            .ok_or(LcdError::OutOfRange)?;
        if slot.as_deref() == Some(text) {
            return Ok(false);
        }

        // Forget the row first so a failed write is retried next time
        self.cache[row as usize] = None;
        self.set_cursor(row, 0)?;
        let width = self.columns as usize;
        let mut line = String::new();
        for c in text.chars().take(width) {
            let _ = line.push(c);
        }
        self.write_str(&line)?;
        self.cache[row as usize] = Some(line).filter(|l| l.as_str() == text);
        Ok(true)
    }

    /// Panel width in characters
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Check if the init sequence has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> Result<(), LcdError<B::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(LcdError::NotInitialized)
        }
    }

    fn command(&mut self, cmd: u8) -> Result<(), LcdError<B::Error>> {
        self.send(cmd, 0)
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<(), LcdError<B::Error>> {
        self.write_nibble(byte >> 4, mode)?;
        self.write_nibble(byte & 0x0F, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), LcdError<B::Error>> {
        // Backlight stays on
        self.bus
            .write(self.address, &strobe(nibble, mode | BACKLIGHT))
            .map_err(LcdError::Bus)
    }
}

impl<B: I2cBus> TextDisplay for Hd44780<B> {
    fn write_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        self.update_row(row, text)?;
        Ok(())
    }
}
