//! Minimal TOML parser for the embedded controller configuration
//!
//! Handles only the subset the config file uses. It does NOT support the
//! full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Integers in decimal or `0x` hex, with optional `_` separators
//! - `[timing]` and `[hardware]` section headers
//! - Comments (# ...)
//!
//! Keys that are absent keep their [`ControllerConfig::default`] value.

use crate::config::types::{
    ConfigError, ControllerConfig, FlagPolicy, HardwareConfig, SessionExpiryPolicy, TimingConfig,
    Variant,
};
use crate::time::Tick;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    InvalidKey,
    /// Value has the wrong type or spelling
    InvalidValue,
    /// Number does not fit the target field
    OutOfRange,
    /// File parsed but the result breaks a config invariant
    Rejected(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Rejected(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Hardware,
}

/// Parse TOML text into a validated [`ControllerConfig`]
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match section {
            Section::Root => apply_root(&mut config, key, value)?,
            Section::Timing => apply_timing(&mut config.timing, key, value)?,
            Section::Hardware => apply_hardware(&mut config.hardware, key, value)?,
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "hardware" => Ok(Section::Hardware),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_root(config: &mut ControllerConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "variant" => {
            config.variant = match parse_string(value)? {
                "basic" => Variant::Basic,
                "extended" => Variant::Extended,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "flag_policy" => {
            config.flag_policy = match parse_string(value)? {
                "set_clear" => FlagPolicy::SetClear,
                "toggle" => FlagPolicy::Toggle,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "session_expiry" => {
            config.session_expiry = match parse_string(value)? {
                "finish_shot" => SessionExpiryPolicy::FinishShot,
                "abort_shot" => SessionExpiryPolicy::AbortShot,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "debounce_ms" => config.debounce_ms = parse_u32(value)?,
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}

fn apply_timing(timing: &mut TimingConfig, key: &str, value: &str) -> Result<(), ParseError> {
    let field: &mut Tick = match key {
        "shutter_hold_ms" => &mut timing.shutter_hold_ms,
        "min_shutter_hold_ms" => &mut timing.min_shutter_hold_ms,
        "time_between_shots_ms" => &mut timing.time_between_shots_ms,
        "min_time_between_shots_ms" => &mut timing.min_time_between_shots_ms,
        "wake_hold_ms" => &mut timing.wake_hold_ms,
        "wake_before_shot_ms" => &mut timing.wake_before_shot_ms,
        "duration_increment_ms" => &mut timing.duration_increment_ms,
        "session_duration_ms" => &mut timing.session_duration_ms,
        "min_session_duration_ms" => &mut timing.min_session_duration_ms,
        "session_increment_ms" => &mut timing.session_increment_ms,
        _ => return Err(ParseError::InvalidKey),
    };
    *field = parse_u32(value)?;
    Ok(())
}

fn apply_hardware(hw: &mut HardwareConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "lcd_address" => hw.lcd_address = parse_u8(value)?,
        "lcd_columns" => hw.lcd_columns = parse_u8(value)?,
        "buttons_active_high" => hw.buttons_active_high = parse_bool(value)?,
        "relay_active_high" => hw.relay_active_high = parse_bool(value)?,
        "wake_on_relay" => hw.wake_on_relay = parse_bool(value)?,
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}

/// Drop a trailing `# comment` unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse an unsigned integer in decimal or 0x-hex, allowing `_` separators
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let (digits, radix) = match value.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    let mut result: u32 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::OutOfRange)?;
        seen_digit = true;
    }

    if seen_digit {
        Ok(result)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_u8(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_u32(value)?).map_err(|_| ParseError::OutOfRange)
}
