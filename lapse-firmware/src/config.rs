//! Configuration loading
//!
//! The configuration is compiled in from `intervalometer.toml`; build.rs has
//! already checked it, so the fallback only guards against a parser drift.

use defmt::*;
use lapse_core::config::{parse_config, ControllerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit intervalometer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../intervalometer.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> ControllerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Loaded embedded configuration: {} variant, {} ms between shots",
                config.variant, config.timing.time_between_shots_ms
            );
            config
        }
        Err(e) => {
            error!("Embedded configuration rejected ({}), using defaults", e);
            ControllerConfig::default()
        }
    }
}
