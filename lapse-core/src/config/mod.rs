//! Configuration types
//!
//! One [`ControllerConfig`] describes the active feature set and every
//! tunable. The firmware embeds it as TOML and parses it at boot with
//! [`parse_config`]; the build script validates the same file on the host.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
