//! Build script for lapse-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates intervalometer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use lapse_core::config::{parse_config, ControllerConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate intervalometer.toml at compile time
///
/// The file is checked twice: once with the `toml` crate into the serde
/// form of [`ControllerConfig`], and once with the line parser the firmware
/// runs at boot. Both must accept it and agree on the result.
fn validate_config() {
    println!("cargo:rerun-if-changed=intervalometer.toml");

    let config_path = Path::new("intervalometer.toml");

    if !config_path.exists() {
        fail(
            "intervalometer.toml not found!",
            &[
                "The firmware embeds intervalometer.toml at build time.".to_string(),
                "Create one in the lapse-firmware directory.".to_string(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read intervalometer.toml", &[e.to_string()]),
    };

    // Parse and validate TOML syntax and field types
    let config: ControllerConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid intervalometer.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    if let Err(e) = config.validate() {
        fail(
            "Invalid timing or hardware values in intervalometer.toml",
            &[format!("{:?}", e)],
        );
    }

    // The firmware parses the same text with its own no_std parser
    match parse_config(&config_content) {
        Ok(parsed) if parsed == config => {}
        Ok(_) => fail(
            "intervalometer.toml is read differently on target",
            &["Use plain key = value lines inside [timing] / [hardware].".to_string()],
        ),
        Err(e) => fail(
            "intervalometer.toml is rejected by the on-target parser",
            &[format!("{:?}", e)],
        ),
    }

    println!("cargo:warning=intervalometer.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                let head: String = line.chars().take(61).collect();
                format!("{}...", head)
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
