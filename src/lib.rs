//! Annualised transmission costs between the zones of an energy system model.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod cost_function;
pub mod distance;
pub mod finance;
pub mod id;
pub mod input;
pub mod log;
pub mod model;
pub mod output;
pub mod settings;
pub mod transmission;
pub mod units;
pub mod zone;

#[cfg(test)]
mod fixture;

/// Get the directory in which program configuration files (e.g. `settings.toml`) are stored
pub fn get_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config directory on this platform, so fall back to the current directory
        return PathBuf::new();
    };
    config_dir.push(env!("CARGO_PKG_NAME"));

    config_dir
}
