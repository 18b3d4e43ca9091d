use anyhow::{Context, Result};
use dirs::home_dir;
use std::path::PathBuf;

/// Returns the freeze home directory, or None if the user's home cannot be resolved.
pub fn try_freeze_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("FREEZE_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".freeze"))
}

/// Returns the canonical freeze home directory (`~/.freeze`).
///
/// # Errors
///
/// Returns an error if neither `FREEZE_HOME` is set nor the user's home
/// directory can be resolved.
pub fn freeze_home() -> Result<PathBuf> {
    try_freeze_home().context("Could not determine home directory. Set FREEZE_HOME to override.")
}

/// Default config path: ~/.freeze/config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(freeze_home()?.join("config.toml"))
}

