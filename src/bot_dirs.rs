//! Centralized filesystem paths for memobot.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data (facts, FAQ) | `~/Library/Application Support/memobot/` | `~/.local/share/memobot/` |
//! | Config | `~/Library/Application Support/memobot/` | `~/.config/memobot/` |
//!
//! # Environment Overrides
//!
//! - `MEMOBOT_DATA_DIR`: overrides [`data_dir`]
//! - `MEMOBOT_CONFIG_DIR`: overrides [`config_dir`]

use std::path::PathBuf;

/// Persistent data root: fact store and FAQ catalog.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("MEMOBOT_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("memobot"))
        .unwrap_or_else(|| PathBuf::from("/tmp/memobot-data"))
}

/// Config directory holding `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("MEMOBOT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("memobot"))
        .unwrap_or_else(|| PathBuf::from("/tmp/memobot-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
