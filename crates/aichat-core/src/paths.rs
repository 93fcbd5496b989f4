//! Path resolution for AIChat configuration and data directories.
//!
//! AICHAT_HOME resolution order:
//! 1. AICHAT_HOME environment variable (if set)
//! 2. ~/.config/aichat (default)

use std::path::PathBuf;

/// Returns the AIChat home directory.
///
/// Checks AICHAT_HOME env var first, falls back to ~/.config/aichat
pub fn aichat_home() -> PathBuf {
    if let Ok(home) = std::env::var("AICHAT_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .map(|h| h.join(".config").join("aichat"))
        .expect("Could not determine home directory")
}

/// Returns the path to the config.toml file.
pub fn config_path() -> PathBuf {
    aichat_home().join("config.toml")
}

/// Returns the path to the settings.json file (selected provider + API keys).
pub fn settings_path() -> PathBuf {
    aichat_home().join("settings.json")
}

/// Returns the path to the theme preference file.
pub fn theme_path() -> PathBuf {
    aichat_home().join("theme")
}

/// Returns the path to the sessions directory.
pub fn sessions_dir() -> PathBuf {
    aichat_home().join("sessions")
}

/// Returns the path to the logs directory.
pub fn logs_dir() -> PathBuf {
    aichat_home().join("logs")
}
