//! Theme preference.
//!
//! Persisted in its own file, separate from the provider/key settings.
//! "system" defers to an injected environment probe so the core never
//! inspects terminal or OS state itself.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// User-selected theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// A theme with "system" resolved away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Resolves the effective theme.
    ///
    /// `system_prefers_dark` is consulted only for `System`; the caller
    /// supplies whatever environment probe applies.
    pub fn resolve(self, system_prefers_dark: impl FnOnce() -> bool) -> ResolvedTheme {
        match self {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::System => {
                if system_prefers_dark() {
                    ResolvedTheme::Dark
                } else {
                    ResolvedTheme::Light
                }
            }
        }
    }

    /// Loads the saved preference, defaulting to `System` when absent or
    /// unrecognized.
    pub fn load() -> Self {
        Self::load_from(&crate::paths::theme_path())
    }

    /// Loads the preference from a specific path.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Saves the preference to the default path.
    pub fn save(self) -> Result<()> {
        self.save_to(&crate::paths::theme_path())
    }

    /// Saves the preference to a specific path.
    pub fn save_to(self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, self.as_str())
            .with_context(|| format!("Failed to write theme to {}", path.display()))
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(()),
        }
    }
}
