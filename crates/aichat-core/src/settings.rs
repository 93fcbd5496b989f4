//! Persisted client settings.
//!
//! Only the selected provider and API keys are persisted here, as JSON at
//! ${AICHAT_HOME}/settings.json. Message history lives in the session
//! registry and the theme preference in its own file, each independently
//! readable/writable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::providers::Provider;

/// Selected provider and per-provider API keys.
///
/// Keys are stored unencrypted and never leave the machine except as part of
/// a request to that provider's own endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub selected_provider: Provider,
    pub api_keys: BTreeMap<Provider, String>,
}

impl Settings {
    /// Loads settings from the default path.
    ///
    /// Missing or unreadable files fall back to defaults so startup never
    /// fails on a corrupt settings file.
    pub fn load() -> Self {
        Self::load_from(&crate::paths::settings_path())
    }

    /// Loads settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read settings file");
                Self::default()
            }
        }
    }

    /// Saves settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&crate::paths::settings_path())
    }

    /// Saves settings to a specific path.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        let tmp_path = tmp_sibling(path);
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write settings to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Returns the API key for a provider, if any.
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        self.api_keys.get(&provider).map(String::as_str)
    }

    /// Upserts one provider's API key.
    pub fn set_api_key(&mut self, provider: Provider, key: impl Into<String>) {
        self.api_keys.insert(provider, key.into());
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
