//! Configuration management for AIChat.
//!
//! Loads configuration from ${AICHAT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model used for the OpenAI provider
    pub openai_model: String,

    /// Model used for the Claude provider
    pub claude_model: String,

    /// Maximum tokens requested per response
    pub max_tokens: u32,

    /// Optional OpenAI base URL (for test rigs or proxies)
    pub openai_base_url: Option<String>,

    /// Optional Anthropic base URL (for test rigs or proxies)
    pub anthropic_base_url: Option<String>,
}

impl Config {
    const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
    const DEFAULT_CLAUDE_MODEL: &str = "claude-3-sonnet-20240229";
    const DEFAULT_MAX_TOKENS: u32 = 1000;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&crate::paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only one model field to a specific config file path.
    ///
    /// Creates the file with the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_model_to(path: &Path, field: &str, model: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc[field] = value(model);

        Self::write_config(path, &doc.to_string())
    }

    /// Returns the effective OpenAI base URL from config, if set.
    /// Empty strings are treated as unset.
    pub fn effective_openai_base_url(&self) -> Option<&str> {
        self.openai_base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns the effective Anthropic base URL from config, if set.
    /// Empty strings are treated as unset.
    pub fn effective_anthropic_base_url(&self) -> Option<&str> {
        self.anthropic_base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_model: Self::DEFAULT_OPENAI_MODEL.to_string(),
            claude_model: Self::DEFAULT_CLAUDE_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            openai_base_url: None,
            anthropic_base_url: None,
        }
    }
}
