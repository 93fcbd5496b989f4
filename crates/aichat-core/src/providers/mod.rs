//! LLM provider gateway.
//!
//! A closed set of providers, each carrying its endpoint-specific request
//! building behind one capability: `send_message(text, key) -> text`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;

mod anthropic;
mod gemini;
mod openai;

/// Supported chat providers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Claude,
    Gemini,
}

impl Provider {
    /// Returns all providers.
    pub fn all() -> &'static [Provider] {
        &[Provider::OpenAi, Provider::Claude, Provider::Gemini]
    }

    /// Returns the string identifier used in settings and on the CLI.
    pub fn id(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
        }
    }

    /// Returns the Provider for a given id string.
    pub fn from_id(id: &str) -> Option<Provider> {
        match id.to_lowercase().as_str() {
            "openai" => Some(Provider::OpenAi),
            "claude" | "anthropic" => Some(Provider::Claude),
            "gemini" | "google" => Some(Provider::Gemini),
            _ => None,
        }
    }

    /// Returns the human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Claude => "Claude",
            Provider::Gemini => "Gemini",
        }
    }

    /// Sends a single user message and returns the assistant's reply text.
    ///
    /// No retry, no timeout at this layer; the caller surfaces the error.
    pub async fn send_message(
        self,
        http: &reqwest::Client,
        text: &str,
        api_key: &str,
        config: &Config,
    ) -> Result<String, ProviderError> {
        tracing::debug!(provider = self.id(), "sending message");
        match self {
            Provider::OpenAi => openai::send_message(http, text, api_key, config).await,
            Provider::Claude => anthropic::send_message(http, text, api_key, config).await,
            Provider::Gemini => gemini::send_message(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Categories of provider errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Connection timeout or request timeout
    Timeout,
    /// Failed to parse the response body
    Parse,
    /// Request failed before a response arrived
    Api,
    /// Provider is not implemented
    Unsupported,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::HttpStatus => write!(f, "http_status"),
            ProviderErrorKind::Timeout => write!(f, "timeout"),
            ProviderErrorKind::Parse => write!(f, "parse"),
            ProviderErrorKind::Api => write!(f, "api_error"),
            ProviderErrorKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Structured error from the provider gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderError {
    /// Provider that produced the error
    pub provider: Provider,
    /// Error category
    pub kind: ProviderErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ProviderError {
    /// Creates a new provider error.
    pub fn new(provider: Provider, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error.
    ///
    /// Tries to extract a cleaner `error.message` from a JSON body.
    pub fn http_status(provider: Provider, status: u16, body: &str) -> Self {
        let message = format!("HTTP {}", status);
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(error_obj) = json.get("error")
                && let Some(msg) = error_obj.get("message").and_then(|v| v.as_str())
            {
                return Self {
                    provider,
                    kind: ProviderErrorKind::HttpStatus,
                    message: format!("HTTP {}: {}", status, msg),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            provider,
            kind: ProviderErrorKind::HttpStatus,
            message,
            details,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(provider: Provider, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Timeout, message)
    }

    /// Creates a parse error.
    pub fn parse(provider: Provider, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Parse, message)
    }

    /// Creates an unsupported-provider error.
    pub fn unsupported(provider: Provider, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Unsupported, message)
    }

    /// Wraps a transport-level reqwest error.
    pub fn from_request(provider: Provider, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(provider, format!("Request timed out: {}", err))
        } else {
            Self::new(
                provider,
                ProviderErrorKind::Api,
                format!("Request failed: {}", err),
            )
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider.label(), self.message)
    }
}

impl std::error::Error for ProviderError {}

/// Validates a configured base URL override.
pub(crate) fn validate_base_url(provider: Provider, base: &str) -> Result<(), ProviderError> {
    url::Url::parse(base).map_err(|e| {
        ProviderError::parse(provider, format!("Invalid base URL '{}': {}", base, e))
    })?;
    Ok(())
}
