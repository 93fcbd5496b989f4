//! Anthropic messages backend.

use serde_json::{Value, json};

use crate::config::Config;
use crate::providers::{Provider, ProviderError, validate_base_url};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sends a single user message and returns the assistant's reply text.
pub async fn send_message(
    http: &reqwest::Client,
    text: &str,
    api_key: &str,
    config: &Config,
) -> Result<String, ProviderError> {
    let base_url = resolve_base_url(config)?;
    let url = format!("{}{}", base_url.trim_end_matches('/'), MESSAGES_PATH);

    let body = json!({
        "model": config.claude_model,
        "max_tokens": config.max_tokens,
        "messages": [{ "role": "user", "content": text }],
    });

    let response = http
        .post(&url)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| ProviderError::from_request(Provider::Claude, &e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::http_status(
            Provider::Claude,
            status.as_u16(),
            &body,
        ));
    }

    let value: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::parse(Provider::Claude, format!("Invalid JSON body: {}", e)))?;

    extract_reply(&value)
}

/// Pulls the assistant text out of a messages response.
fn extract_reply(value: &Value) -> Result<String, ProviderError> {
    value
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::parse(Provider::Claude, "Response is missing content[0].text")
        })
}

fn resolve_base_url(config: &Config) -> Result<String, ProviderError> {
    if let Some(base) = config.effective_anthropic_base_url() {
        validate_base_url(Provider::Claude, base)?;
        return Ok(base.to_string());
    }
    Ok(DEFAULT_BASE_URL.to_string())
}
