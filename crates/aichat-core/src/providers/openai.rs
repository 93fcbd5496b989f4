//! OpenAI chat completions backend.

use serde_json::{Value, json};

use crate::config::Config;
use crate::providers::{Provider, ProviderError, validate_base_url};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Sends a single user message and returns the assistant's reply text.
pub async fn send_message(
    http: &reqwest::Client,
    text: &str,
    api_key: &str,
    config: &Config,
) -> Result<String, ProviderError> {
    let base_url = resolve_base_url(config)?;
    let url = format!("{}{}", base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH);

    let body = json!({
        "model": config.openai_model,
        "messages": [{ "role": "user", "content": text }],
        "max_tokens": config.max_tokens,
    });

    let response = http
        .post(&url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| ProviderError::from_request(Provider::OpenAi, &e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::http_status(
            Provider::OpenAi,
            status.as_u16(),
            &body,
        ));
    }

    let value: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::parse(Provider::OpenAi, format!("Invalid JSON body: {}", e)))?;

    extract_reply(&value)
}

/// Pulls the assistant text out of a chat completions response.
fn extract_reply(value: &Value) -> Result<String, ProviderError> {
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::parse(
                Provider::OpenAi,
                "Response is missing choices[0].message.content",
            )
        })
}

fn resolve_base_url(config: &Config) -> Result<String, ProviderError> {
    if let Some(base) = config.effective_openai_base_url() {
        validate_base_url(Provider::OpenAi, base)?;
        return Ok(base.to_string());
    }
    Ok(DEFAULT_BASE_URL.to_string())
}
