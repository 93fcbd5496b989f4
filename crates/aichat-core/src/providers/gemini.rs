//! Gemini backend placeholder.
//!
//! Selecting Gemini must fail loudly rather than silently no-op.

use crate::providers::{Provider, ProviderError};

pub fn send_message() -> Result<String, ProviderError> {
    Err(ProviderError::unsupported(
        Provider::Gemini,
        "Gemini API not yet implemented",
    ))
}
