//! API key commands.
//!
//! Keys are stored unencrypted in the settings file and only ever sent to
//! the owning provider's endpoint.

use anyhow::{bail, Result};

use aichat_core::providers::Provider;
use aichat_core::store::ChatStore;

pub fn set(provider: &str, key: &str) -> Result<()> {
    let Some(provider) = Provider::from_id(provider) else {
        bail!("unknown provider '{provider}' (expected openai, claude, or gemini)");
    };

    let mut store = ChatStore::load();
    store.set_api_key(provider, key);

    println!("Stored API key for {}", provider.label());
    Ok(())
}

pub fn list() -> Result<()> {
    let store = ChatStore::load();

    for &provider in Provider::all() {
        match store.api_key(provider) {
            Some(key) => println!("{}: {}", provider.id(), mask_key(key)),
            None => println!("{}: (not set)", provider.id()),
        }
    }

    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
