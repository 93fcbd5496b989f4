//! Active provider commands.

use anyhow::{bail, Result};

use aichat_core::providers::Provider;
use aichat_core::store::ChatStore;

pub fn get() -> Result<()> {
    let store = ChatStore::load();
    println!("{}", store.provider().id());
    Ok(())
}

pub fn set(provider: &str) -> Result<()> {
    let Some(provider) = Provider::from_id(provider) else {
        bail!("unknown provider '{provider}' (expected openai, claude, or gemini)");
    };

    let mut store = ChatStore::load();
    store.set_provider(provider);

    println!("Provider set to {}", provider.label());
    Ok(())
}
