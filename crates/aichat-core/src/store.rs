//! In-memory chat state.
//!
//! An explicit, constructible state object: the ordered message list, the
//! awaiting-response flag, and the persisted provider/key settings. Provider
//! and key changes are written through to disk immediately; messages are
//! never persisted here (the session registry owns durable history).

use std::path::PathBuf;

use crate::message::{Message, Role};
use crate::providers::Provider;
use crate::settings::Settings;

/// Holds the live state of one chat.
#[derive(Debug)]
pub struct ChatStore {
    messages: Vec<Message>,
    is_loading: bool,
    settings: Settings,
    settings_path: PathBuf,
}

impl ChatStore {
    /// Creates a store backed by the default settings path.
    pub fn load() -> Self {
        Self::with_settings_path(crate::paths::settings_path())
    }

    /// Creates a store backed by a specific settings path.
    pub fn with_settings_path(settings_path: PathBuf) -> Self {
        let settings = Settings::load_from(&settings_path);
        Self {
            messages: Vec::new(),
            is_loading: false,
            settings,
            settings_path,
        }
    }

    /// Returns the messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends a new message and returns it.
    ///
    /// No length limit, no dedup; ids are freshly generated.
    pub fn add_message(&mut self, content: impl Into<String>, role: Role) -> &Message {
        self.messages.push(Message::new(content, role));
        self.messages.last().expect("just pushed")
    }

    /// Empties the message list. Irreversible from the store's perspective.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Replaces the whole message list.
    ///
    /// Used when switching sessions and after a successful import.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Returns the awaiting-response flag.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Toggles the awaiting-response flag.
    ///
    /// The UI disables input while this is set; the store does not block a
    /// second send itself. There is no cancellation path, so a stuck request
    /// leaves the flag set.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Returns the active provider.
    pub fn provider(&self) -> Provider {
        self.settings.selected_provider
    }

    /// Switches the active provider.
    ///
    /// Does not clear messages or touch in-flight requests.
    pub fn set_provider(&mut self, provider: Provider) {
        self.settings.selected_provider = provider;
        self.persist_settings();
    }

    /// Returns the API key for a provider, if configured.
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        self.settings.api_key(provider)
    }

    /// Upserts one provider's API key.
    pub fn set_api_key(&mut self, provider: Provider, key: impl Into<String>) {
        self.settings.set_api_key(provider, key);
        self.persist_settings();
    }

    /// Returns a view of the persisted settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Write-through persistence for provider/key changes.
    ///
    /// A failed write must not corrupt in-memory state, so errors are logged
    /// and swallowed.
    fn persist_settings(&self) {
        if let Err(e) = self.settings.save_to(&self.settings_path) {
            tracing::warn!(
                path = %self.settings_path.display(),
                error = %e,
                "failed to persist settings"
            );
        }
    }
}
