//! AIChat core library.
//!
//! Chat-session data management for the `aichat` terminal client: message
//! store, search, export/import codec, provider gateway, session registry,
//! persisted settings, and theme preference.

pub mod config;
pub mod export;
pub mod logging;
pub mod message;
pub mod paths;
pub mod providers;
pub mod search;
pub mod session;
pub mod settings;
pub mod store;
pub mod theme;
