//! CLI command handlers.

pub mod chat;
pub mod config;
pub mod keys;
pub mod provider;
pub mod sessions;
pub mod theme;
pub mod transfer;
