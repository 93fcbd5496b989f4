//! Session registry.
//!
//! Each session is one JSON file at ${AICHAT_HOME}/sessions/<id>.json
//! holding the full `ChatSession`. Session-level persistence is a feature of
//! its own: the settings file persists only provider/key state, while the
//! registry owns durable message history.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::paths::sessions_dir;

/// A named, ordered collection of messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSession {
    pub id: String,
    pub name: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Creates an empty session with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Summary of a saved session for listings.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: String,
    pub name: String,
    pub message_count: usize,
    pub modified: Option<SystemTime>,
}

fn session_path(id: &str) -> PathBuf {
    sessions_dir().join(format!("{}.json", id))
}

/// Creates and persists a new named session.
pub fn create_session(name: &str) -> Result<ChatSession> {
    let session = ChatSession::new(name);
    save_session(&session)?;
    Ok(session)
}

/// Persists a session, creating the sessions directory as needed.
/// Uses atomic write (temp file + rename) to prevent corruption.
pub fn save_session(session: &ChatSession) -> Result<()> {
    let dir = sessions_dir();
    fs::create_dir_all(&dir).context("Failed to create sessions directory")?;

    let path = session_path(&session.id);
    let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .with_context(|| format!("Failed to write session to {}", tmp_path.display()))?;
    fs::rename(&tmp_path, &path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

/// Loads a session by id.
pub fn load_session(id: &str) -> Result<ChatSession> {
    let path = session_path(id);
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {}", path.display()))
}

/// Renames a session, preserving its messages.
pub fn rename_session(id: &str, name: &str) -> Result<()> {
    let mut session = load_session(id)?;
    session.name = name.to_string();
    save_session(&session)
}

/// Deletes a session file.
pub fn delete_session(id: &str) -> Result<()> {
    let path = session_path(id);
    fs::remove_file(&path)
        .with_context(|| format!("Failed to delete session {}", path.display()))
}

/// Lists all saved sessions, sorted by modification time (newest first).
pub fn list_sessions() -> Result<Vec<SessionInfo>> {
    let dir = sessions_dir();

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut sessions = Vec::new();

    for entry in fs::read_dir(&dir).context("Failed to read sessions directory")? {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem()
        {
            let id = stem.to_string_lossy().to_string();
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());

            // Skip files that are not sessions rather than failing the listing.
            let Ok(session) = load_session(&id) else {
                tracing::warn!(path = %path.display(), "skipping unreadable session file");
                continue;
            };

            sessions.push(SessionInfo {
                id,
                name: session.name,
                message_count: session.messages.len(),
                modified,
            });
        }
    }

    sessions.sort_by(|a, b| b.modified.cmp(&a.modified));

    Ok(sessions)
}

/// Returns the id of the most recently modified session, if any.
pub fn latest_session_id() -> Result<Option<String>> {
    let sessions = list_sessions()?;
    Ok(sessions.into_iter().next().map(|s| s.id))
}

/// Replaces a session's messages and persists it.
///
/// Used after a successful import and when the live store is flushed into
/// the active session.
pub fn replace_messages(id: &str, messages: Vec<Message>) -> Result<()> {
    let mut session = load_session(id)?;
    session.messages = messages;
    save_session(&session)
}

/// Formats a SystemTime as a simple date/time string (YYYY-MM-DD HH:MM).
pub fn format_timestamp(time: SystemTime) -> Option<String> {
    let datetime: DateTime<Utc> = time.into();
    Some(datetime.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::message::{Message, Role};

    use super::*;

    // AICHAT_HOME is process-global; serialize the tests that touch it.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn setup_temp_aichat_home() -> (std::sync::MutexGuard<'static, ()>, TempDir) {
        let guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp = TempDir::new().unwrap();
        // SAFETY: the lock above serializes environment variable access
        unsafe {
            std::env::set_var("AICHAT_HOME", temp.path());
        }
        (guard, temp)
    }

    #[test]
    fn test_create_and_load_round_trip() {
        let _temp = setup_temp_aichat_home();

        let mut session = create_session("Weekend project").unwrap();
        session.messages.push(Message::new("hi", Role::User));
        session
            .messages
            .push(Message::new("hello", Role::Assistant));
        save_session(&session).unwrap();

        let loaded = load_session(&session.id).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_rename_preserves_messages() {
        let _temp = setup_temp_aichat_home();

        let mut session = create_session("Old name").unwrap();
        session.messages.push(Message::new("kept", Role::User));
        save_session(&session).unwrap();

        rename_session(&session.id, "New name").unwrap();

        let loaded = load_session(&session.id).unwrap();
        assert_eq!(loaded.name, "New name");
        assert_eq!(loaded.messages.len(), 1);
    }

    #[test]
    fn test_delete_removes_session() {
        let _temp = setup_temp_aichat_home();

        let session = create_session("Doomed").unwrap();
        delete_session(&session.id).unwrap();

        assert!(load_session(&session.id).is_err());
    }

    #[test]
    fn test_list_sessions_reports_names_and_counts() {
        let _temp = setup_temp_aichat_home();

        let mut session = create_session("Listed").unwrap();
        session.messages.push(Message::new("one", Role::User));
        save_session(&session).unwrap();

        let sessions = list_sessions().unwrap();
        let info = sessions.iter().find(|s| s.id == session.id).unwrap();
        assert_eq!(info.name, "Listed");
        assert_eq!(info.message_count, 1);
    }

    #[test]
    fn test_list_sessions_missing_dir_is_empty() {
        let _temp = setup_temp_aichat_home();
        assert!(list_sessions().unwrap().is_empty());
    }

    #[test]
    fn test_replace_messages_swaps_and_persists() {
        let _temp = setup_temp_aichat_home();

        let mut session = create_session("Swap").unwrap();
        session.messages.push(Message::new("old", Role::User));
        save_session(&session).unwrap();

        let replacement = vec![Message::new("new", Role::Assistant)];
        replace_messages(&session.id, replacement).unwrap();

        let loaded = load_session(&session.id).unwrap();
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(loaded.messages[0].content, "new");
    }
}
