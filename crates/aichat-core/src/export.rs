//! Export/import codec for chat sessions.
//!
//! JSON exports use the versioned `ExportDocument` envelope and are the only
//! format that supports import. Markdown exports are a human-readable
//! transcript, not intended for round-trip.

use std::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::{Message, Role};

/// Format version written into every JSON export.
pub const EXPORT_VERSION: &str = "1.0.0";

/// The versioned JSON envelope for a session's messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportDocument {
    pub messages: Vec<Message>,
    pub timestamp: String,
    pub version: String,
    #[serde(rename = "sessionName", skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
}

/// Import failure taxonomy.
///
/// `Parse` covers malformed bytes; `Validation` covers well-formed JSON that
/// does not satisfy the `ExportDocument` shape. Either way the import is
/// all-or-nothing: the caller's message list stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    Parse(String),
    Validation(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(msg) => write!(f, "Failed to parse file: {}", msg),
            ImportError::Validation(msg) => write!(f, "Invalid file format: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

/// Serializes messages into a pretty-printed JSON export.
pub fn export_json(messages: &[Message], session_name: Option<&str>) -> Result<String> {
    let document = ExportDocument {
        messages: messages.to_vec(),
        timestamp: Utc::now().to_rfc3339(),
        version: EXPORT_VERSION.to_string(),
        session_name: Some(
            session_name
                .map(str::to_string)
                .unwrap_or_else(default_session_name),
        ),
    };

    serde_json::to_string_pretty(&document).context("Failed to serialize export document")
}

/// Renders messages as a human-readable Markdown transcript.
pub fn export_markdown(messages: &[Message], session_name: Option<&str>) -> String {
    let title = session_name
        .map(str::to_string)
        .unwrap_or_else(default_session_name);
    let now = Local::now();

    let mut markdown = format!("# {}\n\n", title);
    markdown.push_str(&format!(
        "*Exported on {} at {}*\n\n",
        now.format("%Y-%m-%d"),
        now.format("%H:%M:%S")
    ));
    markdown.push_str("---\n\n");

    for (index, message) in messages.iter().enumerate() {
        let timestamp = message
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");
        markdown.push_str(&format!("## {} ({})\n\n", message.role.label(), timestamp));
        markdown.push_str(&message.content);
        markdown.push_str("\n\n");

        // Rule between consecutive messages, not after the last.
        if index < messages.len() - 1 {
            markdown.push_str("---\n\n");
        }
    }

    markdown
}

/// Parses and validates an exported JSON document.
///
/// All-or-nothing: any malformed element fails the whole import.
pub fn import_json(bytes: &[u8]) -> Result<ExportDocument, ImportError> {
    let content =
        std::str::from_utf8(bytes).map_err(|e| ImportError::Parse(format!("not UTF-8: {}", e)))?;

    let value: Value =
        serde_json::from_str(content).map_err(|e| ImportError::Parse(e.to_string()))?;

    let raw_messages = value
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| ImportError::Validation("messages array not found".to_string()))?;

    let mut messages = Vec::with_capacity(raw_messages.len());
    for (index, raw) in raw_messages.iter().enumerate() {
        messages.push(parse_message(raw, index)?);
    }

    Ok(ExportDocument {
        messages,
        timestamp: string_field(&value, "timestamp"),
        version: string_field(&value, "version"),
        session_name: value
            .get("sessionName")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Validates one message element, converting its timestamp string into an
/// instant.
fn parse_message(raw: &Value, index: usize) -> Result<Message, ImportError> {
    let invalid = |what: &str| {
        ImportError::Validation(format!("invalid message at index {}: {}", index, what))
    };

    let field = |name: &str| -> Result<&str, ImportError> {
        raw.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| invalid(&format!("missing {}", name)))
    };

    let id = field("id")?;
    let content = field("content")?;
    let role = match field("role")? {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        other => return Err(invalid(&format!("unknown role '{}'", other))),
    };
    let timestamp = DateTime::parse_from_rfc3339(field("timestamp")?)
        .map_err(|e| invalid(&format!("bad timestamp: {}", e)))?
        .with_timezone(&Utc);

    Ok(Message {
        id: id.to_string(),
        content: content.to_string(),
        role,
        timestamp,
    })
}

fn string_field(value: &Value, name: &str) -> String {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Derives a filesystem-safe default file name from a session title.
///
/// Strips characters outside word-characters/space/hyphen, collapses
/// whitespace runs to single hyphens, lowercases, and appends a millisecond
/// timestamp plus the extension.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let slug = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    format!(
        "aichat-{}-{}.{}",
        slug,
        Utc::now().timestamp_millis(),
        extension
    )
}

fn default_session_name() -> String {
    format!("Chat Session {}", Local::now().format("%Y-%m-%d"))
}
