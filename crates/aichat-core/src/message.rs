//! Chat message types shared across the store, codec, and providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Returns the wire identifier ("user" / "assistant").
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Returns the human-readable label for transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One turn of a conversation.
///
/// Immutable once created; ordering within a session is insertion order and
/// must be preserved (render order = vector order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message with a freshly generated id and the current instant.
    pub fn new(content: impl Into<String>, role: Role) -> Self {
        Self {
            id: generate_message_id(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}

/// Length of generated message ids.
///
/// Nine base-36 characters give ~46 bits of entropy, enough to make
/// collisions negligible at session-scale message counts.
const MESSAGE_ID_LEN: usize = 9;

/// Generates a random base-36 message id.
pub fn generate_message_id() -> String {
    let mut value = uuid::Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(MESSAGE_ID_LEN);
    for _ in 0..MESSAGE_ID_LEN {
        let digit = (value % 36) as u32;
        let ch = std::char::from_digit(digit, 36).unwrap_or('0');
        id.push(ch);
        value /= 36;
    }
    id
}
