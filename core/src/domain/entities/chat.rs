//! Chat session and message entities for the tutor chatbot.
//!
//! The backend only stores conversations; generation happens at the external
//! LLM gateway, which the API layer proxies to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::str::FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            _ => Err(format!("Unknown chat role: {}", s)),
        }
    }
}

/// A conversation between one user and the tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier for the session
    pub id: Uuid,

    /// User who owns the session
    pub user_id: Uuid,

    /// Short title, defaults to "New chat" until renamed
    pub title: String,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the session was last updated
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Creates a new session for a user
    pub fn new(user_id: Uuid, title: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.unwrap_or_else(|| "New chat".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bumps `updated_at`, used when a message lands in the session
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One message within a chat session
///
/// Ordering within a session follows `created_at`; the storage layer inserts
/// messages append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier for the message
    pub id: Uuid,

    /// Session the message belongs to
    pub session_id: Uuid,

    /// Author role
    pub role: ChatRole,

    /// Message text
    pub content: String,

    /// Timestamp when the message was created
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a new message in a session
    pub fn new(session_id: Uuid, role: ChatRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}
