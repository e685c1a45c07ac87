//! Chat repository trait for session and message persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::chat::{ChatMessage, ChatSession};
use crate::errors::DomainError;

/// Repository trait for chat session and message persistence
///
/// Messages are append-only; sessions are never deleted through this
/// interface.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Create a new chat session
    async fn create_session(&self, session: ChatSession) -> Result<ChatSession, DomainError>;

    /// Find a session by its unique identifier
    async fn find_session(&self, id: Uuid) -> Result<Option<ChatSession>, DomainError>;

    /// List a user's sessions, most recently updated first
    async fn list_sessions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ChatSession>, DomainError>;

    /// Append a message to its session and bump the session's `updated_at`
    ///
    /// # Returns
    /// * `Ok(ChatMessage)` - The stored message
    /// * `Err(DomainError::NotFound)` - Session does not exist
    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, DomainError>;

    /// List a session's messages in insertion order
    async fn list_messages(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, DomainError>;
}
