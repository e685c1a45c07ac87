//! Mock implementation of ChatRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::chat::{ChatMessage, ChatSession};
use crate::errors::DomainError;

use super::trait_::ChatRepository;

/// Mock chat repository for testing
pub struct MockChatRepository {
    sessions: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl MockChatRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MockChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for MockChatRepository {
    async fn create_session(&self, session: ChatSession) -> Result<ChatSession, DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<ChatSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn list_sessions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ChatSession>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut owned: Vec<ChatSession> = sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, DomainError> {
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .get_mut(&message.session_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "ChatSession".to_string(),
            })?;
        session.touch();

        let mut messages = self.messages.write().await;
        messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, DomainError> {
        let messages = self.messages.read().await;
        Ok(messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }
}
