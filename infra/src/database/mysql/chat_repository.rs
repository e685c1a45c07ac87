//! MySQL implementation of the ChatRepository trait.
//!
//! Messages are append-only. Appending runs in a transaction so the message
//! row and the session's `updated_at` bump land together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gt_core::domain::entities::chat::{ChatMessage, ChatRole, ChatSession};
use gt_core::errors::DomainError;
use gt_core::repositories::chat::ChatRepository;

/// MySQL implementation of ChatRepository
pub struct MySqlChatRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlChatRepository {
    /// Create a new MySQL chat repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to ChatSession entity
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<ChatSession, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let user_id: String = row.try_get("user_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?;

        Ok(ChatSession {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid session UUID: {}", e) })?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            title: row.try_get("title")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get title: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }

    /// Convert database row to ChatMessage entity
    fn row_to_message(row: &sqlx::mysql::MySqlRow) -> Result<ChatMessage, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let session_id: String = row.try_get("session_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get session_id: {}", e) })?;

        let role: String = row.try_get("role")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })?;

        Ok(ChatMessage {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid message UUID: {}", e) })?,
            session_id: Uuid::parse_str(&session_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid session UUID: {}", e) })?,
            role: role.parse::<ChatRole>()
                .map_err(|e| DomainError::Internal { message: format!("Invalid role: {}", e) })?,
            content: row.try_get("content")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get content: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl ChatRepository for MySqlChatRepository {
    async fn create_session(&self, session: ChatSession) -> Result<ChatSession, DomainError> {
        let query = r#"
            INSERT INTO chat_sessions (id, user_id, title, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(session.id.to_string())
            .bind(session.user_id.to_string())
            .bind(&session.title)
            .bind(session.created_at)
            .bind(session.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to create chat session: {}", e) })?;

        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<ChatSession>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM chat_sessions
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Database query failed: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_sessions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ChatSession>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM chat_sessions
            WHERE user_id = ?
            ORDER BY updated_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to list chat sessions: {}", e) })?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            sessions.push(Self::row_to_session(&row)?);
        }

        Ok(sessions)
    }

    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, DomainError> {
        let mut tx = self.pool.begin().await
            .map_err(|e| DomainError::Internal { message: format!("Failed to begin transaction: {}", e) })?;

        let touched = sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(message.created_at)
            .bind(message.session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to touch chat session: {}", e) })?;

        if touched.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "ChatSession".to_string(),
            });
        }

        let query = r#"
            INSERT INTO chat_messages (id, session_id, role, content, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(message.id.to_string())
            .bind(message.session_id.to_string())
            .bind(message.role.as_str())
            .bind(&message.content)
            .bind(message.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to append chat message: {}", e) })?;

        tx.commit().await
            .map_err(|e| DomainError::Internal { message: format!("Failed to commit transaction: {}", e) })?;

        Ok(message)
    }

    async fn list_messages(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, DomainError> {
        let query = r#"
            SELECT id, session_id, role, content, created_at
            FROM chat_messages
            WHERE session_id = ?
            ORDER BY seq ASC
        "#;

        let rows = sqlx::query(query)
            .bind(session_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to list chat messages: {}", e) })?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            messages.push(Self::row_to_message(&row)?);
        }

        Ok(messages)
    }
}
