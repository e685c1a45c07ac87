//! MySQL implementation of the FlashcardRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gt_core::domain::entities::flashcard::Flashcard;
use gt_core::errors::DomainError;
use gt_core::repositories::flashcard::FlashcardRepository;

use super::map_write_error;

/// MySQL implementation of FlashcardRepository
pub struct MySqlFlashcardRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlFlashcardRepository {
    /// Create a new MySQL flashcard repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Flashcard entity
    fn row_to_card(row: &sqlx::mysql::MySqlRow) -> Result<Flashcard, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let user_id: String = row.try_get("user_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?;

        Ok(Flashcard {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid flashcard UUID: {}", e) })?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            front: row.try_get("front")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get front: {}", e) })?,
            back: row.try_get("back")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get back: {}", e) })?,
            interval_days: row.try_get("interval_days")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get interval_days: {}", e) })?,
            due_at: row.try_get::<DateTime<Utc>, _>("due_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get due_at: {}", e) })?,
            review_count: row.try_get("review_count")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get review_count: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl FlashcardRepository for MySqlFlashcardRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Flashcard>, DomainError> {
        let query = r#"
            SELECT id, user_id, front, back, interval_days, due_at, review_count,
                   created_at, updated_at
            FROM flashcards
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Database query failed: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_card(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_due_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Flashcard>, DomainError> {
        let query = r#"
            SELECT id, user_id, front, back, interval_days, due_at, review_count,
                   created_at, updated_at
            FROM flashcards
            WHERE user_id = ? AND due_at <= ?
            ORDER BY due_at ASC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to list due flashcards: {}", e) })?;

        let mut cards = Vec::with_capacity(rows.len());
        for row in rows {
            cards.push(Self::row_to_card(&row)?);
        }

        Ok(cards)
    }

    async fn create(&self, card: Flashcard) -> Result<Flashcard, DomainError> {
        let query = r#"
            INSERT INTO flashcards (
                id, user_id, front, back, interval_days, due_at, review_count,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(card.id.to_string())
            .bind(card.user_id.to_string())
            .bind(&card.front)
            .bind(&card.back)
            .bind(card.interval_days)
            .bind(card.due_at)
            .bind(card.review_count)
            .bind(card.created_at)
            .bind(card.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Flashcard", "create"))?;

        Ok(card)
    }

    async fn update(&self, card: Flashcard) -> Result<Flashcard, DomainError> {
        let query = r#"
            UPDATE flashcards SET
                front = ?,
                back = ?,
                interval_days = ?,
                due_at = ?,
                review_count = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&card.front)
            .bind(&card.back)
            .bind(card.interval_days)
            .bind(card.due_at)
            .bind(card.review_count)
            .bind(card.updated_at)
            .bind(card.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Flashcard", "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Flashcard".to_string(),
            });
        }

        Ok(card)
    }
}
