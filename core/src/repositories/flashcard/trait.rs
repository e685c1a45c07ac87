//! Flashcard repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::flashcard::Flashcard;
use crate::errors::DomainError;

/// Repository trait for Flashcard entity persistence operations
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Find a flashcard by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Flashcard>, DomainError>;

    /// List a user's cards with `due_at <= now`, most overdue first
    async fn find_due_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Flashcard>, DomainError>;

    /// Create a new flashcard
    async fn create(&self, card: Flashcard) -> Result<Flashcard, DomainError>;

    /// Update an existing flashcard
    ///
    /// # Returns
    /// * `Ok(Flashcard)` - The updated card
    /// * `Err(DomainError::NotFound)` - Card does not exist
    async fn update(&self, card: Flashcard) -> Result<Flashcard, DomainError>;
}
