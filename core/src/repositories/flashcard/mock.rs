//! Mock implementation of FlashcardRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::flashcard::Flashcard;
use crate::errors::DomainError;

use super::trait_::FlashcardRepository;

/// Mock flashcard repository for testing
pub struct MockFlashcardRepository {
    cards: Arc<RwLock<HashMap<Uuid, Flashcard>>>,
}

impl MockFlashcardRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            cards: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockFlashcardRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlashcardRepository for MockFlashcardRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Flashcard>, DomainError> {
        let cards = self.cards.read().await;
        Ok(cards.get(&id).cloned())
    }

    async fn find_due_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Flashcard>, DomainError> {
        let cards = self.cards.read().await;
        let mut due: Vec<Flashcard> = cards
            .values()
            .filter(|c| c.user_id == user_id && c.due_at <= now)
            .cloned()
            .collect();
        due.sort_by(|a, b| a.due_at.cmp(&b.due_at));
        Ok(due)
    }

    async fn create(&self, card: Flashcard) -> Result<Flashcard, DomainError> {
        let mut cards = self.cards.write().await;
        cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn update(&self, card: Flashcard) -> Result<Flashcard, DomainError> {
        let mut cards = self.cards.write().await;

        if !cards.contains_key(&card.id) {
            return Err(DomainError::NotFound {
                resource: "Flashcard".to_string(),
            });
        }

        cards.insert(card.id, card.clone());
        Ok(card)
    }
}
