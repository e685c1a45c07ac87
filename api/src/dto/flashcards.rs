//! Flashcard request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gt_core::domain::entities::flashcard::Flashcard;

/// Body of `POST /api/v1/flashcards`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlashcardRequest {
    pub front: String,
    pub back: String,
}

/// Body of `POST /api/v1/flashcards/{id}/review`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFlashcardRequest {
    pub remembered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardResponse {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub interval_days: i32,
    pub due_at: DateTime<Utc>,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Flashcard> for FlashcardResponse {
    fn from(card: &Flashcard) -> Self {
        Self {
            id: card.id,
            front: card.front.clone(),
            back: card.back.clone(),
            interval_days: card.interval_days,
            due_at: card.due_at,
            review_count: card.review_count,
            created_at: card.created_at,
        }
    }
}
