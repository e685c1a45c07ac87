//! Flashcard entity with a minimal spaced-repetition schedule.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A study card owned by a single user
///
/// Scheduling is a deliberately small doubling scheme: a remembered review
/// doubles the interval, a forgotten one resets it to one day. The interval
/// never drops below one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Unique identifier for the card
    pub id: Uuid,

    /// User who owns the card
    pub user_id: Uuid,

    /// Prompt side
    pub front: String,

    /// Answer side
    pub back: String,

    /// Current review interval in days
    pub interval_days: i32,

    /// Timestamp when the card next comes due
    pub due_at: DateTime<Utc>,

    /// Number of completed reviews
    pub review_count: i32,

    /// Timestamp when the card was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the card was last updated
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    /// Creates a new card due immediately with a one-day interval
    pub fn new(user_id: Uuid, front: String, back: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            front,
            back,
            interval_days: 1,
            due_at: now,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a review outcome and reschedules the card
    ///
    /// Remembered doubles the interval; forgotten resets it to one day.
    /// Either way the card is pushed `interval_days` into the future and the
    /// review counter advances.
    pub fn review(&mut self, remembered: bool) {
        let now = Utc::now();
        if remembered {
            self.interval_days = (self.interval_days * 2).max(1);
        } else {
            self.interval_days = 1;
        }
        self.due_at = now + Duration::days(self.interval_days as i64);
        self.review_count += 1;
        self.updated_at = now;
    }

    /// Checks whether the card is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}
