//! Enrollment entity linking users to programs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress state of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "DROPPED")]
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "ACTIVE",
            EnrollmentStatus::Completed => "COMPLETED",
            EnrollmentStatus::Dropped => "DROPPED",
        }
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(EnrollmentStatus::Active),
            "COMPLETED" => Ok(EnrollmentStatus::Completed),
            "DROPPED" => Ok(EnrollmentStatus::Dropped),
            _ => Err(format!("Unknown enrollment status: {}", s)),
        }
    }
}

/// A user's membership in a program
///
/// At most one enrollment exists per (user, program) pair; the storage layer
/// enforces this with a unique index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identifier for the enrollment
    pub id: Uuid,

    /// User who enrolled
    pub user_id: Uuid,

    /// Program enrolled in
    pub program_id: Uuid,

    /// Progress state
    pub status: EnrollmentStatus,

    /// Completion percentage, clamped to 0..=100
    pub progress_percent: i32,

    /// Timestamp when the user enrolled
    pub enrolled_at: DateTime<Utc>,

    /// Timestamp when the enrollment was completed, if it was
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// Creates a new active enrollment with zero progress
    pub fn new(user_id: Uuid, program_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            program_id,
            status: EnrollmentStatus::Active,
            progress_percent: 0,
            enrolled_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Updates the completion percentage, clamping to 0..=100
    ///
    /// Reaching 100 marks the enrollment completed and stamps
    /// `completed_at`; completion is not reversed by later updates.
    pub fn update_progress(&mut self, percent: i32) {
        self.progress_percent = percent.clamp(0, 100);
        if self.progress_percent == 100 && self.status == EnrollmentStatus::Active {
            self.status = EnrollmentStatus::Completed;
            self.completed_at = Some(Utc::now());
        }
    }

    /// Marks the enrollment completed, stamping `completed_at` if unset
    pub fn complete(&mut self) {
        self.status = EnrollmentStatus::Completed;
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }

    /// Drops the enrollment
    pub fn drop_out(&mut self) {
        self.status = EnrollmentStatus::Dropped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enrollment_is_active() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.progress_percent, 0);
        assert!(enrollment.completed_at.is_none());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());

        enrollment.update_progress(-10);
        assert_eq!(enrollment.progress_percent, 0);

        enrollment.update_progress(250);
        assert_eq!(enrollment.progress_percent, 100);
    }

    #[test]
    fn test_full_progress_completes_enrollment() {
        let mut enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());

        enrollment.update_progress(60);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert!(enrollment.completed_at.is_none());

        enrollment.update_progress(100);
        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
        assert!(enrollment.completed_at.is_some());
    }

    #[test]
    fn test_explicit_complete_stamps_timestamp_once() {
        let mut enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());

        enrollment.complete();
        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
        let first = enrollment.completed_at;
        assert!(first.is_some());

        enrollment.complete();
        assert_eq!(enrollment.completed_at, first);
    }

    #[test]
    fn test_drop_out() {
        let mut enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());

        enrollment.drop_out();
        assert_eq!(enrollment.status, EnrollmentStatus::Dropped);
    }

    #[test]
    fn test_status_wire_format() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());
        let json = serde_json::to_string(&enrollment).unwrap();

        assert!(json.contains("\"status\":\"ACTIVE\""));
    }
}
