//! Enrollment request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gt_core::domain::entities::enrollment::{Enrollment, EnrollmentStatus};

/// Body of `POST /api/v1/enrollments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub program_id: Uuid,
}

/// Body of `PATCH /api/v1/enrollments/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress_percent: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub program_id: Uuid,
    pub status: EnrollmentStatus,
    pub progress_percent: i32,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Enrollment> for EnrollmentResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id,
            program_id: enrollment.program_id,
            status: enrollment.status,
            progress_percent: enrollment.progress_percent,
            enrolled_at: enrollment.enrolled_at,
            completed_at: enrollment.completed_at,
        }
    }
}
