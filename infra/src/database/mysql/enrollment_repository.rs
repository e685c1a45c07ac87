//! MySQL implementation of the EnrollmentRepository trait.
//!
//! The unique index on (user_id, program_id) is the single guarantor against
//! double enrollment; its violation surfaces as `DomainError::Duplicate`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gt_core::domain::entities::enrollment::{Enrollment, EnrollmentStatus};
use gt_core::errors::DomainError;
use gt_core::repositories::enrollment::EnrollmentRepository;

use super::map_write_error;

/// MySQL implementation of EnrollmentRepository
pub struct MySqlEnrollmentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlEnrollmentRepository {
    /// Create a new MySQL enrollment repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Enrollment entity
    fn row_to_enrollment(row: &sqlx::mysql::MySqlRow) -> Result<Enrollment, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let user_id: String = row.try_get("user_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?;

        let program_id: String = row.try_get("program_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get program_id: {}", e) })?;

        let status: String = row.try_get("status")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get status: {}", e) })?;

        Ok(Enrollment {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid enrollment UUID: {}", e) })?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            program_id: Uuid::parse_str(&program_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid program UUID: {}", e) })?,
            status: status.parse::<EnrollmentStatus>()
                .map_err(|e| DomainError::Internal { message: format!("Invalid status: {}", e) })?,
            progress_percent: row.try_get("progress_percent")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get progress_percent: {}", e) })?,
            enrolled_at: row.try_get::<DateTime<Utc>, _>("enrolled_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get enrolled_at: {}", e) })?,
            completed_at: row.try_get::<Option<DateTime<Utc>>, _>("completed_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get completed_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl EnrollmentRepository for MySqlEnrollmentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>, DomainError> {
        let query = r#"
            SELECT id, user_id, program_id, status, progress_percent, enrolled_at, completed_at
            FROM enrollments
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Database query failed: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_enrollment(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Enrollment>, DomainError> {
        let query = r#"
            SELECT id, user_id, program_id, status, progress_percent, enrolled_at, completed_at
            FROM enrollments
            WHERE user_id = ?
            ORDER BY enrolled_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to list enrollments: {}", e) })?;

        let mut enrollments = Vec::with_capacity(rows.len());
        for row in rows {
            enrollments.push(Self::row_to_enrollment(&row)?);
        }

        Ok(enrollments)
    }

    async fn create(&self, enrollment: Enrollment) -> Result<Enrollment, DomainError> {
        let query = r#"
            INSERT INTO enrollments (
                id, user_id, program_id, status, progress_percent, enrolled_at, completed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(enrollment.id.to_string())
            .bind(enrollment.user_id.to_string())
            .bind(enrollment.program_id.to_string())
            .bind(enrollment.status.as_str())
            .bind(enrollment.progress_percent)
            .bind(enrollment.enrolled_at)
            .bind(enrollment.completed_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Enrollment", "create"))?;

        Ok(enrollment)
    }

    async fn update(&self, enrollment: Enrollment) -> Result<Enrollment, DomainError> {
        let query = r#"
            UPDATE enrollments SET
                status = ?,
                progress_percent = ?,
                completed_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(enrollment.status.as_str())
            .bind(enrollment.progress_percent)
            .bind(enrollment.completed_at)
            .bind(enrollment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Enrollment", "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Enrollment".to_string(),
            });
        }

        Ok(enrollment)
    }
}
