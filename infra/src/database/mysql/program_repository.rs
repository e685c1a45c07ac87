//! MySQL implementation of the ProgramRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gt_shared::Pagination;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gt_core::domain::entities::program::{Program, ProgramStatus};
use gt_core::errors::DomainError;
use gt_core::repositories::program::ProgramRepository;

use super::map_write_error;

/// MySQL implementation of ProgramRepository
pub struct MySqlProgramRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlProgramRepository {
    /// Create a new MySQL program repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Program entity
    fn row_to_program(row: &sqlx::mysql::MySqlRow) -> Result<Program, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let status: String = row.try_get("status")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get status: {}", e) })?;

        Ok(Program {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid program UUID: {}", e) })?,
            title: row.try_get("title")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get title: {}", e) })?,
            description: row.try_get("description")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get description: {}", e) })?,
            category: row.try_get("category")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get category: {}", e) })?,
            status: status.parse::<ProgramStatus>()
                .map_err(|e| DomainError::Internal { message: format!("Invalid status: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl ProgramRepository for MySqlProgramRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Program>, DomainError> {
        let query = r#"
            SELECT id, title, description, category, status, created_at, updated_at
            FROM programs
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Database query failed: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_program(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, pagination: Pagination) -> Result<(Vec<Program>, u64), DomainError> {
        let query = r#"
            SELECT id, title, description, category, status, created_at, updated_at
            FROM programs
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
        "#;

        let rows = sqlx::query(query)
            .bind(pagination.limit)
            .bind(pagination.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to list programs: {}", e) })?;

        let mut programs = Vec::with_capacity(rows.len());
        for row in rows {
            programs.push(Self::row_to_program(&row)?);
        }

        let count_row = sqlx::query("SELECT COUNT(*) as count FROM programs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to count programs: {}", e) })?;

        let total: i64 = count_row.try_get("count")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get count: {}", e) })?;

        Ok((programs, total as u64))
    }

    async fn create(&self, program: Program) -> Result<Program, DomainError> {
        let query = r#"
            INSERT INTO programs (
                id, title, description, category, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(program.id.to_string())
            .bind(&program.title)
            .bind(&program.description)
            .bind(&program.category)
            .bind(program.status.as_str())
            .bind(program.created_at)
            .bind(program.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Program", "create"))?;

        Ok(program)
    }

    async fn update(&self, program: Program) -> Result<Program, DomainError> {
        let query = r#"
            UPDATE programs SET
                title = ?,
                description = ?,
                category = ?,
                status = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&program.title)
            .bind(&program.description)
            .bind(&program.category)
            .bind(program.status.as_str())
            .bind(program.updated_at)
            .bind(program.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Program", "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Program".to_string(),
            });
        }

        Ok(program)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to delete program: {}", e) })?;

        Ok(result.rows_affected() > 0)
    }
}
