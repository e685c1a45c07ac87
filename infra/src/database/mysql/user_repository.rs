//! MySQL implementation of the UserRepository trait.
//!
//! This module provides the concrete implementation of user data persistence
//! using MySQL database with SQLx. The unique index on `email` is the single
//! duplicate guarantor; its violation surfaces as `DomainError::Duplicate`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gt_core::domain::entities::user::{User, UserRole};
use gt_core::errors::DomainError;
use gt_core::repositories::user::UserRepository;

use super::map_write_error;

const USER_COLUMNS: &str = r#"
    id, email, password_hash, first_name, last_name, role, age,
    email_verified, verification_token, verification_expires,
    last_token_issued_at, last_active, created_at, updated_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    ///
    /// Maps database columns to User struct fields
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let role: String = row.try_get("role")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            email: row.try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            password_hash: row.try_get("password_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get password_hash: {}", e) })?,
            first_name: row.try_get("first_name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get first_name: {}", e) })?,
            last_name: row.try_get("last_name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get last_name: {}", e) })?,
            role: role.parse::<UserRole>()
                .map_err(|e| DomainError::Internal { message: format!("Invalid role: {}", e) })?,
            age: row.try_get("age")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get age: {}", e) })?,
            email_verified: row.try_get("email_verified")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email_verified: {}", e) })?,
            verification_token: row.try_get("verification_token")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get verification_token: {}", e) })?,
            verification_expires: row.try_get::<Option<DateTime<Utc>>, _>("verification_expires")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get verification_expires: {}", e) })?,
            last_token_issued_at: row.try_get::<Option<DateTime<Utc>>, _>("last_token_issued_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get last_token_issued_at: {}", e) })?,
            last_active: row.try_get::<Option<DateTime<Utc>>, _>("last_active")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get last_active: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }

    async fn fetch_one_by(
        &self,
        query: &str,
        bind: &str,
    ) -> Result<Option<User>, DomainError> {
        let result = sqlx::query(query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Database query failed: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"SELECT {} FROM users WHERE id = ? LIMIT 1"#,
            USER_COLUMNS
        );
        self.fetch_one_by(&query, &id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"SELECT {} FROM users WHERE email = ? LIMIT 1"#,
            USER_COLUMNS
        );
        self.fetch_one_by(&query, email).await
    }

    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"SELECT {} FROM users WHERE verification_token = ? LIMIT 1"#,
            USER_COLUMNS
        );
        self.fetch_one_by(&query, token).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name, role, age,
                email_verified, verification_token, verification_expires,
                last_token_issued_at, last_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .bind(user.age)
            .bind(user.email_verified)
            .bind(&user.verification_token)
            .bind(user.verification_expires)
            .bind(user.last_token_issued_at)
            .bind(user.last_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "User", "create"))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?,
                password_hash = ?,
                first_name = ?,
                last_name = ?,
                role = ?,
                age = ?,
                email_verified = ?,
                verification_token = ?,
                verification_expires = ?,
                last_token_issued_at = ?,
                last_active = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .bind(user.age)
            .bind(user.email_verified)
            .bind(&user.verification_token)
            .bind(user.verification_expires)
            .bind(user.last_token_issued_at)
            .bind(user.last_active)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "User", "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }
}
