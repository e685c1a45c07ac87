//! MySQL repository implementations
//!
//! Concrete implementations of the core repository traits backed by SQLx.
//! All implementations share one process-wide connection pool.
//!
//! Unique-index violations are surfaced as [`DomainError::Duplicate`] so
//! callers never pre-check for existence; the index is the single guarantor.

use gt_core::errors::DomainError;

pub mod chat_repository;
pub mod enrollment_repository;
pub mod flashcard_repository;
pub mod program_repository;
pub mod user_repository;

pub use chat_repository::MySqlChatRepository;
pub use enrollment_repository::MySqlEnrollmentRepository;
pub use flashcard_repository::MySqlFlashcardRepository;
pub use program_repository::MySqlProgramRepository;
pub use user_repository::MySqlUserRepository;

/// Whether an SQLx error is a unique-index violation (MySQL error 1062)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Map a write error to the domain, treating a unique violation on
/// `resource` as a duplicate
pub(crate) fn map_write_error(err: sqlx::Error, resource: &str, action: &str) -> DomainError {
    if is_unique_violation(&err) {
        DomainError::Duplicate {
            resource: resource.to_string(),
        }
    } else {
        DomainError::Internal {
            message: format!("Failed to {} {}: {}", action, resource.to_lowercase(), err),
        }
    }
}
