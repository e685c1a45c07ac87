//! Enrollment repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::enrollment::Enrollment;
use crate::errors::DomainError;

/// Repository trait for Enrollment entity persistence operations
///
/// Create must surface a unique violation on (user, program) as
/// [`DomainError::Duplicate`]; callers do not pre-check.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find an enrollment by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>, DomainError>;

    /// List all enrollments belonging to a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Enrollment>, DomainError>;

    /// Create a new enrollment
    ///
    /// # Returns
    /// * `Ok(Enrollment)` - The created enrollment
    /// * `Err(DomainError::Duplicate)` - User already enrolled in the program
    async fn create(&self, enrollment: Enrollment) -> Result<Enrollment, DomainError>;

    /// Update an existing enrollment
    ///
    /// # Returns
    /// * `Ok(Enrollment)` - The updated enrollment
    /// * `Err(DomainError::NotFound)` - Enrollment does not exist
    async fn update(&self, enrollment: Enrollment) -> Result<Enrollment, DomainError>;
}
