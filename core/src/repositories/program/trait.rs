//! Program repository trait for catalogue persistence.

use async_trait::async_trait;
use gt_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::program::Program;
use crate::errors::DomainError;

/// Repository trait for Program entity persistence operations
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Find a program by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Program))` - Program found
    /// * `Ok(None)` - No program with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Program>, DomainError>;

    /// List programs ordered by creation time, newest first
    ///
    /// # Arguments
    /// * `pagination` - Validated limit/offset window
    ///
    /// # Returns
    /// * `Ok((programs, total))` - One page plus the unpaged total count
    /// * `Err(DomainError)` - Database or other error occurred
    async fn list(&self, pagination: Pagination) -> Result<(Vec<Program>, u64), DomainError>;

    /// Create a new program
    async fn create(&self, program: Program) -> Result<Program, DomainError>;

    /// Update an existing program
    ///
    /// # Returns
    /// * `Ok(Program)` - The updated program
    /// * `Err(DomainError::NotFound)` - Program does not exist
    async fn update(&self, program: Program) -> Result<Program, DomainError>;

    /// Delete a program
    ///
    /// # Returns
    /// * `Ok(true)` - Program was deleted
    /// * `Ok(false)` - Program not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
