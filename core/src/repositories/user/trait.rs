//! User repository trait defining the interface for user data persistence.
//!
//! This module defines the repository pattern interface for User entities,
//! following Domain-Driven Design principles. The trait is async-first and
//! uses Result types for proper error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// This trait defines the contract for data access operations related to
/// users. Implementations should handle the actual database operations while
/// maintaining the abstraction boundary between domain and infrastructure
/// layers. Create must surface a storage-level unique violation on the email
/// column as [`DomainError::Duplicate`]; no caller pre-checks for existence.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use gt_core::repositories::UserRepository;
/// use gt_core::domain::entities::user::User;
/// use gt_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_verification_token(
///         &self,
///         token: &str,
///     ) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn create(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
///
///     async fn update(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    ///
    /// Lookups are exact-match; callers normalize (trim + lowercase) before
    /// calling.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given email
    /// * `Err(DomainError)` - Database or other error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use gt_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_email("amara@example.com").await? {
    ///     Some(user) => println!("User found: {:?}", user.id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their outstanding verification token
    ///
    /// Matches on the raw token value regardless of expiry; the caller
    /// decides how to treat an expired match.
    ///
    /// # Arguments
    /// * `token` - The hex verification token from the emailed link
    ///
    /// # Returns
    /// * `Ok(Some(User))` - A user holds this token
    /// * `Ok(None)` - No user holds this token
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_verification_token(&self, token: &str)
        -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Duplicate)` - Email already registered
    /// * `Err(DomainError)` - Other database error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user in the repository
    ///
    /// # Arguments
    /// * `user` - The User entity with updated fields
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - User does not exist
    /// * `Err(DomainError)` - Other database error occurred
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
