//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository pattern implementations
//! - Database migrations

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlChatRepository, MySqlEnrollmentRepository, MySqlFlashcardRepository,
    MySqlProgramRepository, MySqlUserRepository,
};
