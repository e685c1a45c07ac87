//! Type definitions module
//!
//! This module organizes types into logical categories:
//! - `pagination` - Pagination for list endpoints

pub mod pagination;

// Re-export commonly used types at module level
pub use pagination::{PaginatedResponse, Pagination};
