//! Shared utilities and common types for the GrowTeens server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error codes and response structures
//! - Utility functions (email validation, etc.)
//! - Common type definitions

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ChatRelayConfig, DatabaseConfig, EmailConfig, EmailProvider,
    Environment, JwtConfig, ServerConfig, SessionConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{PaginatedResponse, Pagination};
pub use utils::validation;
