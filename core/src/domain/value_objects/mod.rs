//! Value objects representing immutable domain concepts.

pub mod auth;

// Re-export commonly used types
pub use auth::{AuthSession, VerifiedAccount};
