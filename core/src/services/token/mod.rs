//! Token service module for JWT management
//!
//! This module handles session token operations:
//! - HS256 session token generation
//! - Token verification and claims extraction
//!
//! Sessions are stateless; nothing is persisted and nothing can be revoked
//! short of expiry.

mod config;
mod service;

pub use config::TokenServiceConfig;
pub use service::TokenService;
