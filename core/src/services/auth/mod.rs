//! Authentication service module
//!
//! This module provides a complete authentication system including:
//! - User signup with email verification
//! - Verification token issuance, expiry, and resend cooldown
//! - Login with bearer session tokens
//! - Fresh user lookup for the request gate

mod config;
mod emails;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, SignupData};
