//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token
//! management, and validation operations. The HTTP status and wire `code` for
//! each variant are assigned in the API layer.

use thiserror::Error;

/// Authentication-related errors
///
/// These errors represent the authentication failure scenarios the frontend
/// branches on.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Required fields are missing or blank")]
    MissingFields,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("An account with this email already exists")]
    EmailExists,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address not verified: {email}")]
    EmailNotVerified { email: String },

    #[error("Verification token expired for {email}")]
    VerificationTokenExpired { email: String },

    #[error("Verification token is invalid")]
    VerificationTokenInvalid,

    #[error("Email address is already verified")]
    AlreadyVerified,

    #[error("Resend requested too soon, retry after {retry_after_seconds}s")]
    ResendCooldown { retry_after_seconds: i64 },

    #[error("Verification email could not be sent")]
    EmailDispatchFailed,
}

/// Token-related errors
///
/// These errors represent session token validation and signing failures.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
///
/// These errors represent input validation failures outside the dedicated
/// auth checks.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}
