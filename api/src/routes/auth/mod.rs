//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints including:
//! - Account signup with email verification
//! - Email verification and resend
//! - Credential sign-in and sign-out
//! - Current-user lookup

pub mod me;
pub mod resend;
pub mod signin;
pub mod signout;
pub mod signup;
pub mod verify_email;
