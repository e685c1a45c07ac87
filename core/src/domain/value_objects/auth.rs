//! Authentication outcome value objects returned by the auth service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::SESSION_TOKEN_EXPIRY_HOURS;
use crate::domain::entities::user::User;

/// Result of a successful sign-in
///
/// Carries the signed bearer token plus the authenticated user so the API
/// layer can build both the JSON body and the session cookie from one value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    /// The authenticated user (password hash is never serialized)
    pub user: User,

    /// Signed JWT bearer token
    pub access_token: String,

    /// Token expiration time in seconds
    pub expires_in: i64,
}

impl AuthSession {
    /// Creates a new session result for a signed token
    pub fn new(user: User, access_token: String) -> Self {
        Self {
            user,
            access_token,
            expires_in: SESSION_TOKEN_EXPIRY_HOURS * 3600,
        }
    }
}

/// Result of a successful email verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifiedAccount {
    /// Identifier of the verified user
    pub user_id: Uuid,

    /// Email address that was verified
    pub email: String,
}
