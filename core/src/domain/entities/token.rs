//! Session token claims for JWT-based authentication.
//!
//! The backend issues a single HS256 bearer token per sign-in. Deployments
//! that wrap it in an outer session layer do so entirely on the frontend;
//! this crate only ever mints and validates the inner token.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token expiration time (24 hours)
pub const SESSION_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Claims structure for the JWT payload
///
/// Intentionally minimal: the subject plus timing claims. Role and
/// verification state are loaded fresh from storage on every request, so
/// stale claims can never widen access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a session token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    ///
    /// # Returns
    ///
    /// A new `Claims` instance expiring 24 hours from now
    pub fn new_session_token(user_id: Uuid) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(SESSION_TOKEN_EXPIRY_HOURS);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
