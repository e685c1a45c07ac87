//! User entity representing a registered account on the GrowTeens platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification::VerificationToken;

/// Role of a user on the platform
///
/// The role decides which frontend routes a user can reach; that check lives
/// in the frontend route guard, not in this backend. The wire strings below
/// are part of the frontend contract (`SPONSORS` is plural there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "TEEN")]
    Teen,
    #[serde(rename = "MENTOR")]
    Mentor,
    #[serde(rename = "SPONSORS")]
    Sponsor,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl UserRole {
    /// Wire/storage string for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Teen => "TEEN",
            UserRole::Mentor => "MENTOR",
            UserRole::Sponsor => "SPONSORS",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEEN" => Ok(UserRole::Teen),
            "MENTOR" => Ok(UserRole::Mentor),
            "SPONSORS" => Ok(UserRole::Sponsor),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique per account, used as the login identifier
    pub email: String,

    /// bcrypt hash of the password; never leaves the backend
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Platform role
    pub role: UserRole,

    /// Optional age supplied at signup
    pub age: Option<i32>,

    /// Whether the email address has been verified
    pub email_verified: bool,

    /// Outstanding verification token, if any
    ///
    /// Non-null only while `email_verified` is false; at most one token is
    /// outstanding because a resend overwrites the previous one.
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,

    /// Expiry of the outstanding verification token
    pub verification_expires: Option<DateTime<Utc>>,

    /// When the most recent verification token was issued
    ///
    /// Drives the resend cooldown; independent of `verification_expires`.
    pub last_token_issued_at: Option<DateTime<Utc>>,

    /// Timestamp of the user's last login
    pub last_active: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user without an outstanding verification token
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        role: UserRole,
        age: Option<i32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            role,
            age,
            email_verified: false,
            verification_token: None,
            verification_expires: None,
            last_token_issued_at: None,
            last_active: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Stores a freshly issued verification token, replacing any previous one
    pub fn apply_verification_token(&mut self, token: &VerificationToken) {
        self.verification_token = Some(token.token.clone());
        self.verification_expires = Some(token.expires_at);
        self.last_token_issued_at = Some(token.issued_at);
        self.updated_at = Utc::now();
    }

    /// Marks the email as verified and clears the token pair
    ///
    /// The transition is one-way; callers must not issue tokens for a
    /// verified user.
    pub fn mark_verified(&mut self) {
        self.email_verified = true;
        self.verification_token = None;
        self.verification_expires = None;
        self.updated_at = Utc::now();
    }

    /// Whether the outstanding token has passed its expiry at `now`
    ///
    /// Returns false when no token is outstanding.
    pub fn verification_expired(&self, now: DateTime<Utc>) -> bool {
        match self.verification_expires {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self) {
        self.last_active = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}
