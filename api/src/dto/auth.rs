//! Authentication request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gt_core::domain::entities::user::{User, UserRole};
use gt_core::services::auth::SignupData;

/// Body of `POST /api/v1/auth/signup`
///
/// Every field is optional at the deserialization layer so that absent and
/// blank values share one `MISSING_FIELDS` outcome in the domain service,
/// instead of absent fields dying in the JSON deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

impl From<SignupRequest> for SignupData {
    fn from(request: SignupRequest) -> Self {
        SignupData {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            role: request.role,
            age: request.age,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Body of `POST /api/v1/auth/signin`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub message: String,
}

/// Body of `POST /api/v1/auth/resend-verification`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Success body of `GET /api/v1/auth/verify-email/{token}`
///
/// The expired and invalid outcomes use the same top-level `status`
/// discriminator (`"expired"` / `"invalid"`) alongside an error `code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailResponse {
    pub message: String,
    pub status: String,
    pub email: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

/// Sanitized user view returned by signin, `GET /auth/me`, and the
/// verification endpoints. Never carries the password hash or any
/// verification token material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            age: user.age,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}
