use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::dto::auth::VerifyEmailResponse;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

use gt_core::errors::{AuthError, DomainError};
use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_shared::error_codes;
use gt_shared::validation::mask_email;

/// Handler for GET /api/v1/auth/verify-email/{token}
///
/// Consumes a verification token. The frontend verification page calls this
/// and branches on the `status` field.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Email verified successfully",
///     "status": "success",
///     "email": "ada@example.com",
///     "userId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 410 `{code: TOKEN_EXPIRED, status: "expired", email}`: matching but
///   expired token; the email feeds the resend call-to-action
/// - 404 `{code: INVALID_TOKEN, status: "invalid"}`: no match, including a
///   token already consumed by a previous call
pub async fn verify_email<U, M>(
    state: web::Data<AppState<U, M>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let token = path.into_inner();

    match state.auth_service.verify_email(&token).await {
        Ok(account) => {
            info!(
                user_id = %account.user_id,
                email = %mask_email(&account.email),
                "email verified"
            );
            HttpResponse::Ok().json(VerifyEmailResponse {
                message: "Email verified successfully".to_string(),
                status: "success".to_string(),
                email: account.email,
                user_id: account.user_id,
            })
        }
        Err(DomainError::Auth(AuthError::VerificationTokenExpired { email })) => {
            HttpResponse::Gone().json(json!({
                "code": error_codes::TOKEN_EXPIRED,
                "message": "Verification link has expired. Please request a new one.",
                "status": "expired",
                "email": email,
            }))
        }
        Err(DomainError::Auth(AuthError::VerificationTokenInvalid)) => {
            HttpResponse::NotFound().json(json!({
                "code": error_codes::INVALID_TOKEN,
                "message": "Verification link is invalid or has already been used",
                "status": "invalid",
            }))
        }
        Err(error) => handle_domain_error(error),
    }
}
