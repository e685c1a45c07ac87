use actix_web::{web, HttpResponse};

use crate::dto::auth::{MessageResponse, ResendVerificationRequest};
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;

/// Handler for POST /api/v1/auth/resend-verification
///
/// Issues a fresh verification token and re-sends the email. Unknown
/// addresses get the same generic success as a real send so the endpoint
/// cannot be used to enumerate accounts.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ada@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "If that address has an unverified account, a new verification email is on its way"
/// }
/// ```
///
/// ## Errors
/// - 400 ALREADY_VERIFIED: the account needs no verification
/// - 429 RATE_LIMITED: inside the two-minute cooldown, `retryAfter` in details
/// - 503 SERVICE_UNAVAILABLE: the email could not be dispatched
pub async fn resend_verification<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<ResendVerificationRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let email = request.email.as_deref().unwrap_or("");

    match state.auth_service.resend_verification(email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message:
                "If that address has an unverified account, a new verification email is on its way"
                    .to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
