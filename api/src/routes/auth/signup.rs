use actix_web::{web, HttpResponse};
use tracing::info;

use crate::dto::auth::{SignupRequest, SignupResponse};
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_shared::validation::mask_email;

/// Handler for POST /api/v1/auth/signup
///
/// Creates an unverified account and dispatches the verification email.
///
/// # Request Body
///
/// ```json
/// {
///     "firstName": "Ada",
///     "lastName": "Obi",
///     "email": "ada@example.com",
///     "password": "correct-horse",
///     "role": "TEEN",
///     "age": 16
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "message": "Account created. Check your email to verify your address.",
///     "userId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 MISSING_FIELDS / INVALID_EMAIL / WEAK_PASSWORD
/// - 409 EMAIL_EXISTS: the address is already registered
pub async fn signup<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    match state.auth_service.signup(request.into_inner().into()).await {
        Ok(user) => {
            info!(
                user_id = %user.id,
                email = %mask_email(&user.email),
                "account created, verification pending"
            );
            HttpResponse::Created().json(SignupResponse {
                message: "Account created. Check your email to verify your address.".to_string(),
                user_id: user.id,
            })
        }
        Err(error) => handle_domain_error(error),
    }
}
