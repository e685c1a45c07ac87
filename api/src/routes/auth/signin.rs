use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::dto::auth::{SigninRequest, SigninResponse, UserResponse};
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_shared::config::SessionConfig;

/// Handler for POST /api/v1/auth/signin
///
/// Verifies credentials and issues a 24-hour bearer token. The token is
/// returned in the body and also set as an HTTP-only cookie so the
/// frontend's server side can forward it.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ada@example.com",
///     "password": "correct-horse"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user": { "id": "...", "email": "ada@example.com", "role": "TEEN" },
///     "accessToken": "eyJhbGciOi...",
///     "message": "Signed in successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 INVALID_CREDENTIALS: unknown email or wrong password, indistinguishable
/// - 403 EMAIL_NOT_VERIFIED: correct password on an unverified account
pub async fn signin<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<SigninRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let email = request.email.as_deref().unwrap_or("");
    let password = request.password.as_deref().unwrap_or("");

    match state.auth_service.signin(email, password).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "user signed in");
            let cookie = session_cookie(&state.session, &session.access_token, session.expires_in);
            HttpResponse::Ok().cookie(cookie).json(SigninResponse {
                user: UserResponse::from(&session.user),
                access_token: session.access_token,
                message: "Signed in successfully".to_string(),
            })
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Builds the session cookie from the configured attributes
///
/// Signout reuses this with an empty value and zero max-age to clear it.
pub(crate) fn session_cookie(
    config: &SessionConfig,
    value: &str,
    max_age_seconds: i64,
) -> Cookie<'static> {
    let same_site = match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    };

    Cookie::build(config.cookie_name.clone(), value.to_string())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}
