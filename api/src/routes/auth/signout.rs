use actix_web::{web, HttpResponse};

use crate::dto::auth::MessageResponse;
use crate::routes::auth::signin::session_cookie;
use crate::routes::AppState;

use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;

/// Handler for POST /api/v1/auth/signout
///
/// Clears the session cookie. The bearer token itself is stateless and
/// simply ages out at its 24-hour expiry.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Signed out successfully"
/// }
/// ```
pub async fn signout<U, M>(state: web::Data<AppState<U, M>>) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let cleared = session_cookie(&state.session, "", 0);
    HttpResponse::Ok().cookie(cleared).json(MessageResponse {
        message: "Signed out successfully".to_string(),
    })
}
