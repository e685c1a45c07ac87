use actix_web::HttpResponse;

use crate::dto::auth::UserResponse;
use crate::middleware::CurrentUser;

/// Handler for GET /api/v1/auth/me
///
/// Returns the sanitized current user. The request gate has already
/// verified the bearer token and loaded the account, so this handler only
/// reshapes what the extractor carries.
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
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "email": "ada@example.com",
///     "firstName": "Ada",
///     "lastName": "Obi",
///     "role": "TEEN",
///     "emailVerified": true
/// }
/// ```
pub async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(&user.0))
}
