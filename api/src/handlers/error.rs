//! Mapping from domain errors to HTTP responses
//!
//! Every handler funnels its failure path through [`handle_domain_error`] so
//! the `{code, message}` wire contract lives in exactly one place. The `code`
//! strings come from `gt_shared::error_codes` and are part of the frontend
//! contract.

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{debug, error};

use gt_core::errors::{AuthError, DomainError, ValidationError};
use gt_shared::{error_codes, ErrorResponse};

/// Convert a domain error into the HTTP response the frontend branches on
///
/// Internal failures (database, hashing, task join) collapse to a generic
/// 503; their details are logged here and never echoed to clients.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    debug!(error = ?error, "request failed");

    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(_) => unauthorized_response(),
        DomainError::ValidationErr(validation_error) => match validation_error {
            ValidationError::RequiredField { field } => HttpResponse::BadRequest().json(
                ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    format!("Required field: {}", field),
                ),
            ),
            ValidationError::InvalidFormat { field } => HttpResponse::BadRequest().json(
                ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    format!("Invalid value for field: {}", field),
                ),
            ),
        },
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                message,
            ))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Duplicate { resource } => HttpResponse::Conflict().json(
            ErrorResponse::new(error_codes::DUPLICATE, format!("{} already exists", resource)),
        ),
        DomainError::Unauthorized => unauthorized_response(),
        DomainError::Internal { message } => {
            error!(message = %message, "internal error");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable, please try again later",
            ))
        }
    }
}

fn handle_auth_error(error: AuthError) -> HttpResponse {
    match error {
        AuthError::MissingFields => HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::MISSING_FIELDS,
            "Required fields are missing or blank",
        )),
        AuthError::InvalidEmail => HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::INVALID_EMAIL,
            "Email address is not valid",
        )),
        AuthError::WeakPassword { min_length } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::WEAK_PASSWORD,
                format!("Password must be at least {} characters", min_length),
            ))
        }
        AuthError::EmailExists => HttpResponse::Conflict().json(ErrorResponse::new(
            error_codes::EMAIL_EXISTS,
            "An account with this email already exists",
        )),
        AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::INVALID_CREDENTIALS,
            "Invalid email or password",
        )),
        AuthError::EmailNotVerified { email } => HttpResponse::Forbidden().json(
            ErrorResponse::new(
                error_codes::EMAIL_NOT_VERIFIED,
                "Please verify your email address before signing in",
            )
            .add_detail("email", email),
        ),
        AuthError::VerificationTokenExpired { email } => HttpResponse::Gone().json(
            ErrorResponse::new(
                error_codes::TOKEN_EXPIRED,
                "Verification link has expired, request a new one",
            )
            .add_detail("email", email),
        ),
        AuthError::VerificationTokenInvalid => HttpResponse::NotFound().json(
            ErrorResponse::new(error_codes::INVALID_TOKEN, "Verification link is invalid"),
        ),
        AuthError::AlreadyVerified => HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::ALREADY_VERIFIED,
            "Email address is already verified",
        )),
        AuthError::ResendCooldown {
            retry_after_seconds,
        } => HttpResponse::TooManyRequests().json(
            ErrorResponse::new(
                error_codes::RATE_LIMITED,
                format!(
                    "Please wait {} seconds before requesting another email",
                    retry_after_seconds
                ),
            )
            .add_detail("retryAfter", retry_after_seconds),
        ),
        AuthError::EmailDispatchFailed => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Verification email could not be sent, please try again later",
            ),
        ),
    }
}

/// The uniform gate failure: one body for every authentication problem
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        "Authentication required",
    ))
}

/// Flatten `validator` derive failures into a 400 with per-field details
pub fn handle_validation_errors(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request data is invalid");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// Replaces Actix's plain-text 400 for unparseable JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Request body is missing or malformed",
    ));
    InternalError::from_response(err, response).into()
}

/// Replaces Actix's plain-text 400 for unparseable path segments (bad UUIDs)
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Request path is invalid",
    ));
    InternalError::from_response(err, response).into()
}

/// Replaces Actix's plain-text 400 for unparseable query strings
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Query parameters are invalid",
    ));
    InternalError::from_response(err, response).into()
}
