//! Enrollment route handlers
//!
//! All enrollment routes are gated. A caller can only see and modify their
//! own enrollments; anyone else's id behaves exactly like a missing one so
//! enrollment ids cannot be probed.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::enrollments::{EnrollRequest, EnrollmentResponse, UpdateEnrollmentRequest};
use crate::handlers::error::handle_domain_error;
use crate::middleware::CurrentUser;
use crate::routes::AppState;

use gt_core::domain::entities::enrollment::{Enrollment, EnrollmentStatus};
use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_shared::{error_codes, ErrorResponse};

/// Handler for POST /api/v1/enrollments
///
/// Enrolls the current user in a program.
///
/// # Request Body
///
/// ```json
/// {
///     "programId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 404 NOT_FOUND: the program does not exist
/// - 409 DUPLICATE: the user is already enrolled in the program
pub async fn enroll<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    request: web::Json<EnrollRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let program_id = request.program_id;

    match state.programs.find_by_id(program_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "Program not found",
            ))
        }
        Err(error) => return handle_domain_error(error),
    }

    let enrollment = Enrollment::new(user.0.id, program_id);
    match state.enrollments.create(enrollment).await {
        Ok(created) => HttpResponse::Created().json(EnrollmentResponse::from(&created)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/enrollments/me
///
/// Lists the current user's enrollments, newest first.
pub async fn my_enrollments<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    match state.enrollments.find_by_user(user.0.id).await {
        Ok(enrollments) => {
            let data: Vec<EnrollmentResponse> =
                enrollments.iter().map(EnrollmentResponse::from).collect();
            HttpResponse::Ok().json(data)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /api/v1/enrollments/{id}
///
/// Updates status and/or progress on one of the caller's enrollments.
/// Progress is clamped to 0..=100 and reaching 100 completes the
/// enrollment; an explicit COMPLETED status stamps `completed_at` too.
///
/// # Request Body
///
/// ```json
/// {
///     "status": "COMPLETED",
///     "progressPercent": 100
/// }
/// ```
///
/// ## Errors
/// - 400 VALIDATION_ERROR: unknown status string
/// - 404 NOT_FOUND: no such enrollment, or it belongs to someone else
pub async fn update_enrollment<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateEnrollmentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let mut enrollment = match state.enrollments.find_by_id(path.into_inner()).await {
        Ok(Some(enrollment)) if enrollment.user_id == user.0.id => enrollment,
        Ok(_) => {
            return HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "Enrollment not found",
            ))
        }
        Err(error) => return handle_domain_error(error),
    };

    let request = request.into_inner();
    if let Some(percent) = request.progress_percent {
        enrollment.update_progress(percent);
    }
    if let Some(status) = request.status {
        match status.parse::<EnrollmentStatus>() {
            Ok(EnrollmentStatus::Active) => enrollment.status = EnrollmentStatus::Active,
            Ok(EnrollmentStatus::Completed) => enrollment.complete(),
            Ok(EnrollmentStatus::Dropped) => enrollment.drop_out(),
            Err(_) => {
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    "status must be one of ACTIVE, COMPLETED, DROPPED",
                ))
            }
        }
    }

    match state.enrollments.update(enrollment).await {
        Ok(updated) => HttpResponse::Ok().json(EnrollmentResponse::from(&updated)),
        Err(error) => handle_domain_error(error),
    }
}
