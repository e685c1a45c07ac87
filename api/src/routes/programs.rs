//! Program catalogue route handlers
//!
//! Listing and fetching are public; creating, updating and deleting sit
//! behind the request gate. Role checks are a frontend route-guard concern
//! and deliberately absent here.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::programs::{CreateProgramRequest, ProgramResponse, UpdateProgramRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

use gt_core::domain::entities::program::{Program, ProgramStatus};
use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_shared::validation::is_blank;
use gt_shared::{error_codes, ErrorResponse, PaginatedResponse, Pagination};

/// Handler for GET /api/v1/programs
///
/// Public catalogue listing with `limit`/`offset` pagination. Out-of-range
/// values are clamped rather than rejected.
pub async fn list_programs<U, M>(
    state: web::Data<AppState<U, M>>,
    query: web::Query<Pagination>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let pagination = query.into_inner().validate();

    match state.programs.list(pagination).await {
        Ok((programs, total)) => {
            let data: Vec<ProgramResponse> = programs.iter().map(ProgramResponse::from).collect();
            HttpResponse::Ok().json(PaginatedResponse::new(data, pagination, total))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/programs/{id}
///
/// Public single-program lookup. Unknown id yields 404 NOT_FOUND.
pub async fn get_program<U, M>(
    state: web::Data<AppState<U, M>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    match state.programs.find_by_id(path.into_inner()).await {
        Ok(Some(program)) => HttpResponse::Ok().json(ProgramResponse::from(&program)),
        Ok(None) => program_not_found(),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/programs (gated)
///
/// Creates a draft program.
///
/// # Request Body
///
/// ```json
/// {
///     "title": "Intro to Web Development",
///     "description": "HTML, CSS and a first taste of JavaScript",
///     "category": "digital-skills"
/// }
/// ```
///
/// ## Errors
/// - 400 VALIDATION_ERROR: blank title or title over 200 characters
pub async fn create_program<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<CreateProgramRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }
    if is_blank(&request.title) {
        return blank_title_response();
    }

    let request = request.into_inner();
    let program = Program::new(
        request.title.trim().to_string(),
        request.description.unwrap_or_default(),
        request.category.unwrap_or_default(),
    );

    match state.programs.create(program).await {
        Ok(created) => HttpResponse::Created().json(ProgramResponse::from(&created)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/programs/{id} (gated)
///
/// Applies the provided fields to an existing program; absent fields are
/// left untouched. An unknown `status` string is a validation error.
pub async fn update_program<U, M>(
    state: web::Data<AppState<U, M>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProgramRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let mut program = match state.programs.find_by_id(path.into_inner()).await {
        Ok(Some(program)) => program,
        Ok(None) => return program_not_found(),
        Err(error) => return handle_domain_error(error),
    };

    let request = request.into_inner();
    if let Some(title) = request.title {
        if is_blank(&title) {
            return blank_title_response();
        }
        program.title = title.trim().to_string();
    }
    if let Some(description) = request.description {
        program.description = description;
    }
    if let Some(category) = request.category {
        program.category = category;
    }
    if let Some(status) = request.status {
        match status.parse::<ProgramStatus>() {
            Ok(ProgramStatus::Published) => program.publish(),
            Ok(ProgramStatus::Archived) => program.archive(),
            Ok(ProgramStatus::Draft) => program.status = ProgramStatus::Draft,
            Err(_) => {
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    "status must be one of DRAFT, PUBLISHED, ARCHIVED",
                ))
            }
        }
    }

    match state.programs.update(program).await {
        Ok(updated) => HttpResponse::Ok().json(ProgramResponse::from(&updated)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/programs/{id} (gated)
pub async fn delete_program<U, M>(
    state: web::Data<AppState<U, M>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    match state.programs.delete(path.into_inner()).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => program_not_found(),
        Err(error) => handle_domain_error(error),
    }
}

fn program_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "Program not found",
    ))
}

fn blank_title_response() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "title must not be blank",
    ))
}
