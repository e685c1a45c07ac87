//! Flashcard route handlers
//!
//! All flashcard routes are gated and scoped to the current user. Another
//! user's card id behaves exactly like a missing one.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::dto::flashcards::{CreateFlashcardRequest, FlashcardResponse, ReviewFlashcardRequest};
use crate::handlers::error::handle_domain_error;
use crate::middleware::CurrentUser;
use crate::routes::AppState;

use gt_core::domain::entities::flashcard::Flashcard;
use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_shared::validation::is_blank;
use gt_shared::{error_codes, ErrorResponse};

/// Handler for POST /api/v1/flashcards
///
/// Creates a card due immediately with a one-day interval.
///
/// # Request Body
///
/// ```json
/// {
///     "front": "What does HTTP stand for?",
///     "back": "HyperText Transfer Protocol"
/// }
/// ```
///
/// ## Errors
/// - 400 VALIDATION_ERROR: blank front or back
pub async fn create_flashcard<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    request: web::Json<CreateFlashcardRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    if is_blank(&request.front) || is_blank(&request.back) {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            "front and back must not be blank",
        ));
    }

    let request = request.into_inner();
    let card = Flashcard::new(user.0.id, request.front, request.back);

    match state.flashcards.create(card).await {
        Ok(created) => HttpResponse::Created().json(FlashcardResponse::from(&created)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/flashcards/due
///
/// Lists the current user's cards with `due_at <= now`, most overdue first.
pub async fn due_flashcards<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    match state.flashcards.find_due_for_user(user.0.id, Utc::now()).await {
        Ok(cards) => {
            let data: Vec<FlashcardResponse> = cards.iter().map(FlashcardResponse::from).collect();
            HttpResponse::Ok().json(data)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/flashcards/{id}/review
///
/// Records a review outcome and reschedules the card: remembered doubles
/// the interval, forgotten resets it to one day.
///
/// # Request Body
///
/// ```json
/// {
///     "remembered": true
/// }
/// ```
///
/// ## Errors
/// - 404 NOT_FOUND: no such card, or it belongs to someone else
pub async fn review_flashcard<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    request: web::Json<ReviewFlashcardRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let mut card = match state.flashcards.find_by_id(path.into_inner()).await {
        Ok(Some(card)) if card.user_id == user.0.id => card,
        Ok(_) => {
            return HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "Flashcard not found",
            ))
        }
        Err(error) => return handle_domain_error(error),
    };

    card.review(request.remembered);

    match state.flashcards.update(card).await {
        Ok(updated) => HttpResponse::Ok().json(FlashcardResponse::from(&updated)),
        Err(error) => handle_domain_error(error),
    }
}
