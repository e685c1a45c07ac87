//! Application factory
//!
//! Builds the Actix-web `App` from an [`AppState`]: route table, CORS,
//! request tracing, the bearer gate on protected routes and the JSON
//! error-body handlers for malformed input. The binary and the integration
//! tests both go through [`create_app`] so they exercise the same wiring.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::middleware::{create_cors, Authenticator, RequireAuth};
use crate::routes::auth::{
    me::me, resend::resend_verification, signin::signin, signout::signout, signup::signup,
    verify_email::verify_email,
};
use crate::routes::{chat, enrollments, flashcards, programs, AppState};

use gt_core::repositories::UserRepository;
use gt_core::services::email::EmailService;
use gt_infra::DatabasePool;
use gt_shared::{error_codes, ErrorResponse};

/// Create and configure the application with all dependencies
pub fn create_app<U, M>(
    app_state: web::Data<AppState<U, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    // The gate middleware talks to the auth service through an object-safe
    // seam so it does not need the state's type parameters.
    let authenticator: Arc<dyn Authenticator> = app_state.auth_service.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        // Malformed bodies, path segments and query strings get the same
        // {code, message} shape as every other error
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Add middleware (CORS runs before request tracing)
        .wrap(TracingLogger::default())
        .wrap(create_cors())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(signup::<U, M>))
                        .route("/signin", web::post().to(signin::<U, M>))
                        .route("/verify-email/{token}", web::get().to(verify_email::<U, M>))
                        .route(
                            "/resend-verification",
                            web::post().to(resend_verification::<U, M>),
                        )
                        .route("/me", web::get().to(me).wrap(RequireAuth))
                        .route("/signout", web::post().to(signout::<U, M>).wrap(RequireAuth)),
                )
                // Program catalogue (reads public, writes gated)
                .service(
                    web::scope("/programs")
                        .route("", web::get().to(programs::list_programs::<U, M>))
                        .route(
                            "",
                            web::post()
                                .to(programs::create_program::<U, M>)
                                .wrap(RequireAuth),
                        )
                        .route("/{id}", web::get().to(programs::get_program::<U, M>))
                        .route(
                            "/{id}",
                            web::put()
                                .to(programs::update_program::<U, M>)
                                .wrap(RequireAuth),
                        )
                        .route(
                            "/{id}",
                            web::delete()
                                .to(programs::delete_program::<U, M>)
                                .wrap(RequireAuth),
                        ),
                )
                // Enrollments (all gated; /me registered before /{id})
                .service(
                    web::scope("/enrollments")
                        .route(
                            "",
                            web::post().to(enrollments::enroll::<U, M>).wrap(RequireAuth),
                        )
                        .route(
                            "/me",
                            web::get()
                                .to(enrollments::my_enrollments::<U, M>)
                                .wrap(RequireAuth),
                        )
                        .route(
                            "/{id}",
                            web::patch()
                                .to(enrollments::update_enrollment::<U, M>)
                                .wrap(RequireAuth),
                        ),
                )
                // Flashcards (all gated)
                .service(
                    web::scope("/flashcards")
                        .route(
                            "",
                            web::post()
                                .to(flashcards::create_flashcard::<U, M>)
                                .wrap(RequireAuth),
                        )
                        .route(
                            "/due",
                            web::get()
                                .to(flashcards::due_flashcards::<U, M>)
                                .wrap(RequireAuth),
                        )
                        .route(
                            "/{id}/review",
                            web::post()
                                .to(flashcards::review_flashcard::<U, M>)
                                .wrap(RequireAuth),
                        ),
                )
                // Tutor chatbot (all gated)
                .service(
                    web::scope("/chat")
                        .route(
                            "/sessions",
                            web::post().to(chat::create_session::<U, M>).wrap(RequireAuth),
                        )
                        .route(
                            "/sessions",
                            web::get().to(chat::list_sessions::<U, M>).wrap(RequireAuth),
                        )
                        .route(
                            "/sessions/{id}/messages",
                            web::get().to(chat::list_messages::<U, M>).wrap(RequireAuth),
                        )
                        .route(
                            "/sessions/{id}/messages",
                            web::post().to(chat::append_message::<U, M>).wrap(RequireAuth),
                        )
                        .route(
                            "/sessions/{id}/stream",
                            web::post().to(chat::stream_chat::<U, M>).wrap(RequireAuth),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// The pool is registered separately by the binary; when it is absent (as
/// in handler tests) the database flag is simply false.
async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let database = match pool {
        Some(db) => db.health_check().await.unwrap_or(false),
        None => false,
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "growteens-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
