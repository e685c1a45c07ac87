use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gt_api::{create_app, AppState};
use gt_core::services::auth::{AuthService, AuthServiceConfig};
use gt_core::services::token::{TokenService, TokenServiceConfig};
use gt_infra::database::mysql::{
    MySqlChatRepository, MySqlEnrollmentRepository, MySqlFlashcardRepository,
    MySqlProgramRepository, MySqlUserRepository,
};
use gt_infra::{create_email_sender, ChatRelayClient, DatabasePool};
use gt_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing from RUST_LOG, defaulting to info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting GrowTeens API server");

    // Load configuration
    let config = AppConfig::from_env();

    if config.auth.jwt.is_using_default_secret() && !config.environment.is_development() {
        anyhow::bail!("JWT_SECRET must be changed from its default outside development");
    }

    // Exactly one pool per process: created here, shared by every
    // repository, closed after the server future resolves
    let db = DatabasePool::new(&config.database).await?;
    db.run_migrations().await?;
    info!("Database ready. {}", db.get_statistics());

    let pool = db.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let programs = Arc::new(MySqlProgramRepository::new(pool.clone()));
    let enrollments = Arc::new(MySqlEnrollmentRepository::new(pool.clone()));
    let flashcards = Arc::new(MySqlFlashcardRepository::new(pool.clone()));
    let chat = Arc::new(MySqlChatRepository::new(pool));

    // Outbound collaborators
    let email_sender = Arc::new(create_email_sender(&config.email, config.environment)?);
    let chat_relay = Arc::new(ChatRelayClient::new(config.chat.clone())?);
    if !chat_relay.is_configured() {
        info!("Chat relay credentials absent; the stream endpoint will answer 503");
    }

    // Domain services
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::with_secret(
        config.auth.jwt_secret(),
    )));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        email_sender,
        token_service,
        AuthServiceConfig {
            frontend_base_url: config.frontend_base_url.clone(),
            ..AuthServiceConfig::default()
        },
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        session: config.auth.session.clone(),
        programs,
        enrollments,
        flashcards,
        chat,
        chat_relay,
    });

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    let pool_handle = db.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone())
            // The health probe reads the pool through its own app data slot
            .app_data(web::Data::new(pool_handle.clone()))
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive))
    .shutdown_timeout(config.server.shutdown_timeout)
    .bind(&bind_address)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    db.close().await;
    Ok(())
}
