//! Route handlers grouped by resource
//!
//! Each submodule owns the handlers for one URL prefix under `/api/v1`.
//! All handlers share [`AppState`], which is generic over the user
//! repository and email sender so tests can run entirely on in-memory
//! doubles while the binary plugs in MySQL and SMTP.

pub mod auth;
pub mod chat;
pub mod enrollments;
pub mod flashcards;
pub mod programs;

use std::sync::Arc;

use gt_core::repositories::{
    ChatRepository, EnrollmentRepository, FlashcardRepository, ProgramRepository, UserRepository,
};
use gt_core::services::auth::AuthService;
use gt_core::services::email::EmailService;
use gt_infra::chat::ChatRelayClient;
use gt_shared::config::SessionConfig;

/// Application state that holds shared services and repositories
pub struct AppState<U, M>
where
    U: UserRepository,
    M: EmailService + 'static,
{
    pub auth_service: Arc<AuthService<U, M>>,
    pub session: SessionConfig,
    pub programs: Arc<dyn ProgramRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub flashcards: Arc<dyn FlashcardRepository>,
    pub chat: Arc<dyn ChatRepository>,
    pub chat_relay: Arc<ChatRelayClient>,
}
