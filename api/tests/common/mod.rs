//! Shared fixtures for the API integration tests
//!
//! Everything runs on the in-memory doubles from `gt_core`; no database or
//! network is involved. The relay client is built without credentials, so
//! the chat stream endpoint exercises its unavailable path.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use gt_api::AppState;
use gt_core::domain::entities::user::User;
use gt_core::repositories::{
    MockChatRepository, MockEnrollmentRepository, MockFlashcardRepository, MockProgramRepository,
    MockUserRepository, UserRepository,
};
use gt_core::services::auth::{AuthService, AuthServiceConfig, SignupData};
use gt_core::services::email::mock::MockEmailService;
use gt_core::services::token::{TokenService, TokenServiceConfig};
use gt_infra::ChatRelayClient;
use gt_shared::config::{ChatRelayConfig, SessionConfig};

/// Secret the test token service signs with
pub const TEST_SECRET: &str = "test-secret";

/// Password used by every fixture account
pub const TEST_PASSWORD: &str = "password123";

pub type TestAppState = AppState<MockUserRepository, MockEmailService>;

/// An app state plus handles on the doubles inside it
pub struct TestContext {
    pub state: web::Data<TestAppState>,
    pub auth: Arc<AuthService<MockUserRepository, MockEmailService>>,
    pub users: Arc<MockUserRepository>,
    pub emails: MockEmailService,
    pub programs: Arc<MockProgramRepository>,
    pub enrollments: Arc<MockEnrollmentRepository>,
    pub flashcards: Arc<MockFlashcardRepository>,
    pub chat: Arc<MockChatRepository>,
}

/// Build an app state backed entirely by in-memory doubles
pub fn test_context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let emails = MockEmailService::new();
    let programs = Arc::new(MockProgramRepository::new());
    let enrollments = Arc::new(MockEnrollmentRepository::new());
    let flashcards = Arc::new(MockFlashcardRepository::new());
    let chat = Arc::new(MockChatRepository::new());

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::with_secret(
        TEST_SECRET,
    )));
    let auth = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::new(emails.clone()),
        token_service,
        AuthServiceConfig {
            // Low cost keeps the hashing fast under test
            bcrypt_cost: 4,
            ..Default::default()
        },
    ));

    // No credentials: stream_chat reports unavailable instead of calling out
    let chat_relay = Arc::new(
        ChatRelayClient::new(ChatRelayConfig::default()).expect("relay client must build"),
    );

    let state = web::Data::new(AppState {
        auth_service: Arc::clone(&auth),
        session: SessionConfig::default(),
        programs: programs.clone(),
        enrollments: enrollments.clone(),
        flashcards: flashcards.clone(),
        chat: chat.clone(),
        chat_relay,
    });

    TestContext {
        state,
        auth,
        users,
        emails,
        programs,
        enrollments,
        flashcards,
        chat,
    }
}

fn signup_data(email: &str) -> SignupData {
    SignupData {
        first_name: Some("Amara".to_string()),
        last_name: Some("Okafor".to_string()),
        email: Some(email.to_string()),
        password: Some(TEST_PASSWORD.to_string()),
        role: Some("TEEN".to_string()),
        age: Some(16),
    }
}

/// Register an account through the real signup flow, leaving it unverified
pub async fn signup_user(ctx: &TestContext, email: &str) -> User {
    ctx.auth
        .signup(signup_data(email))
        .await
        .expect("fixture signup must succeed")
}

/// Register and verify an account
pub async fn verified_user(ctx: &TestContext, email: &str) -> User {
    let user = signup_user(ctx, email).await;

    let mut stored = ctx
        .users
        .find_by_id(user.id)
        .await
        .expect("mock lookup")
        .expect("fixture user must exist");
    stored.mark_verified();
    ctx.users.update(stored).await.expect("mock update")
}

/// Register, verify and sign in; returns the user and a bearer token
pub async fn signed_in_user(ctx: &TestContext, email: &str) -> (User, String) {
    let user = verified_user(ctx, email).await;
    let session = ctx
        .auth
        .signin(email, TEST_PASSWORD)
        .await
        .expect("fixture signin must succeed");
    (user, session.access_token)
}

/// The outstanding verification token stored for an account
pub async fn stored_verification_token(ctx: &TestContext, user_id: Uuid) -> String {
    ctx.users
        .find_by_id(user_id)
        .await
        .expect("mock lookup")
        .expect("fixture user must exist")
        .verification_token
        .expect("verification token must be outstanding")
}

/// Rewrite the issuance clock on a stored account, reopening or closing the
/// resend cooldown window
pub async fn set_token_issued_at(ctx: &TestContext, user_id: Uuid, issued_at: DateTime<Utc>) {
    let mut stored = ctx
        .users
        .find_by_id(user_id)
        .await
        .expect("mock lookup")
        .expect("fixture user must exist");
    stored.last_token_issued_at = Some(issued_at);
    ctx.users.update(stored).await.expect("mock update");
}

/// Let spawned email dispatch tasks finish before asserting on the outbox
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
}

/// Push the stored verification expiry into the past
pub async fn expire_verification_token(ctx: &TestContext, user_id: Uuid) {
    let mut stored = ctx
        .users
        .find_by_id(user_id)
        .await
        .expect("mock lookup")
        .expect("fixture user must exist");
    stored.verification_expires = Some(Utc::now() - chrono::Duration::minutes(1));
    ctx.users.update(stored).await.expect("mock update");
}
