//! Unit tests for authentication service

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification::{
    VerificationToken, RESEND_COOLDOWN_SECONDS, VERIFICATION_TOKEN_TTL_MINUTES,
};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::user::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, SignupData};
use crate::services::email::mock::MockEmailService;
use crate::services::token::{TokenService, TokenServiceConfig};

type TestAuthService = AuthService<MockUserRepository, MockEmailService>;

fn build_service(
    repo: Arc<MockUserRepository>,
    email: Arc<MockEmailService>,
) -> TestAuthService {
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::with_secret(
        "test-secret",
    )));
    let config = AuthServiceConfig {
        // Low cost keeps the hashing fast under test
        bcrypt_cost: 4,
        ..Default::default()
    };
    AuthService::new(repo, email, token_service, config)
}

fn valid_signup() -> SignupData {
    SignupData {
        first_name: Some("Amara".to_string()),
        last_name: Some("Okafor".to_string()),
        email: Some("amara@example.com".to_string()),
        password: Some("password123".to_string()),
        role: Some("TEEN".to_string()),
        age: Some(16),
    }
}

/// Waits for fire-and-forget tasks spawned by signup to settle
async fn settle() {
    tokio::time::sleep(StdDuration::from_millis(50)).await;
}

async fn signup_verified_user(
    service: &TestAuthService,
    repo: &MockUserRepository,
    email: &str,
    password: &str,
) -> User {
    let mut data = valid_signup();
    data.email = Some(email.to_string());
    data.password = Some(password.to_string());
    let user = service.signup(data).await.unwrap();

    let mut stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    stored.mark_verified();
    repo.update(stored).await.unwrap()
}

// ---- signup ----

#[tokio::test]
async fn test_signup_creates_unverified_user_with_fresh_token() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let user = service.signup(valid_signup()).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!stored.email_verified);

    let token = stored.verification_token.expect("token must be set");
    assert_eq!(token.len(), 64);

    let issued_at = stored.last_token_issued_at.expect("issuance must be set");
    let expires = stored.verification_expires.expect("expiry must be set");
    assert_eq!(
        expires - issued_at,
        Duration::minutes(VERIFICATION_TOKEN_TTL_MINUTES)
    );
}

#[tokio::test]
async fn test_signup_dispatches_verification_email() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let user = service.signup(valid_signup()).await.unwrap();
    settle().await;

    assert_eq!(email.sent_count().await, 1);
    let message = email.last_message().await.unwrap();
    assert_eq!(message.to, "amara@example.com");

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(message
        .text
        .contains(stored.verification_token.as_deref().unwrap()));
}

#[tokio::test]
async fn test_signup_email_failure_does_not_fail_the_call() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::failing());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let result = service.signup(valid_signup()).await;
    settle().await;

    assert!(result.is_ok());
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    for missing in ["first_name", "last_name", "email", "password", "role"] {
        let mut data = valid_signup();
        match missing {
            "first_name" => data.first_name = None,
            "last_name" => data.last_name = Some("   ".to_string()),
            "email" => data.email = None,
            "password" => data.password = Some(String::new()),
            "role" => data.role = None,
            _ => unreachable!(),
        }

        let result = service.signup(data).await;
        assert!(
            matches!(
                result.unwrap_err(),
                DomainError::Auth(AuthError::MissingFields)
            ),
            "field: {}",
            missing
        );
    }

    assert_eq!(repo.count().await, 0);
}

#[tokio::test]
async fn test_signup_invalid_email_shape() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut data = valid_signup();
    data.email = Some("not-an-email".to_string());

    let result = service.signup(data).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::InvalidEmail)
    ));
    assert_eq!(repo.count().await, 0);
}

#[tokio::test]
async fn test_signup_short_password_creates_no_record() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut data = valid_signup();
    data.password = Some("short".to_string());

    let result = service.signup(data).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::WeakPassword { min_length: 8 })
    ));
    assert_eq!(repo.count().await, 0);
}

#[tokio::test]
async fn test_signup_unknown_role() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut data = valid_signup();
    data.role = Some("student".to_string());

    let result = service.signup(data).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ValidationErr(ValidationError::InvalidFormat { field }) if field == "role"
    ));
}

#[tokio::test]
async fn test_signup_duplicate_email_leaves_one_record() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    service.signup(valid_signup()).await.unwrap();
    let result = service.signup(valid_signup()).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailExists)
    ));
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_signup_normalizes_email() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut data = valid_signup();
    data.email = Some("  AMARA@Example.COM ".to_string());

    let user = service.signup(data).await.unwrap();
    assert_eq!(user.email, "amara@example.com");
}

// ---- verify email ----

#[tokio::test]
async fn test_verify_email_flips_flag_and_clears_token() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let user = service.signup(valid_signup()).await.unwrap();
    let token = repo
        .find_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .verification_token
        .unwrap();

    let verified = service.verify_email(&token).await.unwrap();
    assert_eq!(verified.user_id, user.id);
    assert_eq!(verified.email, "amara@example.com");

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.email_verified);
    assert!(stored.verification_token.is_none());
    assert!(stored.verification_expires.is_none());
}

#[tokio::test]
async fn test_verify_email_replay_reports_invalid() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let user = service.signup(valid_signup()).await.unwrap();
    let token = repo
        .find_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .verification_token
        .unwrap();

    service.verify_email(&token).await.unwrap();
    let replay = service.verify_email(&token).await;

    assert!(matches!(
        replay.unwrap_err(),
        DomainError::Auth(AuthError::VerificationTokenInvalid)
    ));
}

#[tokio::test]
async fn test_verify_email_expired_token_names_the_email() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut user = User::new(
        "stale@example.com".to_string(),
        "$2b$04$somehash".to_string(),
        "Kofi".to_string(),
        "Mensah".to_string(),
        "TEEN".parse().unwrap(),
        None,
    );
    let token = VerificationToken::issue_at(Utc::now() - Duration::minutes(11));
    user.apply_verification_token(&token);
    repo.create(user).await.unwrap();

    let result = service.verify_email(&token.token).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::VerificationTokenExpired { email }) if email == "stale@example.com"
    ));
}

#[tokio::test]
async fn test_verify_email_unknown_token() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let result = service.verify_email("0123456789abcdef").await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::VerificationTokenInvalid)
    ));
}

// ---- resend verification ----

#[tokio::test]
async fn test_resend_unknown_email_reports_success() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let result = service.resend_verification("nobody@example.com").await;

    assert!(result.is_ok());
    assert_eq!(email.sent_count().await, 0);
}

#[tokio::test]
async fn test_resend_already_verified() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    signup_verified_user(&service, &repo, "done@example.com", "password123").await;

    let result = service.resend_verification("done@example.com").await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::AlreadyVerified)
    ));
}

#[tokio::test]
async fn test_resend_within_cooldown_reports_retry_after() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    // Signup just issued a token, so the cooldown window is fully open
    service.signup(valid_signup()).await.unwrap();

    let result = service.resend_verification("amara@example.com").await;
    match result.unwrap_err() {
        DomainError::Auth(AuthError::ResendCooldown {
            retry_after_seconds,
        }) => {
            assert!((1..=RESEND_COOLDOWN_SECONDS).contains(&retry_after_seconds));
        }
        other => panic!("expected cooldown, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resend_after_cooldown_overwrites_token() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut user = User::new(
        "waiting@example.com".to_string(),
        "$2b$04$somehash".to_string(),
        "Zara".to_string(),
        "Bello".to_string(),
        "TEEN".parse().unwrap(),
        None,
    );
    let old_token = VerificationToken::issue_at(Utc::now() - Duration::minutes(3));
    user.apply_verification_token(&old_token);
    repo.create(user.clone()).await.unwrap();

    service
        .resend_verification("waiting@example.com")
        .await
        .unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    let new_token = stored.verification_token.unwrap();
    assert_ne!(new_token, old_token.token);

    assert_eq!(email.sent_count().await, 1);
    let message = email.last_message().await.unwrap();
    assert!(message.text.contains(&new_token));
}

#[tokio::test]
async fn test_resend_dispatch_failure_is_surfaced() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::failing());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let mut user = User::new(
        "unlucky@example.com".to_string(),
        "$2b$04$somehash".to_string(),
        "Femi".to_string(),
        "Ade".to_string(),
        "TEEN".parse().unwrap(),
        None,
    );
    let old_token = VerificationToken::issue_at(Utc::now() - Duration::minutes(5));
    user.apply_verification_token(&old_token);
    repo.create(user).await.unwrap();

    let result = service.resend_verification("unlucky@example.com").await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailDispatchFailed)
    ));
}

// ---- signin ----

#[tokio::test]
async fn test_signin_success_issues_token_and_records_login() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let user =
        signup_verified_user(&service, &repo, "login@example.com", "password123").await;

    let session = service.signin("login@example.com", "password123").await.unwrap();

    assert_eq!(session.user.id, user.id);
    assert_eq!(session.expires_in, 86400);

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.last_active.is_some());

    // The issued token resolves back to the same user
    let authed = service.authenticate(&session.access_token).await.unwrap();
    assert_eq!(authed.id, user.id);
}

#[tokio::test]
async fn test_signin_unknown_email_and_wrong_password_look_identical() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    signup_verified_user(&service, &repo, "real@example.com", "password123").await;

    let unknown = service
        .signin("ghost@example.com", "password123")
        .await
        .unwrap_err();
    let wrong = service
        .signin("real@example.com", "wrongpassword")
        .await
        .unwrap_err();

    assert!(matches!(
        unknown,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        wrong,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_signin_unverified_account_rejected_with_email() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    service.signup(valid_signup()).await.unwrap();

    let result = service.signin("amara@example.com", "password123").await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailNotVerified { email }) if email == "amara@example.com"
    ));
}

#[tokio::test]
async fn test_signin_blank_fields() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    let result = service.signin("", "password123").await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::MissingFields)
    ));
}

#[tokio::test]
async fn test_signin_accepts_differently_cased_email() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    signup_verified_user(&service, &repo, "case@example.com", "password123").await;

    let session = service.signin(" Case@Example.Com ", "password123").await;
    assert!(session.is_ok());
}

// ---- authenticate ----

#[tokio::test]
async fn test_authenticate_rejects_garbage_token() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    assert!(service.authenticate("nonsense").await.is_err());
}

#[tokio::test]
async fn test_authenticate_rejects_token_for_unknown_user() {
    let repo = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailService::new());
    let service = build_service(Arc::clone(&repo), Arc::clone(&email));

    // Signed with the same secret, but the subject was never stored
    let foreign_signer = TokenService::new(TokenServiceConfig::with_secret("test-secret"));
    let token = foreign_signer.generate_session_token(Uuid::new_v4()).unwrap();

    let result = service.authenticate(&token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}
