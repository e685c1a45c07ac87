//! Main authentication service implementation

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use gt_shared::validation::{is_blank, is_valid_email, mask_email};

use crate::domain::entities::user::{User, UserRole};
use crate::domain::entities::verification::{cooldown_remaining, VerificationToken};
use crate::domain::value_objects::{AuthSession, VerifiedAccount};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::email::EmailService;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::emails::verification_email;

/// Raw signup fields as received from the API layer
///
/// Fields arrive optional so that presence checks happen here, in one place,
/// rather than in the transport's deserializer.
#[derive(Debug, Clone, Default)]
pub struct SignupData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub age: Option<i32>,
}

/// Authentication service for managing the complete authentication flow
pub struct AuthService<U, M>
where
    U: UserRepository,
    M: EmailService + 'static,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Email sender for verification messages
    email_service: Arc<M>,
    /// Token service for session JWTs
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, M> AuthService<U, M>
where
    U: UserRepository,
    M: EmailService + 'static,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `email_service` - Sender for verification emails
    /// * `token_service` - Service for session token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        email_service: Arc<M>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            email_service,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Checks all required fields are present and non-blank
    /// 2. Normalizes and validates the email shape
    /// 3. Enforces the minimum password length
    /// 4. Parses the requested role
    /// 5. Hashes the password and issues a verification token
    /// 6. Inserts the user; a storage unique violation becomes `EMAIL_EXISTS`
    /// 7. Dispatches the verification email on a background task
    ///
    /// No user record is created on any validation failure.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw signup fields from the request body
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created, unverified user
    /// * `Err(DomainError)` - Validation failed or the email is taken
    pub async fn signup(&self, data: SignupData) -> DomainResult<User> {
        // Step 1: Presence checks; role is required, age is not
        let first_name = required(data.first_name)?;
        let last_name = required(data.last_name)?;
        let raw_email = required(data.email)?;
        let password = required(data.password)?;
        let raw_role = required(data.role)?;

        // Step 2: Normalize and validate the email shape
        let email = normalize_email(&raw_email);
        if !is_valid_email(&email) {
            return Err(DomainError::Auth(AuthError::InvalidEmail));
        }

        // Step 3: Minimum password length
        if password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Auth(AuthError::WeakPassword {
                min_length: self.config.min_password_length,
            }));
        }

        // Step 4: Parse the role
        let role = UserRole::from_str(raw_role.trim()).map_err(|_| {
            DomainError::ValidationErr(ValidationError::InvalidFormat {
                field: "role".to_string(),
            })
        })?;

        // Step 5: Hash the password off the async worker
        let password_hash = self.hash_password(password).await?;

        let mut user = User::new(email, password_hash, first_name, last_name, role, data.age);
        let token = VerificationToken::issue();
        user.apply_verification_token(&token);

        // Step 6: Insert; the unique index on email is the sole duplicate check
        let user = self
            .user_repository
            .create(user)
            .await
            .map_err(|e| match e {
                DomainError::Duplicate { .. } => DomainError::Auth(AuthError::EmailExists),
                other => other,
            })?;

        info!(user_id = %user.id, email = %mask_email(&user.email), "user signed up");

        // Step 7: Fire-and-forget email dispatch; a failure is logged, never
        // surfaced to this caller
        let message =
            verification_email(&self.config.frontend_base_url, &user.email, &token.token);
        let sender = Arc::clone(&self.email_service);
        let recipient = mask_email(&user.email);
        tokio::spawn(async move {
            if let Err(e) = sender.send(&message).await {
                error!(recipient = %recipient, error = %e, "verification email dispatch failed");
            }
        });

        Ok(user)
    }

    /// Verify an email address with a token from the emailed link
    ///
    /// This method:
    /// 1. Looks up the user holding the token
    /// 2. Checks expiry in the domain; expired and unknown tokens fail
    ///    differently so clients can offer a resend
    /// 3. Marks the user verified and clears the token pair
    ///
    /// Verification happens exactly once per token: success clears the token,
    /// so replaying it reports an invalid token.
    ///
    /// # Arguments
    ///
    /// * `token` - The hex token from the verification link
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedAccount)` - The user is now verified
    /// * `Err(DomainError)` - Token unknown or expired
    pub async fn verify_email(&self, token: &str) -> DomainResult<VerifiedAccount> {
        // Step 1: Look up the token holder
        if is_blank(token) {
            return Err(DomainError::Auth(AuthError::VerificationTokenInvalid));
        }

        let mut user = self
            .user_repository
            .find_by_verification_token(token)
            .await?
            .ok_or(DomainError::Auth(AuthError::VerificationTokenInvalid))?;

        // Step 2: Expired tokens are a dead end requiring a fresh resend
        if user.verification_expired(Utc::now()) {
            return Err(DomainError::Auth(AuthError::VerificationTokenExpired {
                email: user.email,
            }));
        }

        // Step 3: Flip to verified and clear the token pair
        user.mark_verified();
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "email verified");

        Ok(VerifiedAccount {
            user_id: user.id,
            email: user.email,
        })
    }

    /// Re-issue a verification token and resend the email
    ///
    /// This method:
    /// 1. Validates the email shape
    /// 2. Treats unknown addresses as success to avoid leaking which emails
    ///    are registered
    /// 3. Rejects accounts that are already verified
    /// 4. Enforces the two-minute cooldown since the last issuance
    /// 5. Overwrites the outstanding token, invalidating any in-flight link
    /// 6. Sends the email; unlike signup, a dispatch failure is surfaced
    ///
    /// # Arguments
    ///
    /// * `email` - Address to resend to
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Email sent, or the address is unknown
    /// * `Err(DomainError)` - Already verified, cooling down, or send failed
    pub async fn resend_verification(&self, email: &str) -> DomainResult<()> {
        // Step 1: Validate input
        if is_blank(email) {
            return Err(DomainError::Auth(AuthError::MissingFields));
        }
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Auth(AuthError::InvalidEmail));
        }

        // Step 2: Unknown email gets the same generic success as a real send
        let mut user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!(email = %mask_email(&email), "resend requested for unknown email");
                return Ok(());
            }
        };

        // Step 3: Verified accounts have nothing to resend
        if user.email_verified {
            return Err(DomainError::Auth(AuthError::AlreadyVerified));
        }

        // Step 4: Cooldown since the last issuance, not since expiry
        let now = Utc::now();
        if let Some(retry_after_seconds) = cooldown_remaining(user.last_token_issued_at, now) {
            return Err(DomainError::Auth(AuthError::ResendCooldown {
                retry_after_seconds,
            }));
        }

        // Step 5: Overwrite the outstanding token
        let token = VerificationToken::issue();
        user.apply_verification_token(&token);
        let user = self.user_repository.update(user).await?;

        // Step 6: Send synchronously; the caller hears about a failure here
        let message =
            verification_email(&self.config.frontend_base_url, &user.email, &token.token);
        self.email_service.send(&message).await.map_err(|e| {
            error!(email = %mask_email(&user.email), error = %e, "resend dispatch failed");
            DomainError::Auth(AuthError::EmailDispatchFailed)
        })?;

        info!(user_id = %user.id, "verification email resent");

        Ok(())
    }

    /// Authenticate with email and password, issuing a session token
    ///
    /// This method:
    /// 1. Checks both fields are present
    /// 2. Looks up the user; unknown email and wrong password fail with the
    ///    same error
    /// 3. Verifies the password hash off the async worker
    /// 4. Rejects unverified accounts, naming the email so the client can
    ///    offer a resend
    /// 5. Records the login and signs a 24-hour session token
    ///
    /// # Arguments
    ///
    /// * `email` - Account email
    /// * `password` - Account password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - Token plus the authenticated user
    /// * `Err(DomainError)` - Credentials rejected or account unverified
    pub async fn signin(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        // Step 1: Presence checks
        if is_blank(email) || is_blank(password) {
            return Err(DomainError::Auth(AuthError::MissingFields));
        }

        // Step 2: Same failure for unknown email and wrong password
        let email = normalize_email(email);
        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        // Step 3: Verify the password
        let matches = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        // Step 4: Correct password on an unverified account is its own error
        if !user.email_verified {
            return Err(DomainError::Auth(AuthError::EmailNotVerified {
                email: user.email,
            }));
        }

        // Step 5: Record the login and issue the session token
        user.record_login();
        let user = self.user_repository.update(user).await?;

        let access_token = self.token_service.generate_session_token(user.id)?;

        info!(user_id = %user.id, "user signed in");

        Ok(AuthSession::new(user, access_token))
    }

    /// Resolve a bearer token to its user
    ///
    /// The user is loaded fresh from storage on every call; there is no
    /// session cache to go stale.
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token from the `Authorization` header
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The authenticated user
    /// * `Err(DomainError)` - Token rejected or user gone
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = self.token_service.verify_session_token(token)?;

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    /// Hashes a password on the blocking pool
    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    /// Verifies a password against its hash on the blocking pool
    async fn verify_password(&self, password: String, hash: String) -> DomainResult<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            })
    }
}

/// Rejects absent or blank required fields
fn required(field: Option<String>) -> Result<String, DomainError> {
    match field {
        Some(value) if !is_blank(&value) => Ok(value),
        _ => Err(DomainError::Auth(AuthError::MissingFields)),
    }
}

/// Trims surrounding whitespace and lowercases the address
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
