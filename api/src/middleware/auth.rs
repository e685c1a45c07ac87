//! Bearer authentication gate for protected endpoints
//!
//! The gate extracts the `Authorization: Bearer` token, resolves it to a user
//! through the [`Authenticator`] registered in app data, and injects the user
//! into request extensions for the [`CurrentUser`] extractor. The user is
//! loaded fresh from storage on every request; nothing is cached between
//! requests.
//!
//! Every failure mode (missing header, malformed token, bad signature,
//! expired token, user no longer exists) produces the same 401 body. The
//! distinguishing cause is logged at debug level only.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use tracing::{debug, error};

use gt_core::domain::entities::user::User;
use gt_core::errors::DomainError;
use gt_core::repositories::UserRepository;
use gt_core::services::auth::AuthService;
use gt_core::services::email::EmailService;

use crate::handlers::error::unauthorized_response;

/// Resolves a bearer token to its user
///
/// The auth service is generic over its collaborators, so the gate talks to
/// it through this object-safe seam registered in app data.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<User, DomainError>;
}

#[async_trait]
impl<U, M> Authenticator for AuthService<U, M>
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        AuthService::authenticate(self, token).await
    }
}

/// The authenticated user, available to handlers behind [`RequireAuth`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AuthGateError.into());
        ready(result)
    }
}

/// Uniform gate failure; carries no information about the cause
#[derive(Debug)]
pub struct AuthGateError;

impl fmt::Display for AuthGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "authentication required")
    }
}

impl ResponseError for AuthGateError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        unauthorized_response()
    }
}

/// Authentication middleware factory, applied per route or per scope
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Authentication middleware service
pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    debug!("missing or malformed Authorization header");
                    return Err(AuthGateError.into());
                }
            };

            let authenticator = match req.app_data::<web::Data<Arc<dyn Authenticator>>>() {
                Some(authenticator) => Arc::clone(authenticator.get_ref()),
                None => {
                    error!("authentication gate reached without an authenticator in app data");
                    return Err(AuthGateError.into());
                }
            };

            match authenticator.authenticate(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(CurrentUser(user));
                    service.call(req).await
                }
                Err(e) => {
                    debug!(reason = %e, "bearer token rejected");
                    Err(AuthGateError.into())
                }
            }
        })
    }
}

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer session_token_123"))
            .to_srv_request();
        assert_eq!(
            extract_bearer_token(&req),
            Some("session_token_123".to_string())
        );

        let req_no_scheme = TestRequest::default()
            .insert_header((AUTHORIZATION, "session_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_scheme), None);

        let req_no_header = TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_gate_error_is_uniform_401() {
        let response = AuthGateError.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
