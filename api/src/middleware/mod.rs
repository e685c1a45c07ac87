//! HTTP middleware for the GrowTeens API

pub mod auth;
pub mod cors;

pub use auth::{Authenticator, CurrentUser, RequireAuth};
pub use cors::create_cors;
