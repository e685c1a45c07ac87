//! CORS configuration for the web frontend
//!
//! The web frontend talks to this API with cookies enabled, so credentials
//! are supported by default. Development allows any origin; outside
//! development the allowed origins come from `CORS_ALLOWED_ORIGINS` with the
//! frontend URL as the fallback.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use gt_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the current environment.
pub fn create_cors() -> Cors {
    let environment = Environment::from_env();
    let config = CorsConfig::from_env();
    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    if environment.is_development() {
        development_cors(&config)
    } else {
        restricted_cors(&config, &frontend_url)
    }
}

fn development_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .max_age(config.max_age as usize);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

fn restricted_cors(config: &CorsConfig, frontend_url: &str) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .max_age(config.max_age as usize);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    if config.allowed_origins.is_empty() {
        cors = cors.allowed_origin(frontend_url);
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::ORIGIN,
    ]
}
