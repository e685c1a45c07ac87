//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and session cookie configuration
//! - `chat` - Chatbot relay gateway configuration
//! - `database` - Database connection and pool configuration
//! - `email` - Mail relay configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod chat;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, SessionConfig};
pub use chat::ChatRelayConfig;
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Mail relay configuration
    pub email: EmailConfig,

    /// Chatbot relay configuration
    pub chat: ChatRelayConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Base URL of the web frontend (used in verification links)
    pub frontend_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            chat: ChatRelayConfig::default(),
            cors: CorsConfig::default(),
            frontend_base_url: default_frontend_url(),
        }
    }
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            email: EmailConfig::from_env(),
            chat: ChatRelayConfig::from_env(),
            cors: CorsConfig::from_env(),
            frontend_base_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| default_frontend_url()),
        }
    }
}

fn default_frontend_url() -> String {
    String::from("http://localhost:3000")
}
