//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the GrowTeens backend,
//! following Clean Architecture principles. It provides the concrete
//! implementations behind the seams the core defines.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories using SQLx plus the connection-pool
//!   lifecycle (created once at startup, closed explicitly on shutdown)
//! - **Email**: outbound mail senders (HTTP relay for production, a
//!   log-only sender for development)
//! - **Chat**: HTTP client that forwards chatbot turns to the LLM gateway
//!   and hands the streamed response back untouched

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - outbound mail delivery
pub mod email;

/// Chat module - LLM gateway relay client
pub mod chat;

pub use chat::ChatRelayClient;
pub use database::DatabasePool;
pub use email::{create_email_sender, EmailSender};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure during startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email delivery error: {0}")]
    Email(String),

    /// Chat relay gateway error
    #[error("Chat relay error: {0}")]
    ChatRelay(String),
}
