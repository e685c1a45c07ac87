//! Email delivery module
//!
//! This module provides the concrete senders behind the core's
//! `EmailService` seam:
//!
//! - **Relay**: production delivery through an HTTP mail relay
//! - **Log**: development sender that logs mail instead of delivering it
//!
//! The sender is chosen at startup by [`create_email_sender`] from the
//! typed email configuration.

use async_trait::async_trait;
use tracing::{info, warn};

use gt_core::services::email::{EmailMessage, EmailService};
use gt_shared::config::{EmailConfig, EmailProvider, Environment};

use crate::InfraError;

pub mod log;
pub mod relay;

pub use self::log::LogEmailService;
pub use relay::RelayEmailService;

/// Runtime-selected email sender
///
/// The auth service is generic over its sender, so the startup choice is an
/// enum rather than a boxed trait object.
pub enum EmailSender {
    /// HTTP mail relay (production)
    Relay(RelayEmailService),
    /// Log-only sender (development)
    Log(LogEmailService),
}

#[async_trait]
impl EmailService for EmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        match self {
            EmailSender::Relay(sender) => sender.send(message).await,
            EmailSender::Log(sender) => sender.send(message).await,
        }
    }
}

/// Create an email sender based on configuration
///
/// An unconfigured relay falls back to the log sender in development and is
/// a startup error everywhere else.
pub fn create_email_sender(
    config: &EmailConfig,
    environment: Environment,
) -> Result<EmailSender, InfraError> {
    match config.provider {
        EmailProvider::Log => {
            info!("Using log-only email sender");
            Ok(EmailSender::Log(LogEmailService::new()))
        }
        EmailProvider::Relay if config.is_relay_configured() => {
            Ok(EmailSender::Relay(RelayEmailService::new(config.clone())?))
        }
        EmailProvider::Relay if environment.is_development() => {
            warn!("Mail relay not configured, falling back to log-only sender");
            Ok(EmailSender::Log(LogEmailService::new()))
        }
        EmailProvider::Relay => Err(InfraError::Config(
            "EMAIL_RELAY_URL and EMAIL_RELAY_API_KEY must be set outside development"
                .to_string(),
        )),
    }
}
