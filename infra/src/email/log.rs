//! Log-only email sender for development
//!
//! Prints outgoing mail to the log instead of delivering it. This is the
//! fallback sender when the relay is unconfigured in development; the full
//! body (including the verification link) lands at debug level so the flow
//! can be exercised without a real mailbox.

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use gt_core::services::email::{EmailMessage, EmailService};
use gt_shared::validation::mask_email;

/// Email sender that logs instead of delivering
#[derive(Clone, Default)]
pub struct LogEmailService;

impl LogEmailService {
    /// Create a new log-only sender
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailService for LogEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        let message_id = format!("log-{}", Uuid::new_v4());

        info!(
            target: "email",
            provider = "log",
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            "Email dispatched to log sink"
        );
        debug!(target: "email", body = %message.text, "Email body");

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sender_returns_message_id() {
        let sender = LogEmailService::new();
        let message = EmailMessage::new(
            "amara@example.com".to_string(),
            "Hello".to_string(),
            "Body".to_string(),
        );

        let id = sender.send(&message).await.unwrap();
        assert!(id.starts_with("log-"));
    }
}
