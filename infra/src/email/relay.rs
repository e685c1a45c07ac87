//! HTTP mail relay implementation
//!
//! This module delivers mail through an HTTP relay API. It implements the
//! core `EmailService` trait for production delivery.
//!
//! ## Features
//!
//! - Automatic retry logic with exponential backoff
//! - Rate limiting handling (429 responses back off and retry)
//! - Security: recipient addresses masked in logs

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use gt_core::services::email::{EmailMessage, EmailService};
use gt_shared::config::EmailConfig;
use gt_shared::validation::mask_email;

use crate::InfraError;

/// Request body the relay expects
#[derive(Serialize)]
struct RelayPayload<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// HTTP mail relay sender
pub struct RelayEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl RelayEmailService {
    /// Create a new relay sender
    ///
    /// Fails when the relay URL or API key is missing, or when the HTTP
    /// client cannot be constructed.
    pub fn new(config: EmailConfig) -> Result<Self, InfraError> {
        if !config.is_relay_configured() {
            return Err(InfraError::Config(
                "EMAIL_RELAY_URL and EMAIL_RELAY_API_KEY must be set for the relay sender"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(InfraError::Http)?;

        info!(
            "Mail relay sender initialized with from address: {}",
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }

    /// "Display Name <address>" line for the from field
    fn sender_line(&self) -> String {
        format!("{} <{}>", self.config.from_name, self.config.from_address)
    }

    async fn deliver_once(
        &self,
        message: &EmailMessage,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let payload = RelayPayload {
            from: self.sender_line(),
            to: vec![message.to.as_str()],
            subject: &message.subject,
            text: &message.text,
            html: message.html.as_deref(),
        };

        self.client
            .post(&self.config.relay_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
    }

    /// Deliver mail with retry logic
    ///
    /// Retries on 429 and 5xx responses and on transport errors, with
    /// exponential backoff. Other 4xx responses fail immediately. Callers
    /// see a single success or failure; retries never leak upward.
    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfraError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(&message.to)
            );

            match self.deliver_once(message).await {
                Ok(response) if response.status().is_success() => {
                    let message_id = parse_message_id(response).await;
                    info!(
                        "Email sent successfully to {} with id: {}",
                        mask_email(&message.to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    error!(
                        "Relay rejected email (attempt {}/{}): {}",
                        attempts, self.config.max_retries, status
                    );

                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if !retryable {
                        return Err(InfraError::Email(format!(
                            "Relay rejected email: {}",
                            status
                        )));
                    }
                    if attempts >= self.config.max_retries {
                        return Err(InfraError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            self.config.max_retries, status
                        )));
                    }
                    warn!("Retryable relay error, backing off for {:?}", delay);
                }
                Err(e) => {
                    error!(
                        "Failed to reach mail relay (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );
                    if attempts >= self.config.max_retries {
                        return Err(InfraError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

/// Pull the relay's message id out of a success response
async fn parse_message_id(response: reqwest::Response) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("relay-{}", Uuid::new_v4())),
        Err(_) => format!("relay-{}", Uuid::new_v4()),
    }
}

#[async_trait]
impl EmailService for RelayEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        self.send_with_retry(message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay_config() -> EmailConfig {
        EmailConfig {
            relay_url: "https://relay.example.com/send".to_string(),
            api_key: "test-key".to_string(),
            from_name: "GrowTeens".to_string(),
            from_address: "no-reply@growteens.org".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_relay_credentials() {
        let result = RelayEmailService::new(EmailConfig::default());
        assert!(matches!(result, Err(InfraError::Config(_))));
    }

    #[test]
    fn test_sender_line_format() {
        let sender = RelayEmailService::new(relay_config()).unwrap();
        assert_eq!(sender.sender_line(), "GrowTeens <no-reply@growteens.org>");
    }

    #[test]
    fn test_payload_omits_missing_html_body() {
        let plain = RelayPayload {
            from: "GrowTeens <no-reply@growteens.org>".to_string(),
            to: vec!["amara@example.com"],
            subject: "Hello",
            text: "Plain body",
            html: None,
        };
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("html").is_none());
        assert_eq!(json["to"][0], "amara@example.com");

        let rich = RelayPayload {
            html: Some("<p>Rich body</p>"),
            ..plain
        };
        let json = serde_json::to_value(&rich).unwrap();
        assert_eq!(json["html"], "<p>Rich body</p>");
    }
}
