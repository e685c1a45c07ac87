//! Trait for email service integration

use async_trait::async_trait;

/// A composed email ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text: String,
    /// Optional HTML body
    pub html: Option<String>,
}

impl EmailMessage {
    /// Creates a plain-text message
    pub fn new(to: String, subject: String, text: String) -> Self {
        Self {
            to,
            subject,
            text,
            html: None,
        }
    }

    /// Attaches an HTML body
    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }
}

/// Trait for email service integration
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email, returning a provider message id
    async fn send(&self, message: &EmailMessage) -> Result<String, String>;
}
