//! Recording mock for the email sender seam
//!
//! Used by the service tests in this crate and by the API integration
//! tests; production senders live in the infrastructure layer.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{EmailMessage, EmailService};

/// Email sender double recording every dispatched message
///
/// Clones share the underlying store, so a handle kept by a test observes
/// messages sent through the clone held by the service under test.
#[derive(Clone)]
pub struct MockEmailService {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: false,
        }
    }

    /// A sender whose every dispatch fails
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    /// Number of messages dispatched so far
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// Most recently dispatched message, if any
    pub async fn last_message(&self) -> Option<EmailMessage> {
        self.sent.read().await.last().cloned()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        if self.fail {
            return Err("forced failure".to_string());
        }
        let mut sent = self.sent.write().await;
        sent.push(message.clone());
        Ok(format!("mock-{}", sent.len()))
    }
}
