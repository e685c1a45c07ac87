//! LLM gateway relay client
//!
//! Sends a completion request for a session's turns to the configured
//! gateway and returns the streaming response as-is. The client sets no
//! request timeout of its own; stream pacing belongs to the gateway.

use serde::Serialize;
use tracing::{debug, error};

use gt_core::domain::entities::chat::ChatMessage;
use gt_shared::config::ChatRelayConfig;

use crate::InfraError;

/// One turn in the gateway request body
#[derive(Debug, Clone, Serialize)]
pub struct RelayMessage {
    /// Turn role, `user` or `assistant`
    pub role: String,
    /// Turn text
    pub content: String,
}

impl From<&ChatMessage> for RelayMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// Completion request in the OpenAI-compatible shape the gateway accepts
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [RelayMessage],
    stream: bool,
}

/// HTTP client for the chatbot's LLM gateway
pub struct ChatRelayClient {
    client: reqwest::Client,
    config: ChatRelayConfig,
}

impl ChatRelayClient {
    /// Create a new relay client
    pub fn new(config: ChatRelayConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(InfraError::Http)?;

        Ok(Self { client, config })
    }

    /// Number of prior turns forwarded as context
    pub fn history_limit(&self) -> usize {
        self.config.history_limit
    }

    /// Whether gateway credentials are present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn completion_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Forward the turns to the gateway and return its streaming response
    ///
    /// The caller reads the response body as a byte stream and passes it
    /// through without rebuffering or reframing.
    pub async fn stream_chat(
        &self,
        messages: &[RelayMessage],
    ) -> Result<reqwest::Response, InfraError> {
        if !self.is_configured() {
            return Err(InfraError::Config(
                "CHAT_RELAY_API_KEY must be set for the chat relay".to_string(),
            ));
        }

        let url = self.completion_url();
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            stream: true,
        };

        debug!("Forwarding {} chat turns to {}", messages.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach chat gateway: {}", e);
                InfraError::ChatRelay(format!("Failed to reach chat gateway: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Chat gateway returned {}", status);
            return Err(InfraError::ChatRelay(format!(
                "Chat gateway returned {}",
                status
            )));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::domain::entities::chat::ChatRole;
    use uuid::Uuid;

    #[test]
    fn test_relay_message_from_chat_message() {
        let session_id = Uuid::new_v4();
        let message = ChatMessage::new(
            session_id,
            ChatRole::Assistant,
            "Here is a hint.".to_string(),
        );

        let relay: RelayMessage = (&message).into();
        assert_eq!(relay.role, "assistant");
        assert_eq!(relay.content, "Here is a hint.");
    }

    #[test]
    fn test_completion_url_join() {
        let config = ChatRelayConfig {
            base_url: "https://openrouter.ai/api/v1/".to_string(),
            ..Default::default()
        };
        let client = ChatRelayClient::new(config).unwrap();
        assert_eq!(
            client.completion_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_completion_request_shape() {
        let messages = vec![RelayMessage {
            role: "user".to_string(),
            content: "What is a budget?".to_string(),
        }];
        let request = CompletionRequest {
            model: "meta-llama/llama-3.1-8b-instruct",
            messages: &messages,
            stream: true,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_stream_chat_requires_api_key() {
        let client = ChatRelayClient::new(ChatRelayConfig::default()).unwrap();
        let result = client.stream_chat(&[]).await;
        assert!(matches!(result, Err(InfraError::Config(_))));
    }
}
