//! Chatbot relay gateway configuration

use serde::{Deserialize, Serialize};

/// Configuration for the LLM gateway the chatbot proxy forwards to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRelayConfig {
    /// Gateway base URL
    pub base_url: String,

    /// Gateway API key
    pub api_key: String,

    /// Model identifier requested from the gateway
    pub model: String,

    /// Number of prior messages sent as context
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ChatRelayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://openrouter.ai/api/v1"),
            api_key: String::new(),
            model: String::from("meta-llama/llama-3.1-8b-instruct"),
            history_limit: default_history_limit(),
        }
    }
}

impl ChatRelayConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CHAT_RELAY_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            api_key: std::env::var("CHAT_RELAY_API_KEY").unwrap_or_default(),
            model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| "meta-llama/llama-3.1-8b-instruct".to_string()),
            history_limit: std::env::var("CHAT_HISTORY_LIMIT")
                .unwrap_or_else(|_| default_history_limit().to_string())
                .parse()
                .unwrap_or_else(|_| default_history_limit()),
        }
    }

    /// Check whether the gateway credentials are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn default_history_limit() -> usize {
    20
}
