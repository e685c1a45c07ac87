//! Mail relay configuration

use serde::{Deserialize, Serialize};

/// Which email sender implementation to construct at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// HTTP mail relay (production)
    Relay,
    /// Log-only sender that prints mail instead of delivering it (development)
    Log,
}

impl Default for EmailProvider {
    fn default() -> Self {
        EmailProvider::Log
    }
}

/// Configuration for the outbound mail relay
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Sender implementation to use
    #[serde(default)]
    pub provider: EmailProvider,

    /// Relay endpoint URL
    pub relay_url: String,

    /// Relay API key
    pub api_key: String,

    /// From address on outgoing mail
    pub from_address: String,

    /// Display name on outgoing mail
    pub from_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Number of delivery attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            relay_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@growteens.org"),
            from_name: String::from("GrowTeens"),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|v| match v.to_lowercase().as_str() {
                "relay" => Some(EmailProvider::Relay),
                "log" => Some(EmailProvider::Log),
                _ => None,
            })
            .unwrap_or_default();

        Self {
            provider,
            relay_url: std::env::var("EMAIL_RELAY_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_RELAY_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@growteens.org".to_string()),
            from_name: std::env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "GrowTeens".to_string()),
            timeout_seconds: std::env::var("EMAIL_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| default_timeout().to_string())
                .parse()
                .unwrap_or_else(|_| default_timeout()),
            max_retries: std::env::var("EMAIL_MAX_RETRIES")
                .unwrap_or_else(|_| default_max_retries().to_string())
                .parse()
                .unwrap_or_else(|_| default_max_retries()),
            retry_delay_ms: std::env::var("EMAIL_RETRY_DELAY_MS")
                .unwrap_or_else(|_| default_retry_delay().to_string())
                .parse()
                .unwrap_or_else(|_| default_retry_delay()),
        }
    }

    /// Check whether the relay credentials are present
    pub fn is_relay_configured(&self) -> bool {
        !self.relay_url.is_empty() && !self.api_key.is_empty()
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}
