//! Outbound mail API configuration

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP mail API used to deliver
/// verification and password-reset emails
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Base URL of the mail API
    pub api_url: String,

    /// API key for authentication
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    pub from_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.mail.localhost/v1/send"),
            api_key: String::new(),
            from_address: String::from("no-reply@teamspace.io"),
            from_name: String::from("Teamspace"),
            timeout_seconds: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("MAIL_API_URL") {
            config.api_url = url;
        }
        if let Ok(key) = std::env::var("MAIL_API_KEY") {
            config.api_key = key;
        }
        if let Ok(from) = std::env::var("MAIL_FROM_ADDRESS") {
            config.from_address = from;
        }
        config
    }

    /// Check whether a real API key is configured
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_config_defaults() {
        let config = MailConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert!(!config.is_configured());
    }
}
