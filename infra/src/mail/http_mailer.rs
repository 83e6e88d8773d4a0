//! HTTP mail API client.
//!
//! Sends templated transactional email through a JSON mail API. The template
//! is selected by email kind; the provider renders it in the requested
//! language with the supplied variables.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use ts_core::domain::entities::EmailKind;
use ts_core::services::verification::{MailerTrait, OutgoingMail};
use ts_shared::config::MailConfig;

use crate::InfraError;

/// Mail API client implementing MailerTrait
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

#[derive(Deserialize)]
struct SendResponse {
    message_id: String,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Result<Self, InfraError> {
        if !config.is_configured() {
            return Err(InfraError::Config("Mail API key not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InfraError::Mail(e.to_string()))?;

        info!("Mail API client initialized for {}", config.api_url);
        Ok(Self { client, config })
    }

    fn template_for(kind: EmailKind) -> &'static str {
        match kind {
            EmailKind::Verification => "email-verification",
            EmailKind::PasswordReset => "password-reset",
            EmailKind::Welcome => "welcome",
        }
    }
}

#[async_trait]
impl MailerTrait for HttpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, String> {
        let payload = json!({
            "from": {
                "address": self.config.from_address,
                "name": self.config.from_name,
            },
            "to": mail.to,
            "template": Self::template_for(mail.kind),
            "language": mail.language.code(),
            "variables": {
                "code": mail.code,
                "workspace_name": mail.workspace_name,
            },
        });

        debug!(template = Self::template_for(mail.kind), "Dispatching email");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Mail API request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Mail API rejected the send");
            return Err(format!("Mail API returned {}: {}", status, body));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| format!("Mail API response unreadable: {}", e))?;

        debug!(message_id = %parsed.message_id, "Email dispatched");
        Ok(parsed.message_id)
    }
}
