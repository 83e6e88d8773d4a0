//! Mock mailer for development and tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use ts_core::services::verification::{MailerTrait, OutgoingMail};

/// Mailer that records every send instead of calling a provider.
///
/// Used in development (no mail API key configured) and in integration
/// tests.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All mails sent so far, oldest first
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, String> {
        info!(
            to = %mail.to,
            kind = mail.kind.as_str(),
            "Mock mailer captured email"
        );
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(mail);
        }
        Ok(format!("mock-{}", Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts_core::domain::entities::EmailKind;
    use ts_shared::types::Language;

    #[tokio::test]
    async fn test_mock_mailer_records_sends() {
        let mailer = MockMailer::new();
        let message_id = mailer
            .send(OutgoingMail {
                to: "user@example.com".to_string(),
                kind: EmailKind::Verification,
                language: Language::English,
                code: Some("123456".to_string()),
                workspace_name: "Acme".to_string(),
            })
            .await
            .unwrap();

        assert!(message_id.starts_with("mock-"));
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "user@example.com");
    }
}
