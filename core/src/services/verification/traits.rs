//! Traits for mail delivery integration

use async_trait::async_trait;
use ts_shared::types::Language;

use crate::domain::entities::EmailKind;

/// A templated email ready for dispatch
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    /// Recipient address
    pub to: String,

    /// What kind of email this is; selects the provider template
    pub kind: EmailKind,

    /// Language to render the template in
    pub language: Language,

    /// The one-time code to embed, when applicable
    pub code: Option<String>,

    /// Workspace display name for the template
    pub workspace_name: String,
}

/// Trait for mail service integration
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Dispatch an email, returning the provider message id
    async fn send(&self, mail: OutgoingMail) -> Result<String, String>;
}
