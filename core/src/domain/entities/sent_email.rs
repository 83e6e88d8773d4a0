//! Sent-email audit log entity, used for throttling outbound mail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of outbound email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    Verification,
    PasswordReset,
    Welcome,
}

impl EmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailKind::Verification => "verification",
            EmailKind::PasswordReset => "password_reset",
            EmailKind::Welcome => "welcome",
        }
    }
}

impl std::str::FromStr for EmailKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verification" => Ok(EmailKind::Verification),
            "password_reset" => Ok(EmailKind::PasswordReset),
            "welcome" => Ok(EmailKind::Welcome),
            other => Err(format!("Unknown email kind: {}", other)),
        }
    }
}

/// Append-only audit row for every email the system sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    /// Row id
    pub id: Uuid,

    /// Workspace that triggered the send, if any
    pub workspace_id: Option<Uuid>,

    /// Recipient address
    pub recipient: String,

    /// What kind of email was sent
    pub kind: EmailKind,

    /// When the email was dispatched
    pub sent_at: DateTime<Utc>,
}

impl SentEmail {
    pub fn new(workspace_id: Option<Uuid>, recipient: String, kind: EmailKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            recipient,
            kind,
            sent_at: Utc::now(),
        }
    }
}
