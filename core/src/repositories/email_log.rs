//! Sent-email audit log repository trait.

use async_trait::async_trait;

use crate::domain::entities::{EmailKind, SentEmail};
use crate::errors::DomainError;

/// Repository trait for the append-only sent-email audit log
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    /// Record a dispatched email
    async fn record(&self, email: SentEmail) -> Result<(), DomainError>;

    /// Count emails of one kind sent to a recipient within the last
    /// `window_seconds`, for throttling
    async fn count_recent(
        &self,
        recipient: &str,
        kind: EmailKind,
        window_seconds: u64,
    ) -> Result<u64, DomainError>;
}
