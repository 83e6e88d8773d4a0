//! MySQL implementation of the EmailLogRepository trait.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{MySqlPool, Row};

use ts_core::domain::entities::{EmailKind, SentEmail};
use ts_core::errors::DomainError;
use ts_core::repositories::EmailLogRepository;

use super::db_err;

/// MySQL implementation of the append-only sent-email audit log
pub struct MySqlEmailLogRepository {
    pool: MySqlPool,
}

impl MySqlEmailLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLogRepository for MySqlEmailLogRepository {
    async fn record(&self, email: SentEmail) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sent_emails (id, workspace_id, recipient, kind, sent_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(email.id.to_string())
        .bind(email.workspace_id.map(|id| id.to_string()))
        .bind(&email.recipient)
        .bind(email.kind.as_str())
        .bind(email.sent_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn count_recent(
        &self,
        recipient: &str,
        kind: EmailKind,
        window_seconds: u64,
    ) -> Result<u64, DomainError> {
        let cutoff = Utc::now() - Duration::seconds(window_seconds as i64);

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM sent_emails
            WHERE recipient = ? AND kind = ? AND sent_at >= ?
            "#,
        )
        .bind(recipient)
        .bind(kind.as_str())
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let total: i64 = row.try_get("total").map_err(db_err)?;
        Ok(total as u64)
    }
}
