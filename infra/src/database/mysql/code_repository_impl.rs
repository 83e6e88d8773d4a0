//! MySQL implementation of the CodeRepository trait.
//!
//! The two `activate_*` operations run the code activation and its side
//! effect in one transaction so a half-applied consumption can never be
//! observed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::info;
use uuid::Uuid;

use ts_core::domain::entities::{CodePurpose, OneTimeCode};
use ts_core::errors::{AuthError, DomainError};
use ts_core::repositories::CodeRepository;

use super::db_err;

/// MySQL implementation of CodeRepository
pub struct MySqlCodeRepository {
    pool: MySqlPool,
}

impl MySqlCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<OneTimeCode, DomainError> {
        let id: String = row.try_get("id").map_err(db_err)?;
        let user_id: String = row.try_get("user_id").map_err(db_err)?;
        let purpose: String = row.try_get("purpose").map_err(db_err)?;

        Ok(OneTimeCode {
            id: Uuid::parse_str(&id).map_err(db_err)?,
            user_id: Uuid::parse_str(&user_id).map_err(db_err)?,
            purpose: purpose.parse::<CodePurpose>().map_err(db_err)?,
            code: row.try_get("code").map_err(db_err)?,
            activated: row.try_get("activated").map_err(db_err)?,
            grace_period_hours: row.try_get("grace_period_hours").map_err(db_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl CodeRepository for MySqlCodeRepository {
    async fn create(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO one_time_codes
                (id, user_id, purpose, code, activated, grace_period_hours, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.id.to_string())
        .bind(code.user_id.to_string())
        .bind(code.purpose.as_str())
        .bind(&code.code)
        .bind(code.activated)
        .bind(code.grace_period_hours)
        .bind(code.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(code)
    }

    async fn find_latest(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, purpose, code, activated, grace_period_hours, created_at
            FROM one_time_codes
            WHERE user_id = ? AND purpose = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.to_string())
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn activate_email_verification(
        &self,
        code_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let activated = sqlx::query(
            "UPDATE one_time_codes SET activated = TRUE WHERE id = ? AND activated = FALSE",
        )
        .bind(code_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if activated.rows_affected() == 0 {
            return Err(DomainError::Auth(AuthError::CodeAlreadyUsed));
        }

        sqlx::query("UPDATE users SET is_verified = TRUE, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        info!(user_id = %user_id, "Email verification committed");
        Ok(())
    }

    async fn activate_password_reset(
        &self,
        code_id: Uuid,
        user_id: Uuid,
        new_password_hash: &str,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let activated = sqlx::query(
            "UPDATE one_time_codes SET activated = TRUE WHERE id = ? AND activated = FALSE",
        )
        .bind(code_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if activated.rows_affected() == 0 {
            return Err(DomainError::Auth(AuthError::CodeAlreadyUsed));
        }

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(new_password_hash)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        info!(user_id = %user_id, "Password reset committed");
        Ok(())
    }
}
