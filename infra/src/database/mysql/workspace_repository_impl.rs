//! MySQL implementation of the WorkspaceRepository trait, including the
//! transactional workspace-plus-owner registration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::info;
use uuid::Uuid;

use ts_core::domain::entities::{SubscriptionFeature, Workspace};
use ts_core::errors::DomainError;
use ts_core::repositories::{NewWorkspaceOwner, WorkspaceRepository};
use ts_shared::types::Language;

use super::db_err;

/// MySQL implementation of WorkspaceRepository
pub struct MySqlWorkspaceRepository {
    pool: MySqlPool,
}

impl MySqlWorkspaceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_workspace(row: &sqlx::mysql::MySqlRow) -> Result<Workspace, DomainError> {
        let id: String = row.try_get("id").map_err(db_err)?;
        let default_language: String = row.try_get("default_language").map_err(db_err)?;

        Ok(Workspace {
            id: Uuid::parse_str(&id).map_err(db_err)?,
            workspace_url: row.try_get("workspace_url").map_err(db_err)?,
            name: row.try_get("name").map_err(db_err)?,
            subscription_id: row.try_get("subscription_id").map_err(db_err)?,
            default_language: default_language.parse::<Language>().map_err(db_err)?,
            logo_url: row.try_get("logo_url").map_err(db_err)?,
            theme_color: row.try_get("theme_color").map_err(db_err)?,
            is_active: row.try_get("is_active").map_err(db_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_err)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(db_err)?,
        })
    }
}

const SELECT_WORKSPACE: &str = r#"
    SELECT id, workspace_url, name, subscription_id, default_language,
           logo_url, theme_color, is_active, created_at, updated_at
    FROM workspaces
"#;

#[async_trait]
impl WorkspaceRepository for MySqlWorkspaceRepository {
    async fn find_active_by_url(
        &self,
        workspace_url: &str,
    ) -> Result<Option<Workspace>, DomainError> {
        let query = format!(
            "{} WHERE workspace_url = ? AND is_active = TRUE LIMIT 1",
            SELECT_WORKSPACE
        );

        let row = sqlx::query(&query)
            .bind(workspace_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_workspace).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Workspace>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_WORKSPACE);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_workspace).transpose()
    }

    async fn exists_active_url(&self, workspace_url: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM workspaces WHERE workspace_url = ? AND is_active = TRUE",
        )
        .bind(workspace_url)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let total: i64 = row.try_get("total").map_err(db_err)?;
        Ok(total > 0)
    }

    async fn create_with_owner(
        &self,
        registration: NewWorkspaceOwner,
    ) -> Result<Workspace, DomainError> {
        let NewWorkspaceOwner {
            workspace,
            owner,
            owner_role,
            verification_code,
        } = registration;

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO workspaces
                (id, workspace_url, name, subscription_id, default_language,
                 logo_url, theme_color, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(workspace.id.to_string())
        .bind(&workspace.workspace_url)
        .bind(&workspace.name)
        .bind(workspace.subscription_id)
        .bind(workspace.default_language.code())
        .bind(&workspace.logo_url)
        .bind(&workspace.theme_color)
        .bind(workspace.is_active)
        .bind(workspace.created_at)
        .bind(workspace.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO users
                (id, workspace_id, email, password_hash, first_name, last_name,
                 language, is_verified, is_active, last_login_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner.id.to_string())
        .bind(owner.workspace_id.to_string())
        .bind(&owner.email)
        .bind(&owner.password_hash)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(owner.language.map(|l| l.code().to_string()))
        .bind(owner.is_verified)
        .bind(owner.is_active)
        .bind(owner.last_login_at)
        .bind(owner.created_at)
        .bind(owner.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (id, user_id, role, is_active, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner_role.id.to_string())
        .bind(owner_role.user_id.to_string())
        .bind(owner_role.role.as_str())
        .bind(owner_role.is_active)
        .bind(owner_role.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO one_time_codes
                (id, user_id, purpose, code, activated, grace_period_hours, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(verification_code.id.to_string())
        .bind(verification_code.user_id.to_string())
        .bind(verification_code.purpose.as_str())
        .bind(&verification_code.code)
        .bind(verification_code.activated)
        .bind(verification_code.grace_period_hours)
        .bind(verification_code.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        info!(workspace_id = %workspace.id, "Workspace registration committed");
        Ok(workspace)
    }

    async fn update(&self, workspace: Workspace) -> Result<Workspace, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE workspaces
            SET workspace_url = ?, name = ?, subscription_id = ?, default_language = ?,
                logo_url = ?, theme_color = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&workspace.workspace_url)
        .bind(&workspace.name)
        .bind(workspace.subscription_id)
        .bind(workspace.default_language.code())
        .bind(&workspace.logo_url)
        .bind(&workspace.theme_color)
        .bind(workspace.is_active)
        .bind(workspace.updated_at)
        .bind(workspace.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("workspace {}", workspace.id),
            });
        }
        Ok(workspace)
    }

    async fn features_for_subscription(
        &self,
        subscription_id: i32,
    ) -> Result<Vec<SubscriptionFeature>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, subscription_id, feature, enabled, quota
            FROM subscription_features
            WHERE subscription_id = ?
            ORDER BY feature
            "#,
        )
        .bind(subscription_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                Ok(SubscriptionFeature {
                    id: row.try_get("id").map_err(db_err)?,
                    subscription_id: row.try_get("subscription_id").map_err(db_err)?,
                    feature: row.try_get("feature").map_err(db_err)?,
                    enabled: row.try_get("enabled").map_err(db_err)?,
                    quota: row.try_get("quota").map_err(db_err)?,
                })
            })
            .collect()
    }
}
