//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ts_core::domain::entities::{Role, User, UserRole};
use ts_core::errors::DomainError;
use ts_core::repositories::UserRepository;
use ts_shared::types::Language;

use super::db_err;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    pub(crate) fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(db_err)?;
        let workspace_id: String = row.try_get("workspace_id").map_err(db_err)?;
        let language = match row.try_get::<Option<String>, _>("language").map_err(db_err)? {
            Some(code) => Some(code.parse::<Language>().map_err(db_err)?),
            None => None,
        };

        Ok(User {
            id: Uuid::parse_str(&id).map_err(db_err)?,
            workspace_id: Uuid::parse_str(&workspace_id).map_err(db_err)?,
            email: row.try_get("email").map_err(db_err)?,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            first_name: row.try_get("first_name").map_err(db_err)?,
            last_name: row.try_get("last_name").map_err(db_err)?,
            language,
            is_verified: row.try_get("is_verified").map_err(db_err)?,
            is_active: row.try_get("is_active").map_err(db_err)?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(db_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_err)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(db_err)?,
        })
    }

    fn row_to_user_role(row: &sqlx::mysql::MySqlRow) -> Result<UserRole, DomainError> {
        let id: String = row.try_get("id").map_err(db_err)?;
        let user_id: String = row.try_get("user_id").map_err(db_err)?;
        let role: String = row.try_get("role").map_err(db_err)?;

        Ok(UserRole {
            id: Uuid::parse_str(&id).map_err(db_err)?,
            user_id: Uuid::parse_str(&user_id).map_err(db_err)?,
            role: role.parse::<Role>().map_err(db_err)?,
            is_active: row.try_get("is_active").map_err(db_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(
        &self,
        workspace_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, workspace_id, email, password_hash, first_name, last_name,
                   language, is_verified, is_active, last_login_at,
                   created_at, updated_at
            FROM users
            WHERE workspace_id = ? AND email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(workspace_id.to_string())
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, workspace_id, email, password_hash, first_name, last_name,
                   language, is_verified, is_active, last_login_at,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, password_hash = ?, first_name = ?, last_name = ?,
                language = ?, is_verified = ?, is_active = ?, last_login_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.language.map(|l| l.code().to_string()))
            .bind(user.is_verified)
            .bind(user.is_active)
            .bind(user.last_login_at)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }
        Ok(user)
    }

    async fn active_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, DomainError> {
        let query = r#"
            SELECT id, user_id, role, is_active, created_at
            FROM user_roles
            WHERE user_id = ? AND is_active = TRUE
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(Self::row_to_user_role).collect()
    }
}
