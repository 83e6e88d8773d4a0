//! Workspace and profile response bodies
//!
//! Public projections of the domain entities. Internal fields (password
//! hashes, subscription internals) never appear here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ts_core::domain::entities::{Role, SubscriptionFeature, User, UserRole, Workspace};
use ts_shared::types::Language;

/// Public workspace projection returned by GET /workspace
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub id: Uuid,
    pub workspace_url: String,
    pub name: String,
    pub default_language: Language,
    pub logo_url: Option<String>,
    pub theme_color: Option<String>,
}

impl From<&Workspace> for WorkspaceResponse {
    fn from(workspace: &Workspace) -> Self {
        Self {
            id: workspace.id,
            workspace_url: workspace.workspace_url.clone(),
            name: workspace.name.clone(),
            default_language: workspace.default_language,
            logo_url: workspace.logo_url.clone(),
            theme_color: workspace.theme_color.clone(),
        }
    }
}

/// One subscription feature entitlement
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureResponse {
    pub feature: String,
    pub enabled: bool,
    pub quota: Option<i64>,
}

impl From<&SubscriptionFeature> for FeatureResponse {
    fn from(feature: &SubscriptionFeature) -> Self {
        Self {
            feature: feature.feature.clone(),
            enabled: feature.enabled,
            quota: feature.quota,
        }
    }
}

/// GET /workspace payload: the workspace plus its entitlements
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkspaceOverviewResponse {
    pub workspace: WorkspaceResponse,
    pub features: Vec<FeatureResponse>,
}

impl WorkspaceOverviewResponse {
    pub fn new(workspace: &Workspace, features: &[SubscriptionFeature]) -> Self {
        Self {
            workspace: WorkspaceResponse::from(workspace),
            features: features.iter().map(FeatureResponse::from).collect(),
        }
    }
}

/// GET /auth/me payload: the caller's profile and active roles
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: Option<Language>,
    pub is_verified: bool,
    pub roles: Vec<Role>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MeResponse {
    pub fn new(user: &User, roles: &[UserRole]) -> Self {
        Self {
            id: user.id,
            workspace_id: user.workspace_id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            language: user.language,
            is_verified: user.is_verified,
            roles: roles.iter().map(|r| r.role).collect(),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_me_response_never_exposes_password_hash() {
        let user = User::new(
            Uuid::new_v4(),
            "owner@acme.com".to_string(),
            "$2b$12$secret-hash".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            None,
        );
        let roles = vec![UserRole::new(user.id, Role::Owner)];
        let body = serde_json::to_string(&MeResponse::new(&user, &roles)).unwrap();
        assert!(!body.contains("secret-hash"));
        assert!(body.contains("\"roles\":[\"owner\"]"));
    }

    #[test]
    fn test_workspace_response_projection() {
        let workspace = Workspace::new(
            "acme".to_string(),
            "Acme Inc".to_string(),
            1,
            Language::Spanish,
        );
        let response = WorkspaceResponse::from(&workspace);
        assert_eq!(response.workspace_url, "acme");
        assert_eq!(response.default_language, Language::Spanish);
    }
}
