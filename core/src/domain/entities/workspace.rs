//! Workspace entity representing a tenant in the Teamspace system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_shared::types::Language;
use uuid::Uuid;

/// Workspace entity: one customer account identified by a unique subdomain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier for the workspace
    pub id: Uuid,

    /// Subdomain slug that identifies the tenant (unique among active workspaces)
    pub workspace_url: String,

    /// Display name of the workspace
    pub name: String,

    /// Subscription plan id driving feature entitlements
    pub subscription_id: i32,

    /// Default language for users without an explicit preference
    pub default_language: Language,

    /// Logo URL for client styling
    pub logo_url: Option<String>,

    /// Theme color for client styling
    pub theme_color: Option<String>,

    /// Whether the workspace is active; deactivated workspaces release their slug
    pub is_active: bool,

    /// Timestamp when the workspace was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the workspace was last updated
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new active workspace on the given subscription plan
    pub fn new(workspace_url: String, name: String, subscription_id: i32, default_language: Language) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_url,
            name,
            subscription_id,
            default_language,
            logo_url: None,
            theme_color: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deactivates the workspace, releasing its subdomain
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Updates the styling fields
    pub fn set_styling(&mut self, logo_url: Option<String>, theme_color: Option<String>) {
        self.logo_url = logo_url;
        self.theme_color = theme_color;
        self.updated_at = Utc::now();
    }
}
