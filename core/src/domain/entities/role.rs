//! Role assignment entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user can hold within their workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The workspace owner; created by registration
    Owner,
    /// Administrator
    Admin,
    /// Regular member
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Role assignment row. Every user holds at least one active role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    /// Unique identifier for the assignment
    pub id: Uuid,

    /// User this role is assigned to
    pub user_id: Uuid,

    /// The assigned role
    pub role: Role,

    /// Whether the assignment is active
    pub is_active: bool,

    /// Timestamp when the role was assigned
    pub created_at: DateTime<Utc>,
}

impl UserRole {
    /// Creates a new active role assignment
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Owner, Role::Admin, Role::Member] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_new_assignment_is_active() {
        let assignment = UserRole::new(Uuid::new_v4(), Role::Owner);
        assert!(assignment.is_active);
        assert_eq!(assignment.role, Role::Owner);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
    }
}
