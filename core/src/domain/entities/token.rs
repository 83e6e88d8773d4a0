//! JWT claims for access tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::role::Role;
use crate::errors::{DomainError, TokenError};

/// JWT issuer
pub const JWT_ISSUER: &str = "teamspace";

/// JWT audience
pub const JWT_AUDIENCE: &str = "teamspace-api";

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Workspace (tenant) the token is scoped to
    pub workspace_id: String,

    /// Primary role of the user at issuance time
    pub role: String,

    /// Whether the user's email is verified
    pub is_verified: bool,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a new access token
    pub fn new_access(
        user_id: Uuid,
        workspace_id: Uuid,
        role: Role,
        is_verified: bool,
        expiry_seconds: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_seconds);
        Self {
            sub: user_id.to_string(),
            workspace_id: workspace_id.to_string(),
            role: role.as_str().to_string(),
            is_verified,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parses the subject claim into a user id
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub).map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }

    /// Parses the workspace claim into a workspace id
    pub fn workspace_uuid(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.workspace_id).map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_access_claims() {
        let user_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();
        let claims = Claims::new_access(
            user_id,
            workspace_id,
            Role::Owner,
            true,
            900,
            JWT_ISSUER,
            JWT_AUDIENCE,
        );

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.workspace_uuid().unwrap(), workspace_id);
        assert_eq!(claims.role, "owner");
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.iss, JWT_ISSUER);
    }

    #[test]
    fn test_invalid_subject_rejected() {
        let mut claims = Claims::new_access(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Role::Member,
            false,
            60,
            JWT_ISSUER,
            JWT_AUDIENCE,
        );
        claims.sub = "not-a-uuid".to_string();
        assert!(claims.user_id().is_err());
    }
}
