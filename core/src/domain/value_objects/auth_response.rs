//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::role::Role;

/// Authentication response returned after a successful login
///
/// Carries both supported credentials: the JWT access token for
/// `Authorization: Bearer` use and the opaque session id that the API layer
/// turns into an HttpOnly cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type, always "Bearer"
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Opaque session id; the API layer sets it as a cookie, never in the body
    #[serde(skip_serializing)]
    pub session_id: String,

    /// Authenticated user id
    pub user_id: Uuid,

    /// Primary role of the user
    pub role: Role,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        expires_in: i64,
        session_id: String,
        user_id: Uuid,
        role: Role,
    ) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            session_id,
            user_id,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_not_serialized() {
        let response = AuthResponse::new(
            "jwt".to_string(),
            900,
            "opaque-session".to_string(),
            Uuid::new_v4(),
            Role::Owner,
        );
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("opaque-session"));
        assert!(json.contains("\"token_type\":\"Bearer\""));
    }
}
