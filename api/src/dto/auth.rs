//! Authentication request and response bodies
//!
//! Request DTOs carry `validator` derive rules for shape checks (lengths,
//! email format). Business rules such as slug availability and password
//! acceptability live in the core services; the DTO layer only rejects
//! obviously malformed input early with field-keyed 422 responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ts_core::domain::entities::Role;
use ts_core::domain::value_objects::AuthResponse;

/// POST /auth/register request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub workspace_name: String,

    #[validate(length(min = 3, max = 63))]
    pub workspace_url: String,

    #[validate(email)]
    pub email: String,

    // bcrypt reads only the first 72 bytes
    #[validate(length(min = 8, max = 72))]
    pub password: String,

    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    /// Preferred language code ("en" or "es"); workspace default when absent
    pub language: Option<String>,
}

/// POST /auth/register response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub workspace_id: Uuid,
    pub workspace_url: String,
    pub name: String,
}

/// POST /auth/login request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// POST /auth/login response payload
///
/// The session id travels only in the HttpOnly cookie, never in the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: Uuid,
    pub role: Role,
}

impl From<&AuthResponse> for LoginResponse {
    fn from(auth: &AuthResponse) -> Self {
        Self {
            access_token: auth.access_token.clone(),
            token_type: auth.token_type.clone(),
            expires_in: auth.expires_in,
            user_id: auth.user_id,
            role: auth.role,
        }
    }
}

/// POST /auth/verify-email request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub code: String,
}

/// POST /auth/resend-verification and POST /auth/forgot-password request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

/// POST /auth/reset-password request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub code: String,

    #[validate(length(min = 8, max = 72))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            workspace_name: "Acme Inc".to_string(),
            workspace_url: "acme".to_string(),
            email: "owner@acme.com".to_string(),
            password: "s3cure-password".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            language: None,
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(register_request().validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let mut request = register_request();
        request.email = "not-an-email".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let mut request = register_request();
        request.password = "short".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_request_rejects_password_over_bcrypt_limit() {
        let mut request = register_request();
        request.password = "x".repeat(73);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_reset_password_request_rejects_password_over_bcrypt_limit() {
        let request = ResetPasswordRequest {
            email: "owner@acme.com".to_string(),
            code: "123456".to_string(),
            new_password: "x".repeat(73),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("new_password"));
    }

    #[test]
    fn test_verify_email_request_requires_six_digit_code() {
        let request = VerifyEmailRequest {
            email: "owner@acme.com".to_string(),
            code: "12345".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_login_response_omits_session_id() {
        let auth = AuthResponse::new(
            "jwt".to_string(),
            900,
            "session-id".to_string(),
            Uuid::new_v4(),
            Role::Owner,
        );
        let body = serde_json::to_string(&LoginResponse::from(&auth)).unwrap();
        assert!(!body.contains("session-id"));
        assert!(body.contains("\"token_type\":\"Bearer\""));
    }
}
