//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token
//! management, and validation operations. The actual user-facing messages are
//! resolved in the presentation layer for internationalization support.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Workspace not found: {workspace_url}")]
    WorkspaceNotFound { workspace_url: String },

    #[error("Workspace URL already taken: {workspace_url}")]
    WorkspaceUrlTaken { workspace_url: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Account deactivated")]
    AccountDeactivated,

    #[error("Rate limit exceeded: {minutes} minutes")]
    RateLimitExceeded { minutes: u32 },

    #[error("Mail service failure")]
    MailServiceFailure,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid one-time code")]
    CodeInvalid,

    #[error("One-time code expired")]
    CodeExpired,

    #[error("One-time code already used")]
    CodeAlreadyUsed,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid workspace URL")]
    InvalidWorkspaceUrl,

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        let error = AuthError::WorkspaceNotFound {
            workspace_url: "acme".to_string(),
        };
        assert!(error.to_string().contains("acme"));
    }

    #[test]
    fn test_validation_error_fields() {
        let error = ValidationError::InvalidLength {
            field: "password".to_string(),
            min: 8,
            max: 128,
        };
        let message = error.to_string();
        assert!(message.contains("password"));
        assert!(message.contains("8"));
    }
}
