//! The API response envelope
//!
//! Every endpoint wraps its payload in the same structure. The `status` field
//! mirrors the HTTP status code in the body so clients can treat responses
//! uniformly; `errors` carries field-keyed validation reasons when present.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard response envelope: `{status, message, errors, data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// HTTP-adjacent status code, mirrored in the body
    pub status: u16,

    /// Human-readable, localized message
    pub message: String,

    /// Field-keyed validation reasons (validation failures only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,

    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope with payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            errors: None,
            data: Some(data),
        }
    }

    /// Create a successful envelope without payload
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
            errors: None,
            data: None,
        }
    }

    /// Create an error envelope
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
            data: None,
        }
    }

    /// Create a validation-error envelope with field reasons
    pub fn validation(message: impl Into<String>, errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            status: 422,
            message: message.into(),
            errors: Some(errors),
            data: None,
        }
    }

    /// Override the status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Check if the envelope carries a success status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let envelope = ApiEnvelope::ok("Created", serde_json::json!({"id": 1}));
        assert_eq!(envelope.status, 200);
        assert!(envelope.is_success());
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn test_error_envelope_skips_empty_fields() {
        let envelope: ApiEnvelope<()> = ApiEnvelope::error(404, "Workspace not found");
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"status\":404"));
        assert!(!json.contains("errors"));
        assert!(!json.contains("data"));
    }

    #[test]
    fn test_validation_envelope() {
        let mut errors = HashMap::new();
        errors.insert("email".to_string(), vec!["Invalid email".to_string()]);
        let envelope: ApiEnvelope<()> = ApiEnvelope::validation("Validation failed", errors);
        assert_eq!(envelope.status, 422);
        assert!(!envelope.is_success());
        assert_eq!(envelope.errors.unwrap()["email"].len(), 1);
    }
}
