//! Translation of domain errors into HTTP responses
//!
//! Every error leaves the API through this module so that the envelope
//! shape, status codes, and localization stay consistent. Internal details
//! (database messages, session store failures) are logged but never
//! reach the client.

use std::collections::HashMap;

use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ts_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use ts_shared::types::{ApiEnvelope, Language};

use crate::i18n::localized;

/// Language for this request, from the Accept-Language header
pub fn request_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Build the error response for a domain error
pub fn error_response(error: &DomainError, language: Language) -> HttpResponse {
    if let DomainError::ValidationErr(validation) = error {
        return field_error_response(validation, language);
    }

    let (category, key) = classify(error);
    let (status, mut message) = localized(category, key, language);

    if let DomainError::Auth(AuthError::RateLimitExceeded { minutes }) = error {
        message = message.replace("{minutes}", &minutes.to_string());
    }

    match error {
        DomainError::Database { message } => {
            log::error!("Database error: {}", message);
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
        }
        _ => {}
    }

    envelope_response(status, message)
}

/// Build a 422 response from `validator` derive failures, keyed by field
pub fn validation_response(errors: &ValidationErrors, language: Language) -> HttpResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let reasons = field_errors
            .iter()
            .map(|e| reason_for_code(e.code.as_ref(), language))
            .collect();
        fields.insert(field.to_string(), reasons);
    }

    let (_, message) = localized("validation", "validation_failed", language);
    let envelope: ApiEnvelope<serde_json::Value> = ApiEnvelope::validation(message, fields);
    HttpResponse::UnprocessableEntity().json(envelope)
}

/// Error type for middleware, rendered as the standard envelope.
///
/// Route handlers build `HttpResponse` values directly; middleware has to
/// go through `actix_web::Error`, so this carries the localized message and
/// status until actix renders it.
#[derive(Debug)]
pub struct ApiError {
    status: u16,
    message: String,
    retry_after: Option<u64>,
}

impl ApiError {
    /// Localized error from the message catalog
    pub fn from_catalog(category: &str, key: &str, language: Language) -> Self {
        let (status, message) = localized(category, key, language);
        Self {
            status,
            message,
            retry_after: None,
        }
    }

    /// Localized error for a domain error
    pub fn from_domain(error: &DomainError, language: Language) -> Self {
        let (category, key) = classify(error);
        Self::from_catalog(category, key, language)
    }

    /// Attach a Retry-After hint (rate limiting)
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Substitute a `{placeholder}` in the message
    pub fn with_message_substitution(mut self, placeholder: &str, value: &str) -> Self {
        self.message = self.message.replace(placeholder, value);
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let envelope: ApiEnvelope<serde_json::Value> =
            ApiEnvelope::error(self.status, self.message.clone());
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(seconds) = self.retry_after {
            builder.insert_header((header::RETRY_AFTER, seconds.to_string()));
        }
        builder.json(envelope)
    }
}

/// Map a domain error to its message catalog entry
pub(crate) fn classify(error: &DomainError) -> (&'static str, &'static str) {
    match error {
        DomainError::Auth(auth) => (
            "auth",
            match auth {
                AuthError::WorkspaceNotFound { .. } => "workspace_not_found",
                AuthError::WorkspaceUrlTaken { .. } => "workspace_url_taken",
                AuthError::InvalidCredentials => "invalid_credentials",
                AuthError::EmailNotVerified => "email_not_verified",
                AuthError::AccountDeactivated => "account_deactivated",
                AuthError::RateLimitExceeded { .. } => "rate_limit_exceeded",
                AuthError::MailServiceFailure => "mail_service_failure",
                AuthError::UserNotFound => "user_not_found",
                AuthError::InsufficientPermissions => "insufficient_permissions",
                AuthError::SessionExpired => "session_expired",
                AuthError::CodeInvalid => "code_invalid",
                AuthError::CodeExpired => "code_expired",
                AuthError::CodeAlreadyUsed => "code_already_used",
            },
        ),
        DomainError::Token(token) => (
            "token",
            match token {
                TokenError::TokenExpired => "token_expired",
                TokenError::InvalidTokenFormat => "invalid_token_format",
                TokenError::InvalidSignature => "invalid_signature",
                TokenError::InvalidClaims => "invalid_claims",
                TokenError::TokenGenerationFailed => "token_generation_failed",
            },
        ),
        DomainError::Validation { .. } => ("validation", "validation_failed"),
        DomainError::NotFound { .. } => ("general", "not_found"),
        DomainError::Unauthorized => ("auth", "unauthorized"),
        DomainError::Database { .. } => ("general", "database_error"),
        DomainError::Internal { .. } => ("general", "internal_error"),
        // ValidationErr is handled before classify
        DomainError::ValidationErr(_) => ("validation", "validation_failed"),
    }
}

/// Field-keyed 422 response for domain-level validation errors
fn field_error_response(error: &ValidationError, language: Language) -> HttpResponse {
    let (field, key, substitutions) = match error {
        ValidationError::RequiredField { field } => (field.clone(), "required_field", vec![]),
        ValidationError::InvalidFormat { field } => (field.clone(), "invalid_format", vec![]),
        ValidationError::InvalidLength { field, min, max } => (
            field.clone(),
            "invalid_length",
            vec![("{min}", min.to_string()), ("{max}", max.to_string())],
        ),
        ValidationError::InvalidEmail => ("email".to_string(), "invalid_email", vec![]),
        ValidationError::InvalidWorkspaceUrl => {
            ("workspace_url".to_string(), "invalid_workspace_url", vec![])
        }
        ValidationError::DuplicateValue { field } => (field.clone(), "duplicate_value", vec![]),
    };

    let (_, mut reason) = localized("validation", key, language);
    for (placeholder, value) in substitutions {
        reason = reason.replace(placeholder, &value);
    }

    let mut fields = HashMap::new();
    fields.insert(field, vec![reason]);

    let (_, message) = localized("validation", "validation_failed", language);
    let envelope: ApiEnvelope<serde_json::Value> = ApiEnvelope::validation(message, fields);
    HttpResponse::UnprocessableEntity().json(envelope)
}

/// One reason string for a `validator` derive error code
fn reason_for_code(code: &str, language: Language) -> String {
    let key = match code {
        "email" => "invalid_email",
        "length" => "invalid_format",
        "required" => "required_field",
        _ => "invalid_format",
    };
    localized("validation", key, language).1
}

/// Plain error envelope with the given status
pub fn envelope_response(status: u16, message: String) -> HttpResponse {
    let envelope: ApiEnvelope<serde_json::Value> = ApiEnvelope::error(status, message);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_not_found_maps_to_404() {
        let error = DomainError::Auth(AuthError::WorkspaceNotFound {
            workspace_url: "acme".to_string(),
        });
        let response = error_response(&error, Language::English);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_code_expired_maps_to_410() {
        let error = DomainError::Auth(AuthError::CodeExpired);
        let response = error_response(&error, Language::Spanish);
        assert_eq!(response.status(), StatusCode::GONE);
    }

    #[test]
    fn test_rate_limit_message_substitutes_minutes() {
        let error = DomainError::Auth(AuthError::RateLimitExceeded { minutes: 15 });
        let response = error_response(&error, Language::English);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_domain_validation_error_is_field_keyed() {
        let error = DomainError::ValidationErr(ValidationError::InvalidWorkspaceUrl);
        let response = error_response(&error, Language::English);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_database_error_is_masked() {
        let error = DomainError::Database {
            message: "connection refused on 10.0.0.5".to_string(),
        };
        let response = error_response(&error, Language::English);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
