//! Route handlers
//!
//! Handlers are thin: extract and validate input, call the auth service,
//! translate the result into the response envelope. Workspace resolution
//! is driven by the `X-Workspace-Url` header that the tenant front-end
//! derives from its subdomain.

pub mod auth;
pub mod health;
pub mod workspace;

use actix_web::{HttpRequest, HttpResponse};

use ts_core::errors::ValidationError;
use ts_shared::types::Language;

use crate::handlers::error::error_response;

pub(crate) const WORKSPACE_URL_HEADER: &str = "X-Workspace-Url";

/// The workspace slug for this request, from the `X-Workspace-Url` header
pub(crate) fn workspace_url_header(
    req: &HttpRequest,
    language: Language,
) -> Result<String, HttpResponse> {
    req.headers()
        .get(WORKSPACE_URL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            error_response(
                &ValidationError::RequiredField {
                    field: "workspace_url".to_string(),
                }
                .into(),
                language,
            )
        })
}

/// The client IP, honouring X-Forwarded-For when actix trusts the peer
pub(crate) fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.split(':').next().unwrap_or(addr).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
