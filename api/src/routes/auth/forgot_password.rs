//! Forgot-password endpoint

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::ApiEnvelope;

use crate::dto::auth::EmailRequest;
use crate::handlers::error::{error_response, request_language, validation_response};
use crate::i18n::localized;
use crate::routes::workspace_url_header;
use crate::state::AppState;

/// POST /api/v1/auth/forgot-password
///
/// Sends a password-reset code. Same no-reveal contract as the
/// resend-verification endpoint.
pub async fn forgot_password<W, U, M, C, E, R, S>(
    state: web::Data<AppState<W, U, M, C, E, R, S>>,
    req: HttpRequest,
    body: web::Json<EmailRequest>,
) -> HttpResponse
where
    W: WorkspaceRepository + 'static,
    U: UserRepository + 'static,
    M: MailerTrait + 'static,
    C: CodeRepository + 'static,
    E: EmailLogRepository + 'static,
    R: RateLimiterTrait + 'static,
    S: SessionStoreTrait + 'static,
{
    let language = request_language(&req);
    let workspace_url = match workspace_url_header(&req, language) {
        Ok(url) => url,
        Err(response) => return response,
    };

    if let Err(errors) = body.validate() {
        return validation_response(&errors, language);
    }

    match state.auth.forgot_password(&workspace_url, &body.email).await {
        Ok(()) => {
            let (_, message) = localized("success", "code_sent", language);
            HttpResponse::Ok().json(ApiEnvelope::<serde_json::Value>::ok_empty(message))
        }
        Err(error) => error_response(&error, language),
    }
}
