//! Email verification endpoint

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::ApiEnvelope;

use crate::dto::auth::VerifyEmailRequest;
use crate::handlers::error::{error_response, request_language, validation_response};
use crate::i18n::localized;
use crate::routes::workspace_url_header;
use crate::state::AppState;

/// POST /api/v1/auth/verify-email
///
/// Consumes the emailed code and marks the account verified. An expired
/// code answers 410, a consumed one 409, anything else invalid 400.
pub async fn verify_email<W, U, M, C, E, R, S>(
    state: web::Data<AppState<W, U, M, C, E, R, S>>,
    req: HttpRequest,
    body: web::Json<VerifyEmailRequest>,
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

    match state
        .auth
        .verify_email(&workspace_url, &body.email, &body.code)
        .await
    {
        Ok(()) => {
            let (_, message) = localized("success", "email_verified", language);
            HttpResponse::Ok().json(ApiEnvelope::<serde_json::Value>::ok_empty(message))
        }
        Err(error) => error_response(&error, language),
    }
}
