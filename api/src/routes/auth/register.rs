//! Workspace registration endpoint

use std::str::FromStr;

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{
    RateLimiterTrait, SessionStoreTrait, WorkspaceRegistration,
};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::{ApiEnvelope, Language};

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::{error_response, request_language, validation_response};
use crate::i18n::localized;
use crate::state::AppState;

/// POST /api/v1/auth/register
///
/// Creates the workspace and its owner account in one transaction and
/// sends the email-verification code. Responds 201 with the new
/// workspace identity; the owner signs in only after verifying.
pub async fn register<W, U, M, C, E, R, S>(
    state: web::Data<AppState<W, U, M, C, E, R, S>>,
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
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

    if let Err(errors) = body.validate() {
        return validation_response(&errors, language);
    }

    let body = body.into_inner();
    let preferred_language = match body.language.as_deref() {
        Some(code) => match Language::from_str(code) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                return error_response(
                    &ts_core::errors::ValidationError::InvalidFormat {
                        field: "language".to_string(),
                    }
                    .into(),
                    language,
                );
            }
        },
        None => None,
    };

    let registration = WorkspaceRegistration {
        workspace_name: body.workspace_name,
        workspace_url: body.workspace_url,
        email: body.email,
        password: body.password,
        first_name: body.first_name,
        last_name: body.last_name,
        language: preferred_language,
    };

    match state.auth.register_workspace(registration).await {
        Ok(workspace) => {
            let (status, message) = localized("success", "registered", language);
            HttpResponse::Created().json(
                ApiEnvelope::ok(
                    message,
                    RegisterResponse {
                        workspace_id: workspace.id,
                        workspace_url: workspace.workspace_url,
                        name: workspace.name,
                    },
                )
                .with_status(status),
            )
        }
        Err(error) => error_response(&error, language),
    }
}
