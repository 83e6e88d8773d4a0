//! Liveness endpoint

use actix_web::HttpResponse;

use ts_shared::types::ApiEnvelope;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiEnvelope::ok(
        "OK",
        serde_json::json!({
            "status": "healthy",
            "service": "teamspace-api",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    ))
}
