//! Health probe.

use axum::Json;

use crate::dto::{ApiResponse, HealthResponse};

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    let body = HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    Json(ApiResponse::ok(body))
}
