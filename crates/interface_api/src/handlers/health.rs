//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::dto::health::{HealthResponse, ReadinessResponse};
use crate::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Readiness check (includes the claims store)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let health = state.claims.store_health().await;
    let (status, label) = if health.is_serving() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(ReadinessResponse {
            status: label,
            store: health.adapter_id,
            latency_ms: health.latency_ms,
            message: health.message,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
