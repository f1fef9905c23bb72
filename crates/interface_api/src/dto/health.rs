//! Health DTOs

use serde::Serialize;

/// Liveness acknowledgement
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Readiness of the claims store
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub store: String,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub version: &'static str,
}
