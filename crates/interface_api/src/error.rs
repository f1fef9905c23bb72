//! API error handling
//!
//! Three outcomes reach a client: `VALIDATION_ERROR` (400, with issues),
//! `NOT_FOUND` (404) and `INTERNAL_ERROR` (500). Internal details are logged
//! and never put on the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_claims::{ClaimError, ValidationErrors, Violation};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Violation>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => ErrorResponse {
                error: "VALIDATION_ERROR",
                issues: Some(errors.into_issues()),
            },
            ApiError::NotFound(_) => ErrorResponse {
                error: "NOT_FOUND",
                issues: None,
            },
            ApiError::Internal(detail) => {
                error!(%detail, "Request failed");
                ErrorResponse {
                    error: "INTERNAL_ERROR",
                    issues: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(errors) => ApiError::Validation(errors),
            ClaimError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
