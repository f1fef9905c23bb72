//! Claims handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::debug;

use domain_claims::{ClaimDetail, ClaimPage, ListQuery, ValidationErrors};

use crate::{error::ApiError, AppState};

/// Submits a new claim
///
/// A body that is not JSON is reported like any other validation failure,
/// as a single body-level issue.
pub async fn create_claim(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ClaimDetail>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected claim body");
        ApiError::Validation(ValidationErrors::invalid_body("Request body must be valid JSON."))
    })?;

    let detail = state.claims.submit(&body).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Lists claims
///
/// A repeated key keeps its first value. A query string that cannot be
/// decoded at all is treated as empty.
pub async fn list_claims(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ClaimPage>, ApiError> {
    let pairs = match pairs {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Unreadable claims query");
            Vec::new()
        }
    };
    let query = ListQuery::from_pairs(pairs);
    let page = state.claims.list(&query).await?;
    Ok(Json(page))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimDetail>, ApiError> {
    let detail = state.claims.get(&id).await?;
    Ok(Json(detail))
}
