//! HTTP API Layer
//!
//! The REST surface of the claim intake service, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claims, health and docs endpoints
//! - **Middleware**: request ids, tracing, request logging, CORS
//! - **DTOs**: response bodies owned by this layer
//! - **Error Handling**: `VALIDATION_ERROR` / `NOT_FOUND` / `INTERNAL_ERROR` bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(service, config));
//! axum::serve(listener, app).await?;
//! ```

// The OpenAPI document is one large `json!` literal.
#![recursion_limit = "256"]

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use domain_claims::ClaimService;

use crate::config::ApiConfig;
use crate::handlers::{claims, docs, health};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimService,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(claims: ClaimService, config: ApiConfig) -> Self {
        Self { claims, config }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/docs", get(docs::swagger_ui))
        .route("/docs/openapi.json", get(docs::openapi_spec))
        .route("/claims", post(claims::create_claim).get(claims::list_claims))
        .route("/claims/:id", get(claims::get_claim))
        .layer(
            // Outermost first. CORS sits inside tracing so it wraps a plain body.
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum_middleware::from_fn(request_log_middleware)),
        )
        .with_state(state)
}

/// CORS restricted to the configured front-end origins
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
