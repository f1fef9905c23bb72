//! Claims API Server Binary
//!
//! Starts the HTTP API for claim intake.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store on port 3000
//! cargo run --bin claims-api
//!
//! # PostgreSQL store, JSON logs
//! API_STORE=postgres API_DATABASE_URL=postgres://... API_LOG_JSON=true cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 3000)
//! * `API_STORE` - `memory` or `postgres` (default: memory)
//! * `API_DATABASE_URL` - PostgreSQL connection string, falls back to `DATABASE_URL`
//! * `API_DB_MAX_CONNECTIONS` / `API_DB_MIN_CONNECTIONS` - Pool size (default: 10 / 1)
//! * `API_DB_ACQUIRE_TIMEOUT_SECS` / `API_DB_IDLE_TIMEOUT_SECS` - Pool timeouts (default: 5 / 600)
//! * `API_LOG_LEVEL` - Log level or filter directive (default: info); `RUST_LOG` wins if set
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `API_CORS_ORIGINS` - Comma-separated allowed origins

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{ClaimService, ClaimsPort, InMemoryClaimsStore};
use infra_db::{create_pool, run_migrations, PostgresClaimsAdapter};
use interface_api::config::{ApiConfig, StoreBackend};
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the claims store and
/// starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let mut config = ApiConfig::from_env().context("invalid API_* configuration")?;
    if std::env::var("API_DATABASE_URL").is_err() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
    }

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store,
        "Starting Claims API Server"
    );

    let store = build_store(&config).await?;
    let app = create_router(AppState::new(ClaimService::new(store), config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured claims store
async fn build_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn ClaimsPort>> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory claims store; data is lost on restart");
            Ok(Arc::new(InMemoryClaimsStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = create_pool(config.database())
                .await
                .context("could not connect to PostgreSQL")?;
            run_migrations(&pool).await.context("could not apply migrations")?;
            Ok(Arc::new(PostgresClaimsAdapter::new(pool)))
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
