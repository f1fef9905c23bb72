//! API configuration
//!
//! Read from `API_*` environment variables through the `config` crate. Every
//! key has a default, so an empty environment yields a working local setup.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use infra_db::DatabaseConfig;

/// Which claims store the server runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store; data is lost on restart
    #[default]
    Memory,
    /// PostgreSQL at `database_url`
    Postgres,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Claims store backend
    pub store: StoreBackend,
    /// Database URL, used when `store` is `postgres`
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_idle_timeout_secs: u64,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            store: StoreBackend::Memory,
            database_url: "postgres://localhost/claims".to_string(),
            db_max_connections: 10,
            db_min_connections: 1,
            db_acquire_timeout_secs: 5,
            db_idle_timeout_secs: 600,
            log_level: "info".to_string(),
            log_json: false,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:4200".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Loads configuration from an explicit set of variables
    ///
    /// Keys are full variable names, e.g. `API_PORT`.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .source(vars),
            )
            .build()?
            .try_deserialize()
    }

    /// Pool settings for the PostgreSQL store
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.db_idle_timeout_secs))
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
