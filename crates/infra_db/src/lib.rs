//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the claim intake service, using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. [`repositories`] holds the SQL;
//! [`adapters`] implements the domain's `ClaimsPort` on top of it, so the
//! service never sees a row type or a `sqlx::Error`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresClaimsAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresClaimsAdapter;
