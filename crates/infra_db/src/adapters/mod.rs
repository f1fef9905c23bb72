//! Domain Adapters
//!
//! Implementations of domain ports on top of the repository layer. Each
//! adapter translates between domain models and row types and maps
//! `DatabaseError` onto `PortError`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimsAdapter;
//! use domain_claims::{ClaimService, ClaimsPort};
//! use std::sync::Arc;
//!
//! let adapter: Arc<dyn ClaimsPort> = Arc::new(PostgresClaimsAdapter::new(pool));
//! let service = ClaimService::new(adapter);
//! ```

pub mod claims;

pub use claims::PostgresClaimsAdapter;
