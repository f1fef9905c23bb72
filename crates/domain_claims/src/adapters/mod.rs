//! Claims store adapters that live alongside the domain
//!
//! The PostgreSQL adapter lives in `infra_db`; the in-memory store here has
//! no infrastructure dependencies and backs the test suites and local runs.

pub mod memory;

pub use memory::InMemoryClaimsStore;
