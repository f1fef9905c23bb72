//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain
//! record types. Domain types stay out of this layer; the adapters in
//! [`crate::adapters`] do that translation.
//!
//! Queries are built at runtime with `QueryBuilder` so the crate compiles
//! without a live database.

pub mod claims;

pub use claims::ClaimsRepository;
