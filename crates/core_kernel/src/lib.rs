//! Core Kernel - Foundational types for the claim intake system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for claims and claim events
//! - The kernel error type
//! - Port infrastructure (errors, marker traits, health checks) used by the
//!   storage adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{ClaimId, ClaimEventId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
