//! Claim Intake Domain
//!
//! This crate implements the intake side of the claims lifecycle: accepting a
//! First Notice of Loss, assigning it a claim number, and serving it back.
//!
//! # Data Flow
//!
//! ```text
//! submission -> validation -> claim number -> ClaimsPort::create -> claim + first event
//! ```
//!
//! The validation rules are shared with the client crate, which runs them
//! for immediate feedback; the service always re-runs them.

pub mod claim;
pub mod claim_number;
pub mod validation;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod error;

pub use claim::{
    Claim, ClaimDetail, ClaimEvent, ClaimEventType, ClaimStatus, Lob, NewClaim, NewClaimEvent, Priority,
};
pub use claim_number::ClaimNumber;
pub use validation::{
    ClaimSubmission, Field, ValidatedClaim, ValidationErrors, Violation, ViolationCode,
};
pub use ports::{ClaimFilter, ClaimPage, ClaimsPort, ListQuery, PageRequest, PageWindow};
pub use adapters::InMemoryClaimsStore;
pub use service::ClaimService;
pub use error::ClaimError;
