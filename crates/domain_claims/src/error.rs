//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;
use crate::validation::ValidationErrors;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Malformed claim number: {0}")]
    MalformedClaimNumber(String),

    #[error("Could not allocate a unique claim number after {attempts} attempts")]
    ClaimNumberExhausted { attempts: u32 },

    #[error("Claims store error: {0}")]
    Store(#[from] PortError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, Violation, ViolationCode};
    use std::error::Error as _;

    #[test]
    fn test_claim_error_boxes_with_source() {
        let violations = ValidationErrors::new(vec![Violation::new(
            Field::PolicyNumber,
            ViolationCode::TooShort,
            "Must be at least 3 characters.",
        )]);
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(ClaimError::from(violations));

        assert!(boxed.to_string().starts_with("Validation failed: policyNumber"));
        assert!(boxed.source().is_some());
    }

    #[test]
    fn test_store_error_keeps_port_error_as_source() {
        let err = ClaimError::from(PortError::connection("refused"));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("Connection error: refused"));
    }
}
