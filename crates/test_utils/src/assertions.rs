//! Custom Test Assertions
//!
//! Assertion helpers for claim types that give more meaningful failure
//! messages than bare `assert!`.

use domain_claims::{Claim, ClaimNumber, Field, ValidationErrors, ViolationCode};
use serde_json::Value;

/// Asserts that a value has the `CLM-dddd-dddddd` shape
pub fn assert_claim_number_format(value: &str) {
    assert!(
        ClaimNumber::is_well_formed(value),
        "Expected claim number matching CLM-YYYY-NNNNNN, got {:?}",
        value
    );
}

/// Asserts that a specific violation was reported
pub fn assert_violation(errors: &ValidationErrors, field: Field, code: ViolationCode) {
    assert!(
        errors.has(field, code),
        "Expected {:?} on {}, got: {}",
        code,
        field,
        errors
    );
}

/// Asserts that a `VALIDATION_ERROR` response body has an issue for a field
pub fn assert_issue_for(body: &Value, field_key: &str) {
    assert_eq!(body["error"], "VALIDATION_ERROR", "Unexpected body: {}", body);
    let issues = body["issues"].as_array().expect("issues array");
    assert!(
        issues.iter().any(|issue| issue["path"][0] == field_key),
        "Expected an issue for {}, got: {}",
        field_key,
        body
    );
}

/// Asserts that claims are ordered newest `created_at` first
pub fn assert_newest_first(claims: &[Claim]) {
    for pair in claims.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "Claims out of order: {} ({}) before {} ({})",
            pair[0].claim_number,
            pair[0].created_at,
            pair[1].claim_number,
            pair[1].created_at
        );
    }
}
