//! Claim form state

use chrono::NaiveDate;
use std::collections::HashSet;

use domain_claims::validation::{check_field, validate_submission};
use domain_claims::{ClaimSubmission, Field, ValidatedClaim, ValidationErrors};

/// Field values plus which fields the user has visited
///
/// Errors for a field are only shown once it is touched, so a blank form
/// does not open covered in red.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimForm {
    values: ClaimSubmission,
    touched: HashSet<Field>,
}

impl ClaimForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &ClaimSubmission {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.value(field)
    }

    /// Updates a field without touching it
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.values.value_mut(field) = value.into();
    }

    /// Marks a field as visited, typically on blur
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(Field::ALL);
    }

    /// Message to show under a field, if touched and invalid
    pub fn field_error(&self, field: Field, today: NaiveDate) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        check_field(field, self.value(field), today).map(|v| v.message)
    }

    /// Runs the full rule set over the current values
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedClaim, ValidationErrors> {
        validate_submission(&self.values, today)
    }

    /// Back to a blank form with nothing touched
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
