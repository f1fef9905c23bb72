//! Test Data Builders
//!
//! Builders let tests state only the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::ClaimId;
use domain_claims::{
    Claim, ClaimDetail, ClaimNumber, ClaimStatus, ClaimSubmission, Lob, Priority,
    ValidatedClaim,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::Value;

use crate::fixtures::SubmissionFixtures;

/// Builder for claim submissions, starting from a valid one
#[derive(Debug, Clone)]
pub struct ClaimSubmissionBuilder {
    submission: ClaimSubmission,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    /// Starts from the Alex Rivers homeowners submission
    pub fn new() -> Self {
        Self {
            submission: SubmissionFixtures::alex_rivers(),
        }
    }

    /// Starts from a valid submission with a random insured and email
    pub fn random() -> Self {
        let mut builder = Self::new();
        builder.submission.insured_name = Name().fake();
        builder.submission.contact_email = SafeEmail().fake();
        builder
    }

    pub fn lob(mut self, lob: impl Into<String>) -> Self {
        self.submission.lob = lob.into();
        self
    }

    pub fn policy_number(mut self, value: impl Into<String>) -> Self {
        self.submission.policy_number = value.into();
        self
    }

    pub fn insured_name(mut self, value: impl Into<String>) -> Self {
        self.submission.insured_name = value.into();
        self
    }

    pub fn loss_date(mut self, value: impl Into<String>) -> Self {
        self.submission.loss_date = value.into();
        self
    }

    pub fn loss_type(mut self, value: impl Into<String>) -> Self {
        self.submission.loss_type = value.into();
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.submission.description = value.into();
        self
    }

    pub fn contact_email(mut self, value: impl Into<String>) -> Self {
        self.submission.contact_email = value.into();
        self
    }

    pub fn priority(mut self, value: impl Into<String>) -> Self {
        self.submission.priority = value.into();
        self
    }

    pub fn build(self) -> ClaimSubmission {
        self.submission
    }

    /// Builds the JSON body, optionally dropping some keys
    pub fn build_json_without(self, missing: &[&str]) -> Value {
        let mut body = SubmissionFixtures::as_json(&self.submission);
        if let Value::Object(map) = &mut body {
            for key in missing {
                map.remove(*key);
            }
        }
        body
    }

    pub fn build_json(self) -> Value {
        self.build_json_without(&[])
    }
}

/// Builder for claims already in a store, for seeding list tests
#[derive(Debug, Clone)]
pub struct StoredClaimBuilder {
    claim_number: ClaimNumber,
    insured_name: String,
    policy_number: String,
    lob: Lob,
    priority: Priority,
    status: ClaimStatus,
    assigned_to: Option<String>,
    loss_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Default for StoredClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoredClaimBuilder {
    pub fn new() -> Self {
        Self {
            claim_number: ClaimNumber::generate_now(),
            insured_name: Name().fake(),
            policy_number: "PA-000001".to_string(),
            lob: Lob::PersonalAuto,
            priority: Priority::Medium,
            status: ClaimStatus::Submitted,
            assigned_to: None,
            loss_date: NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date"),
            created_at: Utc::now(),
        }
    }

    pub fn claim_number(mut self, number: &str) -> Self {
        self.claim_number = number.parse().expect("well-formed claim number");
        self
    }

    pub fn insured_name(mut self, value: impl Into<String>) -> Self {
        self.insured_name = value.into();
        self
    }

    pub fn policy_number(mut self, value: impl Into<String>) -> Self {
        self.policy_number = value.into();
        self
    }

    pub fn lob(mut self, lob: Lob) -> Self {
        self.lob = lob;
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn assigned_to(mut self, adjuster: impl Into<String>) -> Self {
        self.assigned_to = Some(adjuster.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn build(self) -> ClaimDetail {
        let validated = ValidatedClaim {
            lob: self.lob,
            policy_number: self.policy_number,
            insured_name: self.insured_name,
            loss_date: self.loss_date,
            loss_type: "Collision".to_string(),
            description: "Seeded claim for list tests.".to_string(),
            contact_email: SafeEmail().fake(),
            priority: self.priority,
        };
        let mut new_claim = validated.into_new_claim(self.claim_number);
        new_claim.status = self.status;

        let mut detail = new_claim.into_detail(ClaimId::new_v7(), self.created_at);
        detail.claim.assigned_to = self.assigned_to;
        detail
    }

    /// The list projection of the built claim
    pub fn build_claim(self) -> Claim {
        self.build().claim
    }
}
