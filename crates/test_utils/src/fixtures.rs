//! Pre-built Test Fixtures
//!
//! Ready-to-use submissions and dates. Dates are relative to the current UTC
//! day where a test depends on "today".

use chrono::{Days, NaiveDate, Utc};
use core_kernel::ClaimId;
use domain_claims::ClaimSubmission;
use serde_json::Value;
use uuid::Uuid;

/// Fixture for claim submissions
pub struct SubmissionFixtures;

impl SubmissionFixtures {
    /// Homeowners water-damage claim for Alex Rivers
    pub fn alex_rivers() -> ClaimSubmission {
        ClaimSubmission {
            lob: "Homeowners".to_string(),
            policy_number: "HO-0001".to_string(),
            insured_name: "Alex Rivers".to_string(),
            loss_date: "2026-02-14".to_string(),
            loss_type: "Water Damage".to_string(),
            description: "Kitchen leak caused cabinet and floor damage.".to_string(),
            contact_email: "alex@example.com".to_string(),
            priority: "HIGH".to_string(),
        }
    }

    /// Personal auto collision claim for Jordan Smith, loss yesterday
    pub fn jordan_smith() -> ClaimSubmission {
        ClaimSubmission {
            lob: "Personal Auto".to_string(),
            policy_number: "PA-123456".to_string(),
            insured_name: "Jordan Smith".to_string(),
            loss_date: TemporalFixtures::yesterday_iso(),
            loss_type: "Collision".to_string(),
            description: "Rear-ended at a stoplight. Minor bumper damage.".to_string(),
            contact_email: "jordan.smith@example.com".to_string(),
            priority: "MEDIUM".to_string(),
        }
    }

    /// Commercial claim for a business insured
    pub fn harbor_freight_co() -> ClaimSubmission {
        ClaimSubmission {
            lob: "Commercial".to_string(),
            policy_number: "CP-99-0042".to_string(),
            insured_name: "Harbor Freight Co".to_string(),
            loss_date: "2026-01-20".to_string(),
            loss_type: "Theft".to_string(),
            description: "Forklift stolen from the loading yard overnight.".to_string(),
            contact_email: "claims@harborfreight.example".to_string(),
            priority: "LOW".to_string(),
        }
    }

    /// The submission as a JSON request body
    pub fn as_json(submission: &ClaimSubmission) -> Value {
        serde_json::to_value(submission).expect("ClaimSubmission serializes")
    }
}

/// Fixture for dates relative to the current UTC day
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    pub fn yesterday_iso() -> String {
        (Self::today() - Days::new(1)).format("%Y-%m-%d").to_string()
    }

    pub fn today_iso() -> String {
        Self::today().format("%Y-%m-%d").to_string()
    }

    pub fn tomorrow_iso() -> String {
        (Self::today() + Days::new(1)).format("%Y-%m-%d").to_string()
    }

    /// A fixed reference day for tests that pin the clock
    pub fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A deterministic claim id that no store will ever assign
    pub fn unknown_claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").expect("valid uuid"))
    }
}
