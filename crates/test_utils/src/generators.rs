//! Property-Based Test Generators
//!
//! Proptest strategies for claim submissions that respect, or deliberately
//! break, the validation rules.

use chrono::{Days, NaiveDate};
use domain_claims::{ClaimSubmission, Lob, Priority};
use proptest::prelude::*;

/// Strategy for a line-of-business wire value
pub fn lob_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(Lob::ALL.to_vec()).prop_map(|lob| lob.as_str().to_string())
}

/// Strategy for a priority wire value
pub fn priority_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(Priority::ALL.to_vec()).prop_map(|p| p.as_str().to_string())
}

/// Text whose character count lies in `min..=max`
pub fn text_strategy(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('a', 'z'), min..=max)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A `YYYY-MM-DD` date up to ten years before `today`, or `today` itself
pub fn past_date_strategy(today: NaiveDate) -> impl Strategy<Value = String> {
    (0u64..3650).prop_map(move |back| {
        (today - Days::new(back)).format("%Y-%m-%d").to_string()
    })
}

/// A `YYYY-MM-DD` date strictly after `today`
pub fn future_date_strategy(today: NaiveDate) -> impl Strategy<Value = String> {
    (1u64..3650).prop_map(move |ahead| {
        (today + Days::new(ahead)).format("%Y-%m-%d").to_string()
    })
}

/// A plausible email address
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,12}", "[a-z]{2,10}", prop::sample::select(vec!["com", "org", "net", "io"]))
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// A submission that passes every rule relative to `today`
pub fn valid_submission_strategy(today: NaiveDate) -> impl Strategy<Value = ClaimSubmission> {
    (
        lob_strategy(),
        text_strategy(3, 50),
        text_strategy(2, 120),
        past_date_strategy(today),
        text_strategy(2, 60),
        text_strategy(5, 300),
        email_strategy(),
        priority_strategy(),
    )
        .prop_map(
            |(lob, policy_number, insured_name, loss_date, loss_type, description, contact_email, priority)| {
                ClaimSubmission {
                    lob,
                    policy_number,
                    insured_name,
                    loss_date,
                    loss_type,
                    description,
                    contact_email,
                    priority,
                }
            },
        )
}
