//! Claim submission validation rules
//!
//! One rule set serves every surface: the HTTP service validates raw JSON
//! bodies authoritatively, and the client re-runs the same rules over its
//! form state for immediate feedback.
//!
//! # Rules
//!
//! | Field          | Rule                                         |
//! |----------------|----------------------------------------------|
//! | `lob`          | one of Personal Auto, Homeowners, Commercial |
//! | `policyNumber` | 3-50 characters                              |
//! | `insuredName`  | 2-120 characters                             |
//! | `lossDate`     | `YYYY-MM-DD`, a real date, not after today   |
//! | `lossType`     | 2-60 characters                              |
//! | `description`  | 5-2000 characters                            |
//! | `contactEmail` | email shape                                  |
//! | `priority`     | one of LOW, MEDIUM, HIGH                     |
//!
//! Validation runs in two phases. Every field is first checked for presence,
//! type, length and shape, and all failures are reported together. The
//! future-date rule only runs once that phase is clean.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use validator::ValidateEmail;

use crate::claim::{ClaimStatus, Lob, NewClaim, NewClaimEvent, Priority};
use crate::claim_number::ClaimNumber;

/// A field of the claim submission form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Lob,
    PolicyNumber,
    InsuredName,
    LossDate,
    LossType,
    Description,
    ContactEmail,
    Priority,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Lob,
        Field::PolicyNumber,
        Field::InsuredName,
        Field::LossDate,
        Field::LossType,
        Field::Description,
        Field::ContactEmail,
        Field::Priority,
    ];

    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            Field::Lob => "lob",
            Field::PolicyNumber => "policyNumber",
            Field::InsuredName => "insuredName",
            Field::LossDate => "lossDate",
            Field::LossType => "lossType",
            Field::Description => "description",
            Field::ContactEmail => "contactEmail",
            Field::Priority => "priority",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Inclusive character bounds for free-text fields
    pub fn length_bounds(&self) -> Option<(usize, usize)> {
        match self {
            Field::PolicyNumber => Some((3, 50)),
            Field::InsuredName => Some((2, 120)),
            Field::LossType => Some((2, 60)),
            Field::Description => Some((5, 2000)),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Machine-readable kind of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    Required,
    InvalidType,
    TooShort,
    TooLong,
    InvalidFormat,
    InvalidEmail,
    InvalidEnum,
    FutureDate,
    InvalidBody,
}

/// A single field-level problem with a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Path to the offending value; empty for the body itself
    pub path: Vec<String>,
    pub message: String,
    pub code: ViolationCode,
}

impl Violation {
    pub(crate) fn new(field: Field, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.key().to_string()],
            message: message.into(),
            code,
        }
    }

    fn body(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
            code: ViolationCode::InvalidBody,
        }
    }

    /// The form field this violation points at, if any
    pub fn field(&self) -> Option<Field> {
        self.path.first().and_then(|key| Field::from_key(key))
    }
}

/// Every violation found in a submission, in field order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// A body-level failure, e.g. a payload that is not JSON
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self(vec![Violation::body(message)])
    }

    pub fn issues(&self) -> &[Violation] {
        &self.0
    }

    pub fn into_issues(self) -> Vec<Violation> {
        self.0
    }

    pub fn first(&self) -> Option<&Violation> {
        self.0.first()
    }

    pub fn for_field(&self, field: Field) -> Option<&Violation> {
        self.0.iter().find(|v| v.field() == Some(field))
    }

    pub fn has(&self, field: Field, code: ViolationCode) -> bool {
        self.0.iter().any(|v| v.field() == Some(field) && v.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| match v.path.first() {
                Some(key) => format!("{}: {}", key, v.message),
                None => v.message.clone(),
            })
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A claim submission as entered on a form: every field is text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSubmission {
    pub lob: String,
    pub policy_number: String,
    pub insured_name: String,
    pub loss_date: String,
    pub loss_type: String,
    pub description: String,
    pub contact_email: String,
    pub priority: String,
}

impl Default for ClaimSubmission {
    /// A blank form: first line of business, medium priority, empty text
    fn default() -> Self {
        Self {
            lob: Lob::PersonalAuto.as_str().to_string(),
            policy_number: String::new(),
            insured_name: String::new(),
            loss_date: String::new(),
            loss_type: String::new(),
            description: String::new(),
            contact_email: String::new(),
            priority: Priority::Medium.as_str().to_string(),
        }
    }
}

impl ClaimSubmission {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Lob => &self.lob,
            Field::PolicyNumber => &self.policy_number,
            Field::InsuredName => &self.insured_name,
            Field::LossDate => &self.loss_date,
            Field::LossType => &self.loss_type,
            Field::Description => &self.description,
            Field::ContactEmail => &self.contact_email,
            Field::Priority => &self.priority,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Lob => &mut self.lob,
            Field::PolicyNumber => &mut self.policy_number,
            Field::InsuredName => &mut self.insured_name,
            Field::LossDate => &mut self.loss_date,
            Field::LossType => &mut self.loss_type,
            Field::Description => &mut self.description,
            Field::ContactEmail => &mut self.contact_email,
            Field::Priority => &mut self.priority,
        }
    }
}

/// A submission that passed every rule, with typed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedClaim {
    pub lob: Lob,
    pub policy_number: String,
    pub insured_name: String,
    pub loss_date: NaiveDate,
    pub loss_type: String,
    pub description: String,
    pub contact_email: String,
    pub priority: Priority,
}

impl ValidatedClaim {
    /// Store input for a freshly submitted claim
    pub fn into_new_claim(self, claim_number: ClaimNumber) -> NewClaim {
        NewClaim {
            claim_number,
            lob: self.lob,
            policy_number: self.policy_number,
            insured_name: self.insured_name,
            loss_date: self.loss_date,
            loss_type: self.loss_type,
            description: self.description,
            contact_email: self.contact_email,
            priority: self.priority,
            status: ClaimStatus::Submitted,
            initial_event: NewClaimEvent::submitted(),
        }
    }
}

/// How a field arrived in the payload
#[derive(Debug, Clone, Copy)]
enum Input<'a> {
    Missing,
    WrongType,
    Text(&'a str),
}

/// Validates a typed submission
pub fn validate_submission(
    submission: &ClaimSubmission,
    today: NaiveDate,
) -> Result<ValidatedClaim, ValidationErrors> {
    run(|field| Input::Text(submission.value(field)), today)
}

/// Validates a raw JSON body
///
/// Missing keys report `REQUIRED`, non-string values `INVALID_TYPE`, and a
/// body that is not an object a single body-level violation. Unknown keys are
/// ignored.
pub fn validate_json(body: &Value, today: NaiveDate) -> Result<ValidatedClaim, ValidationErrors> {
    let Some(object) = body.as_object() else {
        return Err(ValidationErrors::invalid_body("Request body must be a JSON object."));
    };

    run(
        |field| match object.get(field.key()) {
            None | Some(Value::Null) => Input::Missing,
            Some(Value::String(s)) => Input::Text(s),
            Some(_) => Input::WrongType,
        },
        today,
    )
}

/// Checks a single field value, including the future-date rule
///
/// Used for per-field feedback while a form is being filled in.
pub fn check_field(field: Field, value: &str, today: NaiveDate) -> Option<Violation> {
    match field {
        Field::LossDate => match shape(Field::LossDate, Input::Text(value), parse_loss_date) {
            Ok(date) => not_in_future(date, today).err(),
            Err(violation) => Some(violation),
        },
        Field::Lob => shape(field, Input::Text(value), parse_lob).err(),
        Field::Priority => shape(field, Input::Text(value), parse_priority).err(),
        Field::ContactEmail => shape(field, Input::Text(value), parse_email).err(),
        _ => shape(field, Input::Text(value), |v| bounded_text(field, v)).err(),
    }
}

fn run<'a, F>(input: F, today: NaiveDate) -> Result<ValidatedClaim, ValidationErrors>
where
    F: Fn(Field) -> Input<'a>,
{
    let mut violations = Vec::new();
    let v = &mut violations;

    let lob = keep(v, shape(Field::Lob, input(Field::Lob), parse_lob));
    let policy_number = keep(v, text_field(Field::PolicyNumber, input(Field::PolicyNumber)));
    let insured_name = keep(v, text_field(Field::InsuredName, input(Field::InsuredName)));
    let loss_date = keep(v, shape(Field::LossDate, input(Field::LossDate), parse_loss_date));
    let loss_type = keep(v, text_field(Field::LossType, input(Field::LossType)));
    let description = keep(v, text_field(Field::Description, input(Field::Description)));
    let contact_email = keep(v, shape(Field::ContactEmail, input(Field::ContactEmail), parse_email));
    let priority = keep(v, shape(Field::Priority, input(Field::Priority), parse_priority));

    let (
        Some(lob),
        Some(policy_number),
        Some(insured_name),
        Some(loss_date),
        Some(loss_type),
        Some(description),
        Some(contact_email),
        Some(priority),
    ) = (lob, policy_number, insured_name, loss_date, loss_type, description, contact_email, priority)
    else {
        return Err(ValidationErrors::new(violations));
    };

    not_in_future(loss_date, today).map_err(|v| ValidationErrors::new(vec![v]))?;

    Ok(ValidatedClaim {
        lob,
        policy_number,
        insured_name,
        loss_date,
        loss_type,
        description,
        contact_email,
        priority,
    })
}

fn keep<T>(violations: &mut Vec<Violation>, result: Result<T, Violation>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

/// Presence and type checks shared by every field, then the field's own rule
fn shape<T>(
    field: Field,
    input: Input<'_>,
    rule: impl FnOnce(&str) -> Result<T, Violation>,
) -> Result<T, Violation> {
    match input {
        Input::Missing => Err(Violation::new(field, ViolationCode::Required, "This field is required.")),
        Input::WrongType => Err(Violation::new(field, ViolationCode::InvalidType, "Expected a string.")),
        Input::Text("") => Err(Violation::new(field, ViolationCode::Required, "This field is required.")),
        Input::Text(value) => rule(value),
    }
}

fn text_field(field: Field, input: Input<'_>) -> Result<String, Violation> {
    shape(field, input, |value| bounded_text(field, value))
}

fn bounded_text(field: Field, value: &str) -> Result<String, Violation> {
    let Some((min, max)) = field.length_bounds() else {
        return Ok(value.to_string());
    };

    let len = value.chars().count();
    if len < min {
        Err(Violation::new(field, ViolationCode::TooShort, format!("Must be at least {} characters.", min)))
    } else if len > max {
        Err(Violation::new(field, ViolationCode::TooLong, format!("Must be at most {} characters.", max)))
    } else {
        Ok(value.to_string())
    }
}

fn parse_lob(value: &str) -> Result<Lob, Violation> {
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = Lob::ALL.iter().map(|l| l.as_str()).collect();
        Violation::new(Field::Lob, ViolationCode::InvalidEnum, format!("Must be one of: {}.", allowed.join(", ")))
    })
}

fn parse_priority(value: &str) -> Result<Priority, Violation> {
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
        Violation::new(Field::Priority, ViolationCode::InvalidEnum, format!("Must be one of: {}.", allowed.join(", ")))
    })
}

/// RFC 5322 shape plus a dotted domain, so `a@b` is rejected
fn parse_email(value: &str) -> Result<String, Violation> {
    if value.validate_email() && has_dotted_domain(value) {
        Ok(value.to_string())
    } else {
        Err(Violation::new(Field::ContactEmail, ViolationCode::InvalidEmail, "Enter a valid email address."))
    }
}

fn has_dotted_domain(value: &str) -> bool {
    let Some((_, domain)) = value.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// Exactly `YYYY-MM-DD` and a date that exists on the calendar
fn parse_loss_date(value: &str) -> Result<NaiveDate, Violation> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    shaped
        .then(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| {
            Violation::new(Field::LossDate, ViolationCode::InvalidFormat, "Must be a valid date in YYYY-MM-DD format.")
        })
}

fn not_in_future(loss_date: NaiveDate, today: NaiveDate) -> Result<(), Violation> {
    if loss_date > today {
        Err(Violation::new(Field::LossDate, ViolationCode::FutureDate, "Loss date cannot be in the future."))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn body() -> Value {
        json!({
            "lob": "Homeowners",
            "policyNumber": "HO-0001",
            "insuredName": "Alex Rivers",
            "lossDate": "2026-02-14",
            "lossType": "Water Damage",
            "description": "Kitchen leak caused cabinet and floor damage.",
            "contactEmail": "alex@example.com",
            "priority": "HIGH"
        })
    }

    #[test]
    fn test_valid_body() {
        let claim = validate_json(&body(), today()).unwrap();
        assert_eq!(claim.lob, Lob::Homeowners);
        assert_eq!(claim.priority, Priority::High);
        assert_eq!(claim.loss_date, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
    }

    #[test]
    fn test_loss_date_today_is_allowed() {
        let mut b = body();
        b["lossDate"] = json!("2026-03-10");
        assert!(validate_json(&b, today()).is_ok());
    }

    #[test]
    fn test_future_date_rejected() {
        let mut b = body();
        b["lossDate"] = json!("2026-03-11");
        let errors = validate_json(&b, today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has(Field::LossDate, ViolationCode::FutureDate));
    }

    #[test]
    fn test_schema_errors_suppress_future_date_rule() {
        let mut b = body();
        b["lossDate"] = json!("2027-01-01");
        b["policyNumber"] = json!("HO");
        let errors = validate_json(&b, today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has(Field::PolicyNumber, ViolationCode::TooShort));
    }

    #[test]
    fn test_reports_every_violation_in_field_order() {
        let errors = validate_json(&json!({ "priority": 3, "lob": "Marine" }), today()).unwrap_err();
        let fields: Vec<Field> = errors.issues().iter().filter_map(|v| v.field()).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        assert!(errors.has(Field::Lob, ViolationCode::InvalidEnum));
        assert!(errors.has(Field::Priority, ViolationCode::InvalidType));
        assert!(errors.has(Field::Description, ViolationCode::Required));
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_json(&json!([1, 2]), today()).unwrap_err();
        assert_eq!(errors.first().unwrap().code, ViolationCode::InvalidBody);
        assert!(errors.first().unwrap().path.is_empty());
    }

    #[test]
    fn test_impossible_calendar_date() {
        let mut b = body();
        b["lossDate"] = json!("2026-02-30");
        let errors = validate_json(&b, today()).unwrap_err();
        assert!(errors.has(Field::LossDate, ViolationCode::InvalidFormat));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut b = body();
        b["insuredName"] = json!("Zoë");
        assert!(validate_json(&b, today()).is_ok());
        b["insuredName"] = json!("é".repeat(121));
        let errors = validate_json(&b, today()).unwrap_err();
        assert!(errors.has(Field::InsuredName, ViolationCode::TooLong));
    }

    #[test]
    fn test_check_field_flags_future_date() {
        let violation = check_field(Field::LossDate, "2030-01-01", today()).unwrap();
        assert_eq!(violation.code, ViolationCode::FutureDate);
        assert!(check_field(Field::LossDate, "2026-01-01", today()).is_none());
        assert!(check_field(Field::ContactEmail, "not-an-email", today()).is_some());
    }

    #[test]
    fn test_blank_form_fails_required_fields_only() {
        let errors = validate_submission(&ClaimSubmission::default(), today()).unwrap_err();
        assert!(errors.for_field(Field::Lob).is_none());
        assert!(errors.for_field(Field::Priority).is_none());
        assert_eq!(errors.len(), 6);
        assert!(errors.issues().iter().all(|v| v.code == ViolationCode::Required));
    }

    #[test]
    fn test_email_requires_dotted_domain() {
        for bad in ["a@b", "alex@localhost", "alex@example.", "alex@example.c0m"] {
            let violation = check_field(Field::ContactEmail, bad, today());
            assert_eq!(violation.map(|v| v.code), Some(ViolationCode::InvalidEmail), "{bad}");
        }
        assert!(check_field(Field::ContactEmail, "alex.rivers@mail.example.co", today()).is_none());
    }

    #[test]
    fn test_validation_errors_box_as_std_error() {
        let errors = validate_json(&json!({}), today()).unwrap_err();
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(errors);
        assert!(boxed.to_string().contains("lob"));
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = validate_json(&json!({}), today()).unwrap_err();
        assert!(errors.to_string().starts_with("lob: This field is required."));
    }
}
