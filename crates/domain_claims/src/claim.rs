//! Claim aggregate
//!
//! A claim is created once, together with its first audit event, and is not
//! mutated by any exposed operation afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, ClaimEventId};
use crate::claim_number::ClaimNumber;
use crate::error::ClaimError;

/// Line of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lob {
    #[serde(rename = "Personal Auto")]
    PersonalAuto,
    #[serde(rename = "Homeowners")]
    Homeowners,
    #[serde(rename = "Commercial")]
    Commercial,
}

impl Lob {
    pub const ALL: [Lob; 3] = [Lob::PersonalAuto, Lob::Homeowners, Lob::Commercial];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Lob::PersonalAuto => "Personal Auto",
            Lob::Homeowners => "Homeowners",
            Lob::Commercial => "Commercial",
        }
    }
}

/// Claim priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Received, not yet picked up
    Submitted,
    /// Handed to an adjuster
    Assigned,
    /// Being worked
    InReview,
    /// Finished
    Closed,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Submitted,
        ClaimStatus::Assigned,
        ClaimStatus::InReview,
        ClaimStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "SUBMITTED",
            ClaimStatus::Assigned => "ASSIGNED",
            ClaimStatus::InReview => "IN_REVIEW",
            ClaimStatus::Closed => "CLOSED",
        }
    }

    /// Forward lifecycle. Nothing in the intake surface moves a claim past
    /// `Submitted`; the table records where assignment work will plug in.
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, target),
            (Submitted, Assigned) |
            (Assigned, InReview) |
            (InReview, Closed) |
            (Submitted, Closed) |
            (Assigned, Closed)
        )
    }
}

/// Kind of audit event recorded against a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimEventType {
    StatusChanged,
    Assigned,
    Note,
}

impl ClaimEventType {
    pub const ALL: [ClaimEventType; 3] = [
        ClaimEventType::StatusChanged,
        ClaimEventType::Assigned,
        ClaimEventType::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimEventType::StatusChanged => "STATUS_CHANGED",
            ClaimEventType::Assigned => "ASSIGNED",
            ClaimEventType::Note => "NOTE",
        }
    }
}

macro_rules! wire_enum_parsing {
    ($ty:ident, $label:literal) => {
        impl FromStr for $ty {
            type Err = ClaimError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ClaimError::UnknownValue {
                        kind: $label,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum_parsing!(Lob, "line of business");
wire_enum_parsing!(Priority, "priority");
wire_enum_parsing!(ClaimStatus, "claim status");
wire_enum_parsing!(ClaimEventType, "claim event type");

/// A submitted insurance claim (list projection, no events)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: ClaimId,
    pub claim_number: ClaimNumber,
    pub lob: Lob,
    pub policy_number: String,
    pub insured_name: String,
    pub loss_date: NaiveDate,
    pub loss_type: String,
    pub description: String,
    pub contact_email: String,
    pub priority: Priority,
    pub status: ClaimStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An audit-trail entry owned by a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimEvent {
    pub id: ClaimEventId,
    pub claim_id: ClaimId,
    #[serde(rename = "type")]
    pub event_type: ClaimEventType,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub const SUBMITTED_EVENT_MESSAGE: &str = "Claim submitted";

/// A claim with its events, oldest first (detail projection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDetail {
    #[serde(flatten)]
    pub claim: Claim,
    pub events: Vec<ClaimEvent>,
}

impl ClaimDetail {
    pub fn id(&self) -> ClaimId {
        self.claim.id
    }
}

/// Fields handed to the store when creating a claim
///
/// Identifiers and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub claim_number: ClaimNumber,
    pub lob: Lob,
    pub policy_number: String,
    pub insured_name: String,
    pub loss_date: NaiveDate,
    pub loss_type: String,
    pub description: String,
    pub contact_email: String,
    pub priority: Priority,
    pub status: ClaimStatus,
    pub initial_event: NewClaimEvent,
}

/// First event written in the same transaction as the claim
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaimEvent {
    pub event_type: ClaimEventType,
    pub message: String,
}

impl NewClaimEvent {
    pub fn submitted() -> Self {
        Self {
            event_type: ClaimEventType::StatusChanged,
            message: SUBMITTED_EVENT_MESSAGE.to_string(),
        }
    }
}

impl NewClaim {
    /// Materializes the stored claim with the given identity and timestamp
    ///
    /// Used by stores that do not compute these themselves.
    pub fn into_detail(self, id: ClaimId, now: DateTime<Utc>) -> ClaimDetail {
        let event = ClaimEvent {
            id: ClaimEventId::new_v7(),
            claim_id: id,
            event_type: self.initial_event.event_type,
            message: self.initial_event.message,
            created_at: now,
        };

        ClaimDetail {
            claim: Claim {
                id,
                claim_number: self.claim_number,
                lob: self.lob,
                policy_number: self.policy_number,
                insured_name: self.insured_name,
                loss_date: self.loss_date,
                loss_type: self.loss_type,
                description: self.description,
                contact_email: self.contact_email,
                priority: self.priority,
                status: self.status,
                assigned_to: None,
                created_at: now,
                updated_at: now,
            },
            events: vec![event],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lob_wire_names() {
        assert_eq!(serde_json::to_string(&Lob::PersonalAuto).unwrap(), "\"Personal Auto\"");
        assert_eq!("Homeowners".parse::<Lob>().unwrap(), Lob::Homeowners);
        assert!("homeowners".parse::<Lob>().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ClaimStatus::InReview).unwrap(), "\"IN_REVIEW\"");
        assert_eq!("IN_REVIEW".parse::<ClaimStatus>().unwrap(), ClaimStatus::InReview);
    }

    #[test]
    fn test_reserved_lifecycle() {
        assert!(ClaimStatus::Submitted.can_transition_to(ClaimStatus::Assigned));
        assert!(!ClaimStatus::Closed.can_transition_to(ClaimStatus::Submitted));
        assert!(!ClaimStatus::Submitted.can_transition_to(ClaimStatus::InReview));
    }

    #[test]
    fn test_into_detail_attaches_initial_event() {
        let new_claim = NewClaim {
            claim_number: "CLM-2026-123456".parse().unwrap(),
            lob: Lob::Commercial,
            policy_number: "CP-77".to_string(),
            insured_name: "Acme Storage".to_string(),
            loss_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            loss_type: "Fire".to_string(),
            description: "Warehouse fire in bay 4.".to_string(),
            contact_email: "risk@acme.example".to_string(),
            priority: Priority::High,
            status: ClaimStatus::Submitted,
            initial_event: NewClaimEvent::submitted(),
        };
        let id = ClaimId::new_v7();
        let now = Utc::now();

        let detail = new_claim.into_detail(id, now);

        assert_eq!(detail.id(), id);
        assert_eq!(detail.claim.assigned_to, None);
        assert_eq!(detail.claim.created_at, detail.claim.updated_at);
        assert_eq!(detail.events.len(), 1);
        assert_eq!(detail.events[0].claim_id, id);
        assert_eq!(detail.events[0].event_type, ClaimEventType::StatusChanged);
        assert_eq!(detail.events[0].message, "Claim submitted");
    }

    #[test]
    fn test_detail_serializes_flat_with_events() {
        let json = serde_json::json!({
            "id": ClaimId::new_v7(),
            "claimNumber": "CLM-2026-654321",
            "lob": "Homeowners",
            "policyNumber": "HO-0001",
            "insuredName": "Alex Rivers",
            "lossDate": "2026-02-14",
            "lossType": "Water Damage",
            "description": "Kitchen leak caused cabinet and floor damage.",
            "contactEmail": "alex@example.com",
            "priority": "HIGH",
            "status": "SUBMITTED",
            "assignedTo": null,
            "createdAt": "2026-02-15T10:00:00Z",
            "updatedAt": "2026-02-15T10:00:00Z",
            "events": []
        });

        let detail: ClaimDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.claim.insured_name, "Alex Rivers");

        let back = serde_json::to_value(&detail).unwrap();
        assert_eq!(back["lossDate"], "2026-02-14");
        assert!(back["assignedTo"].is_null());
        assert!(back["events"].is_array());
    }
}
