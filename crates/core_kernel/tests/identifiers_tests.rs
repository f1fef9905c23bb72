//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, and display formatting of
//! the claim identifiers.

use core_kernel::{ClaimId, ClaimEventId, CoreError};
use proptest::prelude::*;
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(ClaimId::new(), ClaimId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClaimId::prefix(), "CLAIM");
        assert_eq!(ClaimEventId::prefix(), "EVT");
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(*ClaimId::from_uuid(uuid).as_uuid(), uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = "claim_1".parse::<ClaimId>();
        assert!(matches!(result, Err(CoreError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        let event_id = ClaimEventId::new_v7();
        assert!(event_id.to_string().parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let id = ClaimId::new_v7();
        let json = serde_json::to_string(&id).unwrap();
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

proptest! {
    #[test]
    fn prop_any_uuid_parses_back(bytes in any::<[u8; 16]>()) {
        let uuid = Uuid::from_bytes(bytes);
        let parsed: ClaimId = uuid.to_string().parse().unwrap();
        prop_assert_eq!(*parsed.as_uuid(), uuid);
    }
}
