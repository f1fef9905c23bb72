//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around UUIDs keep claim and event identifiers from being
//! mixed up. On the wire they serialize and parse as the bare hyphenated
//! UUID; the prefixed form produced by `Display` is only for logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new_v7()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            /// Accepts only the bare hyphenated UUID
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.len() != 36 {
                    return Err(CoreError::invalid_identifier(format!(
                        "{}: expected a hyphenated UUID",
                        s
                    )));
                }
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| CoreError::invalid_identifier(format!("{}: {}", s, e)))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(ClaimId, "CLAIM");
define_id!(ClaimEventId, "EVT");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display() {
        let id = ClaimId::new_v7();
        assert!(id.to_string().starts_with("CLAIM-"));
    }

    #[test]
    fn test_id_parsing_accepts_only_bare_uuid() {
        let original = ClaimId::new_v7();
        let bare: ClaimId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);

        assert!(original.to_string().parse::<ClaimId>().is_err());
        assert!(original.as_uuid().simple().to_string().parse::<ClaimId>().is_err());
        assert!(original.as_uuid().urn().to_string().parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = ClaimEventId::new_v7();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
