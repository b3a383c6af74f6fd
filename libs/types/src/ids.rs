//! Unique identifier types for tracker entities
//!
//! Internal identifiers use UUID v7 for time-sortable ordering. Human-facing
//! external identifiers (`APP-001`, `FND-001`, `RSK-001`) stay plain strings;
//! their uniqueness is enforced by the store, not by the type system.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new identifier with the current timestamp
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a user account
    UserId
);
entity_id!(
    /// Unique identifier for an application under assessment
    ApplicationId
);
entity_id!(
    /// Unique identifier for a vulnerability finding
    FindingId
);
entity_id!(
    /// Unique identifier for a risk register entry
    RiskId
);
entity_id!(
    /// Unique identifier for an evidence attachment
    EvidenceId
);
entity_id!(
    /// Unique identifier for a discussion comment
    CommentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = FindingId::new();
        let b = FindingId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_roundtrip_through_string() {
        let id = ApplicationId::new();
        let parsed: ApplicationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn test_v7_ids_sort_by_creation_time() {
        let first = CommentId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = CommentId::new();
        assert!(first.as_uuid() < second.as_uuid());
    }
}
