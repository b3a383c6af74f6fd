//! Domain error taxonomy
//!
//! Errors raised by the stores and validation, independent of any transport.
//! The service layer maps these onto HTTP statuses.

use thiserror::Error;

/// Errors surfaced by validation and the persistence ports
#[derive(Debug, Error)]
pub enum DomainError {
    /// A field failed validation; the message names the field
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Uniqueness violation on an external identifier
    #[error("{entity} already exists: {id}")]
    Conflict { entity: &'static str, id: String },

    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Deletion rejected because other records still reference the entity
    #[error("{entity} is still referenced by existing {referenced_by}")]
    Referenced {
        entity: &'static str,
        referenced_by: &'static str,
    },

    /// The persistence or file-storage collaborator failed
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DomainError::Conflict {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = DomainError::invalid("cvssScore", "must be within [0, 10]");
        assert_eq!(err.to_string(), "invalid cvssScore: must be within [0, 10]");
    }

    #[test]
    fn test_conflict_display() {
        let err = DomainError::conflict("application", "APP-001");
        assert!(err.to_string().contains("APP-001"));
    }
}
